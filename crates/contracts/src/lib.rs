pub mod lms;
pub mod shared;
