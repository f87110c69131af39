pub mod a001_course;
pub mod a002_user;
