pub mod a001_course;
