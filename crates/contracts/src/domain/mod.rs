pub mod a001_department;
pub mod a002_program;
pub mod a003_curriculum;
pub mod common;
