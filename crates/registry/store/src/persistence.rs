pub mod file;
pub mod local;
