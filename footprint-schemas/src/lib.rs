pub mod factors;
pub mod file_formats;
pub mod input;
pub mod model;
pub mod result;
