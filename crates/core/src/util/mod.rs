pub mod file;
pub mod html;
pub mod json;
pub mod sort;
