// File-backed lookup tables

pub mod index;

pub use index::NameIndex;
