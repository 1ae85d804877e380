// src/transcripts/mod.rs
pub mod loader;
pub mod models;

pub use models::{CourseRecord, StudentRecord};
