// src/extractors/mod.rs
pub mod courses;
pub mod student;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use courses::CourseTokenizer;
#[allow(unused_imports)]
pub use student::{
    CreditTotals,
    GpaSummary,
    PositionalSummaryStrategy,
    StudentExtractor,
    SummaryStrategy,
};
