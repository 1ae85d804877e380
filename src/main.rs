// src/main.rs
mod extractors;
mod storage;
mod transcripts;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use extractors::{CourseTokenizer, StudentExtractor};
use storage::{RunSummary, StorageManager};
use transcripts::{loader, CourseRecord, StudentRecord};
use utils::AppError;

/// Command Line Interface for the transcript batch extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a transcript file or a directory of transcripts (.pdf / .txt)
    input: PathBuf,

    /// Output directory for the generated tables
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// Debug mode - save the raw extracted text of each transcript
    #[arg(short, long)]
    debug: bool,

    /// Write a JSON metadata summary of the run
    #[arg(long)]
    metadata: bool,
}

/// Accumulated result of one batch run, before serialization.
struct BatchOutcome {
    students: Vec<StudentRecord>,
    courses: Vec<CourseRecord>,
    success_count: usize,
    failure_count: usize,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Resolve the input path into transcript files
    let files = loader::discover(&args.input)?;
    if files.is_empty() {
        return Err(AppError::Config(format!(
            "No .pdf or .txt transcripts found under {}",
            args.input.display()
        )));
    }
    tracing::info!("Found {} transcript file(s)", files.len());

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Process each file, accumulating records
    let outcome = process_files(&files, args.debug.then_some(&storage));

    // 6. Emit the tables from the accumulated records
    storage.save_students(&outcome.students)?;
    storage.save_courses(&outcome.courses)?;

    let summary = RunSummary {
        files_processed: outcome.success_count,
        files_failed: outcome.failure_count,
        students: outcome.students.len(),
        courses: outcome.courses.len(),
    };
    if args.metadata {
        storage.save_run_metadata(&summary)?;
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}, Students: {}, Courses: {}",
        outcome.success_count,
        outcome.failure_count,
        summary.students,
        summary.courses
    );

    if outcome.success_count == 0 && outcome.failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to process all {} transcript file(s)",
            outcome.failure_count
        )));
    }

    Ok(())
}

/// Runs extraction over each file in turn. A file that fails to load is
/// logged and contributes zero records; the batch continues.
fn process_files(files: &[PathBuf], debug_storage: Option<&StorageManager>) -> BatchOutcome {
    let student_extractor = StudentExtractor::new();
    let course_tokenizer = CourseTokenizer::new();

    let mut outcome = BatchOutcome {
        students: Vec::new(),
        courses: Vec::new(),
        success_count: 0,
        failure_count: 0,
    };

    for path in files {
        tracing::info!("Processing {}", path.display());

        match loader::load_text(path) {
            Ok(text) => {
                if let Some(storage) = debug_storage {
                    if let Err(e) = storage.save_debug_text(path, &text) {
                        tracing::warn!("Failed to save debug text: {}", e);
                    }
                }

                let student = student_extractor.extract(&text);
                let mut courses = course_tokenizer.extract(&text);

                // Stamp each course with the owning student's identifier.
                let student_id = student.field_text("student_id").to_string();
                for course in &mut courses {
                    course.student_id = student_id.clone();
                }

                tracing::info!(
                    "Extracted data for {} ({} courses)",
                    student.get("name").unwrap_or("Unknown"),
                    courses.len()
                );

                outcome.students.push(student);
                outcome.courses.extend(courses);
                outcome.success_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                outcome.failure_count += 1;
            }
        }
    }

    outcome
}
