// src/storage/mod.rs
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::transcripts::{CourseRecord, StudentRecord};
use crate::utils::error::StorageError;

pub const STUDENT_DATA_FILE: &str = "student_data.csv";
pub const COURSES_FILE: &str = "courses.csv";
const RUN_METADATA_FILE: &str = "run_metadata.json";

/// Counts reported in the run metadata document.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub students: usize,
    pub courses: usize,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the student table.
    ///
    /// The header is the sorted union of field names across all records,
    /// so the column set is only known once the whole batch has been
    /// accumulated. Unset fields render as empty cells. Returns `None`
    /// without touching the filesystem when there are no records.
    pub fn save_students(
        &self,
        records: &[StudentRecord],
    ) -> Result<Option<PathBuf>, StorageError> {
        if records.is_empty() {
            tracing::warn!("No student data to save");
            return Ok(None);
        }

        let columns: BTreeSet<&str> = records.iter().flat_map(|r| r.field_names()).collect();

        let file_path = self.base_dir.join(STUDENT_DATA_FILE);
        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(columns.iter().map(|&c| record.field_text(c)))?;
        }
        writer.flush()?;

        tracing::info!("Student data saved to {}", file_path.display());
        Ok(Some(file_path))
    }

    /// Writes the course table in its fixed column order. Returns `None`
    /// without writing when there are no records.
    pub fn save_courses(
        &self,
        records: &[CourseRecord],
    ) -> Result<Option<PathBuf>, StorageError> {
        if records.is_empty() {
            tracing::warn!("No course data to save");
            return Ok(None);
        }

        let file_path = self.base_dir.join(COURSES_FILE);
        let mut writer = csv::Writer::from_path(&file_path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!("Course data saved to {}", file_path.display());
        Ok(Some(file_path))
    }

    /// Saves a JSON summary of the run.
    pub fn save_run_metadata(&self, summary: &RunSummary) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(RUN_METADATA_FILE);

        let metadata = serde_json::json!({
            "files_processed": summary.files_processed,
            "files_failed": summary.files_failed,
            "students": summary.students,
            "courses": summary.courses,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&file_path, metadata_str)?;

        tracing::info!("Saved run metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the raw extracted text of one transcript under `debug/`.
    pub fn save_debug_text(&self, source: &Path, text: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.base_dir.join("debug");
        if !debug_dir.exists() {
            fs::create_dir_all(&debug_dir)?;
        }

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("transcript");
        let file_path = debug_dir.join(format!("{}_raw.txt", stem));

        fs::write(&file_path, text)?;

        tracing::info!("Saved raw transcript text to {}", file_path.display());
        Ok(file_path)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn student(fields: &[(&str, Option<&str>)]) -> StudentRecord {
        let mut record = StudentRecord::new();
        for &(name, value) in fields {
            record.set(name, value.map(str::to_string));
        }
        record
    }

    #[test]
    fn student_header_is_sorted_union_of_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let records = vec![
            student(&[("name", Some("Dristi Roy")), ("age", Some("17"))]),
            student(&[("name", Some("Alex Chen")), ("grade", None)]),
        ];

        let path = storage.save_students(&records).unwrap().unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();

        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(header, vec!["age", "grade", "name"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        // First record: no "grade" field at all, rendered as an empty cell.
        assert_eq!(rows[0].get(0), Some("17"));
        assert_eq!(rows[0].get(1), Some(""));
        assert_eq!(rows[0].get(2), Some("Dristi Roy"));
        // Second record: "age" absent, "grade" unset; both empty.
        assert_eq!(rows[1].get(0), Some(""));
        assert_eq!(rows[1].get(1), Some(""));
        assert_eq!(rows[1].get(2), Some("Alex Chen"));
    }

    #[test]
    fn empty_record_lists_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        assert!(storage.save_students(&[]).unwrap().is_none());
        assert!(storage.save_courses(&[]).unwrap().is_none());
        assert!(!dir.path().join(STUDENT_DATA_FILE).exists());
        assert!(!dir.path().join(COURSES_FILE).exists());
    }

    #[test]
    fn course_table_uses_the_fixed_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let records = vec![CourseRecord {
            student_id: "12345".to_string(),
            school_code: "10".to_string(),
            year: "2022-2023".to_string(),
            term: "1".to_string(),
            grade: "9".to_string(),
            course_id: "101".to_string(),
            course_title: "Algebra I".to_string(),
            mark: "A".to_string(),
            credits_attempted: "1.0".to_string(),
            credits_completed: "1.0".to_string(),
        }];

        let path = storage.save_courses(&records).unwrap().unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();

        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(
            header,
            vec![
                "student_id",
                "school_code",
                "year",
                "term",
                "grade",
                "course_id",
                "course_title",
                "mark",
                "credits_attempted",
                "credits_completed",
            ]
        );

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(0), Some("12345"));
        assert_eq!(row.get(6), Some("Algebra I"));
    }

    #[test]
    fn run_metadata_includes_counts_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let summary = RunSummary {
            files_processed: 2,
            files_failed: 1,
            students: 2,
            courses: 14,
        };
        let path = storage.save_run_metadata(&summary).unwrap();

        let metadata: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(metadata["files_processed"], 2);
        assert_eq!(metadata["files_failed"], 1);
        assert_eq!(metadata["courses"], 14);
        assert!(metadata["extraction_timestamp"].is_string());
    }

    #[test]
    fn debug_text_lands_under_the_debug_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let path = storage
            .save_debug_text(Path::new("input/transcript_042.pdf"), "raw text")
            .unwrap();

        assert_eq!(path, dir.path().join("debug").join("transcript_042_raw.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "raw text");
    }
}
