// src/transcripts/models.rs
use std::collections::BTreeMap;

use serde::Serialize;

/// Scalar fields extracted from one transcript.
///
/// Stored as a field-name -> value mapping rather than a fixed struct so
/// the student table can emit the union of whatever fields were seen across
/// a run. `None` means the field's pattern never matched anywhere in the
/// text; the empty string is reserved for a match that captured empty text.
/// The two only collapse at the CSV boundary.
#[derive(Debug, Clone, Default)]
pub struct StudentRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl StudentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field. Unmatched fields are stored explicitly as `None` so
    /// every known field name still appears in the output header.
    pub fn set(&mut self, name: &str, value: Option<String>) {
        self.fields.insert(name.to_string(), value);
    }

    /// The matched value, or `None` when the pattern never matched.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    /// The value as it appears in the CSV output: matched text, or "".
    pub fn field_text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Field names present in this record, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// One row of the course-history table.
///
/// All fields are kept as strings exactly as tokenized; field order here is
/// the column order of the course CSV. `student_id` is stamped by the batch
/// driver after extraction, not captured from the course line itself.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRecord {
    pub student_id: String,
    pub school_code: String,
    pub year: String,
    pub term: String,
    pub grade: String,
    pub course_id: String,
    pub course_title: String,
    pub mark: String,
    pub credits_attempted: String,
    pub credits_completed: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_field_is_distinct_from_empty_match() {
        let mut record = StudentRecord::new();
        record.set("age", None);
        record.set("counselor", Some(String::new()));

        assert_eq!(record.get("age"), None);
        assert_eq!(record.get("counselor"), Some(""));
        // Both render identically in the output.
        assert_eq!(record.field_text("age"), "");
        assert_eq!(record.field_text("counselor"), "");
    }

    #[test]
    fn field_names_are_sorted() {
        let mut record = StudentRecord::new();
        record.set("name", Some("Dristi Roy".to_string()));
        record.set("age", Some("17".to_string()));
        record.set("grade", None);

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["age", "grade", "name"]);
    }
}
