// src/extractors/courses.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::transcripts::CourseRecord;

// Course rows open with: school code, year range, term, grade, course id.
static COURSE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s+(\d{4}-\d{4})\s+(\d)\s+(\d+)\s+(\d+)")
        .expect("course header pattern must compile")
});

// Flag tokens (program / honors-AP / not-for-credit) that ride along in the
// title cell and never belong to the course title.
const FILLER_MARKERS: [&str; 3] = ["P", "H/AP", "N"];

/// Line-oriented tokenizer for the course-history table.
///
/// Splitting the remainder of a matched row is positional: the last two
/// whitespace-separated tokens are the credit columns, the token before
/// them is the mark, and whatever is left is the title. This is a
/// heuristic for the observed layout, not a grammar; a title word that
/// happens to equal a filler marker is stripped like the marker would be.
pub struct CourseTokenizer;

impl CourseTokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<CourseRecord> {
        let mut courses = Vec::new();

        for line in text.lines() {
            let Some(caps) = COURSE_HEADER_RE.captures(line) else {
                continue;
            };

            let header_end = caps.get(0).map_or(0, |m| m.end());
            let rest = line[header_end..].trim();
            let parts: Vec<&str> = rest.split_whitespace().collect();

            // Need at least mark plus the two credit columns.
            if parts.len() < 3 {
                tracing::debug!("Skipping short course row: {:?}", line);
                continue;
            }

            let credits_completed = parts[parts.len() - 1].to_string();
            let credits_attempted = parts[parts.len() - 2].to_string();
            let mark = parts[parts.len() - 3].to_string();
            let course_title = parts[..parts.len() - 3]
                .iter()
                .filter(|token| !FILLER_MARKERS.contains(token))
                .copied()
                .collect::<Vec<_>>()
                .join(" ");

            courses.push(CourseRecord {
                student_id: String::new(),
                school_code: caps[1].to_string(),
                year: caps[2].to_string(),
                term: caps[3].to_string(),
                grade: caps[4].to_string(),
                course_id: caps[5].to_string(),
                course_title,
                mark,
                credits_attempted,
                credits_completed,
            });
        }

        courses
    }
}
