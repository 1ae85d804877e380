// src/extractors/student.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::transcripts::StudentRecord;

// --- Regex Patterns (Lazy Static) ---
// Scalar fields: first match in the text, first capture group, trimmed.
static FIELD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("student_id", r"Student ID\s+(\d+)"),
        ("state_id", r"State Student ID\s+(\d+)"),
        ("age", r"Age\s+(\d+)"),
        ("birthdate", r"Birthdate\s+([\d/]+)"),
        ("counselor", r"Counselor\s+(.+)"),
        ("school", r"\| (.+ High School)"),
        ("language", r"RptgLng\s+(.+)"),
    ]
    .into_iter()
    .map(|(name, pat)| {
        (
            name,
            Regex::new(pat).expect("field pattern must compile"),
        )
    })
    .collect()
});

// Name labels vary between transcript pages; tried in order, first match
// wins. The contact-list header captures "Last, First".
static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"Name:\s+(.+)",
        r"Student Name\s+(.+)",
        r"Full Contact List For ([A-Z][a-z]+, [A-Z][a-z]+)",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("name pattern must compile"))
    .collect()
});

// "Grade N" appears once per course-history year block as well as in the
// header; the first occurrence is the current grade level.
static GRADE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Grade\s+(\d+)").expect("grade pattern must compile"));

// Adjacent decimal pair, anywhere in the text.
static DECIMAL_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.\d+)\s+(\d+\.\d+)").expect("decimal pair pattern must compile")
});

// Decimal pair closing a line; the last such line is the credit summary row.
static LINE_END_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(\d+\.\d+)\s+(\d+\.\d+)\s*$").expect("credit pattern must compile")
});

// --- Summary heuristics ---

/// Weighted/unweighted GPA values for the academic, total, and
/// grades-10-12 summary rows.
#[derive(Debug, Clone)]
pub struct GpaSummary {
    pub weighted_acad: String,
    pub unweighted_acad: String,
    pub weighted_total: String,
    pub unweighted_total: String,
    pub weighted_10_12: String,
    pub unweighted_10_12: String,
}

/// Whole-transcript credit totals.
#[derive(Debug, Clone)]
pub struct CreditTotals {
    pub attempted: String,
    pub completed: String,
}

/// Recovers the unlabelled GPA and credit summary rows from the text.
///
/// These rows carry no marker the patterns could anchor on, so they are
/// found by position. The trait keeps that guesswork swappable per
/// transcript layout without touching the rest of the extractor.
pub trait SummaryStrategy {
    fn gpa_summary(&self, text: &str) -> Option<GpaSummary>;
    fn credit_totals(&self, text: &str) -> Option<CreditTotals>;
}

/// Positional heuristics for the observed layout: the first three adjacent
/// decimal pairs in the text are the GPA rows (academic, total, 10-12),
/// and the last decimal pair ending a line is the credit summary row.
///
/// Nothing validates that the matched pairs really are GPA or credit rows.
#[derive(Debug, Default)]
pub struct PositionalSummaryStrategy;

impl SummaryStrategy for PositionalSummaryStrategy {
    fn gpa_summary(&self, text: &str) -> Option<GpaSummary> {
        let pairs: Vec<(String, String)> = DECIMAL_PAIR_RE
            .captures_iter(text)
            .take(3)
            .map(|c| (c[1].to_string(), c[2].to_string()))
            .collect();

        if pairs.len() < 3 {
            return None;
        }

        Some(GpaSummary {
            weighted_acad: pairs[0].0.clone(),
            unweighted_acad: pairs[0].1.clone(),
            weighted_total: pairs[1].0.clone(),
            unweighted_total: pairs[1].1.clone(),
            weighted_10_12: pairs[2].0.clone(),
            unweighted_10_12: pairs[2].1.clone(),
        })
    }

    fn credit_totals(&self, text: &str) -> Option<CreditTotals> {
        LINE_END_PAIR_RE
            .captures_iter(text)
            .last()
            .map(|c| CreditTotals {
                attempted: c[1].to_string(),
                completed: c[2].to_string(),
            })
    }
}

// --- Main Extractor Structure ---

/// Applies the field pattern table to the full transcript text.
///
/// Extraction never fails: a pattern that does not match leaves its field
/// unset, and the returned record still carries every field name.
pub struct StudentExtractor {
    summary: Box<dyn SummaryStrategy>,
}

impl StudentExtractor {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(PositionalSummaryStrategy))
    }

    /// Uses an alternate summary heuristic, e.g. for a layout whose GPA
    /// table sits elsewhere in the document.
    pub fn with_strategy(summary: Box<dyn SummaryStrategy>) -> Self {
        Self { summary }
    }

    pub fn extract(&self, text: &str) -> StudentRecord {
        let mut record = StudentRecord::new();

        for &(name, ref pattern) in FIELD_PATTERNS.iter() {
            let mut value = pattern.captures(text).map(|c| c[1].trim().to_string());
            // Commas inside the counselor's name would split the CSV cell.
            if name == "counselor" {
                value = value.map(|v| v.replace(',', ""));
            }
            record.set(name, value);
        }

        record.set("grade", GRADE_RE.captures(text).map(|c| c[1].to_string()));
        record.set("name", extract_name(text));

        let gpa = self.summary.gpa_summary(text);
        record.set(
            "weighted_acad_gpa",
            gpa.as_ref().map(|g| g.weighted_acad.clone()),
        );
        record.set(
            "unweighted_acad_gpa",
            gpa.as_ref().map(|g| g.unweighted_acad.clone()),
        );
        record.set(
            "weighted_total_gpa",
            gpa.as_ref().map(|g| g.weighted_total.clone()),
        );
        record.set(
            "unweighted_total_gpa",
            gpa.as_ref().map(|g| g.unweighted_total.clone()),
        );
        record.set(
            "weighted_10_12_gpa",
            gpa.as_ref().map(|g| g.weighted_10_12.clone()),
        );
        record.set(
            "unweighted_10_12_gpa",
            gpa.map(|g| g.unweighted_10_12),
        );

        let credits = self.summary.credit_totals(text);
        record.set(
            "credits_attempted",
            credits.as_ref().map(|c| c.attempted.clone()),
        );
        record.set("credits_completed", credits.map(|c| c.completed));

        record
    }
}

/// Tries the name patterns in order; a "Last, First" capture is reordered
/// to "First Last", anything else is used as captured.
fn extract_name(text: &str) -> Option<String> {
    let captured = NAME_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|c| c[1].trim().to_string())?;

    let parts: Vec<&str> = captured.split(", ").collect();
    if parts.len() == 2 {
        Some(format!("{} {}", parts[1], parts[0]))
    } else {
        Some(captured)
    }
}
