//! JSONL results and their schema check

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use spamcheck_core::{ClassificationResult, Document, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// One line of the results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: String,
    pub content: String,
    pub labels_spam: u8,
    pub labels_spam_vector: OutputVector,
    pub confidence_score: u8,
}

/// Category flags; the override flags appear only when set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputVector {
    pub keyword_spam: u8,
    pub malicious_links: u8,
    pub ads: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrong_language: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unreadable: Option<u8>,
}

impl OutputRecord {
    pub fn new(document: &Document, result: &ClassificationResult) -> Self {
        let labels = &result.labels;
        Self {
            id: document.id.clone(),
            content: document.text.clone(),
            labels_spam: labels.is_spam.into(),
            labels_spam_vector: OutputVector {
                keyword_spam: labels.keyword_spam.into(),
                malicious_links: labels.malicious_links.into(),
                ads: labels.ads.into(),
                wrong_language: labels.wrong_language.then_some(1),
                unreadable: labels.unreadable.then_some(1),
            },
            confidence_score: labels.confidence.value(),
        }
    }
}

/// Write one JSON object per line
pub fn write_jsonl(path: impl AsRef<Path>, records: &[OutputRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    info!(path = %path.display(), records = records.len(), "results written");
    Ok(())
}

/// Read every line of a JSONL file as a raw JSON value
pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let reader = BufReader::new(File::open(path)?);
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        values.push(serde_json::from_str(&line)?);
    }
    Ok(values)
}

/// Problems found in one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    pub index: usize,
    pub id: String,
    pub problems: Vec<String>,
}

/// Outcome of checking a results file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaCheck {
    pub total_results: usize,
    pub valid_results: usize,
    pub issues: Vec<SchemaIssue>,
}

impl SchemaCheck {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Log the outcome; only the first few issues are listed
    pub fn log(&self) {
        if self.is_valid() {
            info!(records = self.total_results, "all results match the output schema");
            return;
        }

        warn!(
            invalid = self.issues.len(),
            valid = self.valid_results,
            total = self.total_results,
            "results with schema issues"
        );
        for issue in self.issues.iter().take(5) {
            warn!(
                index = issue.index,
                id = %issue.id,
                problems = %issue.problems.join(", "),
                "schema issue"
            );
        }
    }
}

/// Check raw records against the output schema
pub fn check_records(records: &[Value]) -> SchemaCheck {
    let issues: Vec<SchemaIssue> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let problems = record_problems(record);
            (!problems.is_empty()).then(|| SchemaIssue {
                index,
                id: record
                    .get("id")
                    .and_then(Value::as_str)
                    .map(|id| id.chars().take(8).collect())
                    .unwrap_or_else(|| "unknown".to_string()),
                problems,
            })
        })
        .collect();

    SchemaCheck {
        total_results: records.len(),
        valid_results: records.len() - issues.len(),
        issues,
    }
}

fn record_problems(record: &Value) -> Vec<String> {
    let Some(record) = record.as_object() else {
        return vec!["record is not an object".to_string()];
    };

    let mut problems = Vec::new();
    for field in ["id", "content", "labels_spam", "labels_spam_vector", "confidence_score"] {
        if !record.contains_key(field) {
            problems.push(format!("missing required field: {}", field));
        }
    }

    if let Some(value) = record.get("labels_spam") {
        if !is_flag(value) {
            problems.push(format!("invalid labels_spam value: {} (must be 0 or 1)", value));
        }
    }

    if let Some(value) = record.get("confidence_score") {
        if !value.as_u64().map_or(false, |c| (1..=5).contains(&c)) {
            problems.push(format!("invalid confidence_score: {} (must be 1-5)", value));
        }
    }

    match record.get("labels_spam_vector") {
        Some(Value::Object(vector)) => vector_problems(vector, &mut problems),
        Some(_) => problems.push("labels_spam_vector is not an object".to_string()),
        None => {}
    }

    problems
}

fn vector_problems(vector: &Map<String, Value>, problems: &mut Vec<String>) {
    for category in ["keyword_spam", "malicious_links", "ads"] {
        match vector.get(category) {
            None => problems.push(format!("missing required spam category: {}", category)),
            Some(value) if !is_flag(value) => {
                problems.push(format!("invalid value for {}: {} (must be 0 or 1)", category, value))
            }
            Some(_) => {}
        }
    }

    let mut overrides = 0;
    for category in ["wrong_language", "unreadable"] {
        match vector.get(category).and_then(Value::as_u64) {
            Some(1) => overrides += 1,
            Some(_) | None if vector.contains_key(category) => {
                problems.push(format!("{} should only be present when it is 1", category))
            }
            _ => {}
        }
    }

    if overrides > 1 {
        problems.push("wrong_language and unreadable cannot both be 1".to_string());
    }
}

fn is_flag(value: &Value) -> bool {
    matches!(value.as_u64(), Some(0 | 1))
}
