//! CSV document source
//!
//! Reads `uid` and `content` columns; when every annotation column is
//! present, rows with a non-empty `Answer` also carry a reference label.
//! Every row needs a `uid` that no earlier row used.

use csv::StringRecord;
use spamcheck_core::{Document, Error, LabeledDocument, ReferenceLabel, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

const ID_COLUMN: &str = "uid";
const TEXT_COLUMN: &str = "content";

const KEYWORD_SPAM_COLUMN: &str = "1: Keyword Spam";
const MALICIOUS_LINKS_COLUMN: &str = "2: Malicious Links";
const ADS_COLUMN: &str = "3: Advertisements";
const WRONG_LANGUAGE_COLUMN: &str = "4: Document not in target language";
const UNREADABLE_COLUMN: &str = "5: Document not readable or incomprehensible";
const ANSWER_COLUMN: &str = "Answer";

/// Positions of the annotation columns in the header
#[derive(Debug, Clone, Copy)]
struct ReferenceColumns {
    keyword_spam: usize,
    malicious_links: usize,
    ads: usize,
    wrong_language: usize,
    unreadable: usize,
    answer: usize,
}

impl ReferenceColumns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        Some(Self {
            keyword_spam: column(headers, KEYWORD_SPAM_COLUMN)?,
            malicious_links: column(headers, MALICIOUS_LINKS_COLUMN)?,
            ads: column(headers, ADS_COLUMN)?,
            wrong_language: column(headers, WRONG_LANGUAGE_COLUMN)?,
            unreadable: column(headers, UNREADABLE_COLUMN)?,
            answer: column(headers, ANSWER_COLUMN)?,
        })
    }

    fn read(&self, row: &StringRecord) -> Option<ReferenceLabel> {
        let answer = row.get(self.answer).map(str::trim).unwrap_or_default();
        if answer.is_empty() {
            return None;
        }

        let yes = |idx: usize| row.get(idx).map_or(false, is_yes);
        Some(ReferenceLabel {
            keyword_spam: yes(self.keyword_spam),
            malicious_links: yes(self.malicious_links),
            ads: yes(self.ads),
            wrong_language: yes(self.wrong_language),
            unreadable: yes(self.unreadable),
            is_spam: is_yes(answer),
        })
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn is_yes(cell: &str) -> bool {
    cell.trim().eq_ignore_ascii_case("yes")
}

/// Load documents in file order, stopping after `limit` rows when given
pub fn load_documents(
    path: impl AsRef<Path>,
    limit: Option<usize>,
) -> Result<Vec<LabeledDocument>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::input(format!("{}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::input(format!("{}: {}", path.display(), e)))?
        .clone();

    let missing =
        |name: &str| Error::input(format!("{}: missing '{}' column", path.display(), name));
    let id_idx = column(&headers, ID_COLUMN).ok_or_else(|| missing(ID_COLUMN))?;
    let text_idx = column(&headers, TEXT_COLUMN).ok_or_else(|| missing(TEXT_COLUMN))?;
    let reference_columns = ReferenceColumns::locate(&headers);

    if reference_columns.is_none() {
        debug!(
            path = %path.display(),
            "no annotation columns, documents carry no reference labels"
        );
    }

    let mut documents = Vec::new();
    let mut seen_ids = HashSet::new();
    for (line, row) in reader.records().enumerate() {
        if limit.map_or(false, |limit| documents.len() >= limit) {
            break;
        }

        let row_error =
            |msg: String| Error::input(format!("{}: row {}: {}", path.display(), line + 1, msg));
        let row = row.map_err(|e| row_error(e.to_string()))?;

        let id = row.get(id_idx).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(row_error(format!("empty '{}'", ID_COLUMN)));
        }
        if !seen_ids.insert(id.to_string()) {
            return Err(row_error(format!("duplicate '{}' {}", ID_COLUMN, id)));
        }
        let text = row.get(text_idx).unwrap_or_default();

        let mut document = LabeledDocument::new(Document::new(id, text));
        if let Some(reference) = reference_columns.and_then(|cols| cols.read(&row)) {
            document = document.with_reference(reference);
        }
        documents.push(document);
    }

    let annotated = documents.iter().filter(|d| d.reference.is_some()).count();
    info!(
        path = %path.display(),
        documents = documents.len(),
        annotated,
        "loaded documents"
    );

    Ok(documents)
}
