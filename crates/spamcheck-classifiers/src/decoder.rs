//! Tolerant decoder for classification replies
//!
//! Replies are supposed to be a JSON object but arrive wrapped in prose or
//! markdown fences, truncated, or with trailing commas. Decoding runs in
//! three steps:
//! - a scanner state machine picks the brace-delimited candidate, keeping
//!   the longest nested object as a fallback
//! - the candidate is parsed; on failure one repair pass runs and parsing is retried once
//! - fields are coerced into a [`LabelVector`], absent fields defaulting to `false`
//!
//! Decoding is total: every input produces labels and a [`DecodeStatus`].

use serde_json::{Map, Value};
use spamcheck_core::{Confidence, DecodeStatus, LabelVector};
use tracing::debug;

/// Key of the nested object holding the category flags
const VECTOR_KEY: &str = "labels_spam_vector";

const AGGREGATE_KEYS: &[&str] = &["labels_spam", "is_spam"];
const CONFIDENCE_KEYS: &[&str] = &["confidence_score", "confidence"];

/// Keys that mark an object as a label record
const KNOWN_KEYS: &[&str] = &[
    VECTOR_KEY,
    "keyword_spam",
    "malicious_links",
    "ads",
    "wrong_language",
    "unreadable",
    "labels_spam",
    "is_spam",
    "confidence_score",
    "confidence",
];

/// Decoded labels and how far they can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub labels: LabelVector,
    pub status: DecodeStatus,

    /// The reply only decoded after repair or from a nested object
    pub repaired: bool,
}

impl Decoded {
    fn fallback(status: DecodeStatus) -> Self {
        Self {
            labels: LabelVector::fallback(),
            status,
            repaired: false,
        }
    }
}

/// Decode a raw reply into a label vector
pub fn decode(raw: &str) -> Decoded {
    if raw.trim().is_empty() {
        return Decoded::fallback(DecodeStatus::Empty);
    }

    let candidates = scan_candidates(raw);
    let Some(candidate) = candidates.primary else {
        debug!("reply contains no brace-delimited candidate");
        return Decoded::fallback(DecodeStatus::Malformed);
    };

    if let Some(decoded) = decode_candidate(candidate.text) {
        return decoded;
    }

    // A stray brace can swallow the real object; try the best nested one
    if let Some(decoded) = candidates.nested.and_then(decode_candidate) {
        debug!(kind = ?candidate.kind, "outer candidate unusable, decoded a nested object");
        return Decoded {
            repaired: true,
            ..decoded
        };
    }

    debug!(kind = ?candidate.kind, "reply could not be parsed after repair");
    Decoded::fallback(DecodeStatus::Malformed)
}

/// Parse one candidate, repairing it once if needed.
///
/// `None` when it stays unparseable or carries none of the label keys.
fn decode_candidate(text: &str) -> Option<Decoded> {
    if let Some(object) = parse_object(text) {
        return coerce(&object, false);
    }

    let object = parse_object(&repair(text))?;
    debug!("candidate parsed after repair");
    coerce(&object, true)
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// How a candidate ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Opening and closing braces balance
    Balanced,

    /// The reply ended inside the object
    Truncated,
}

/// A brace-delimited slice of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub text: &'a str,
    pub kind: CandidateKind,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Between top-level objects
    Outside,

    /// Inside an object
    Object,

    /// Inside a string literal within an object
    Str { escaped: bool },
}

/// Candidates found by one scan of a reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates<'a> {
    /// Longest top-level candidate
    pub primary: Option<Candidate<'a>>,

    /// Longest balanced object nested inside another
    pub nested: Option<&'a str>,
}

/// Scan a reply for brace-delimited candidates.
///
/// The primary candidate is the longest top-level object. Balanced
/// candidates win ties; a trailing unterminated object is a truncated
/// candidate running to the end of the reply. Balanced objects at any
/// deeper level are tracked separately.
pub fn scan_candidates(raw: &str) -> Candidates<'_> {
    let mut state = ScanState::Outside;
    let mut opens: Vec<usize> = Vec::new();
    let mut top: Option<(usize, usize)> = None;
    let mut nested: Option<(usize, usize)> = None;

    for (idx, ch) in raw.char_indices() {
        state = match (state, ch) {
            (ScanState::Outside | ScanState::Object, '{') => {
                opens.push(idx);
                ScanState::Object
            }
            (ScanState::Outside, _) => ScanState::Outside,

            (ScanState::Object, '"') => ScanState::Str { escaped: false },
            (ScanState::Object, '}') => {
                let end = idx + ch.len_utf8();
                if let Some(start) = opens.pop() {
                    if opens.is_empty() {
                        keep_longest(&mut top, (start, end));
                    } else {
                        keep_longest(&mut nested, (start, end));
                    }
                }
                if opens.is_empty() {
                    ScanState::Outside
                } else {
                    ScanState::Object
                }
            }
            (ScanState::Object, _) => ScanState::Object,

            (ScanState::Str { escaped: true }, _) => ScanState::Str { escaped: false },
            (ScanState::Str { .. }, '\\') => ScanState::Str { escaped: true },
            (ScanState::Str { .. }, '"') => ScanState::Object,
            (ScanState::Str { .. }, _) => ScanState::Str { escaped: false },
        };
    }

    let truncated = opens.first().map(|&start| (start, raw.len()));

    let primary = match (top, truncated) {
        (Some((s, e)), Some((ts, te))) if te - ts > e - s => Some(Candidate {
            text: &raw[ts..te],
            kind: CandidateKind::Truncated,
        }),
        (Some((s, e)), _) => Some(Candidate {
            text: &raw[s..e],
            kind: CandidateKind::Balanced,
        }),
        (None, Some((ts, te))) => Some(Candidate {
            text: &raw[ts..te],
            kind: CandidateKind::Truncated,
        }),
        (None, None) => None,
    };

    Candidates {
        primary,
        nested: nested.map(|(s, e)| &raw[s..e]),
    }
}

/// Find the longest top-level brace-delimited candidate
pub fn extract_candidate(raw: &str) -> Option<Candidate<'_>> {
    scan_candidates(raw).primary
}

/// Earlier spans win ties
fn keep_longest(best: &mut Option<(usize, usize)>, (start, end): (usize, usize)) {
    if best.map_or(true, |(s, e)| end - start > e - s) {
        *best = Some((start, end));
    }
}

/// One deterministic repair pass over a candidate.
///
/// Drops trailing commas before a closer or at the end, skips closers that
/// match nothing, and closes an unterminated string. A truncated last member
/// with no usable value (`"key"`, `"key":`, a cut-off literal) is dropped,
/// then the missing closers are appended in nesting order.
pub fn repair(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len() + 4);
    let mut closers: Vec<char> = Vec::new();
    // Per open container: where its last member starts in `out`
    let mut cuts: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut pending_comma = false;
    let mut pending_space = String::new();

    for ch in candidate.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            ',' => {
                flush_comma(&mut out, &mut pending_comma, &mut pending_space);
                if let Some(cut) = cuts.last_mut() {
                    *cut = out.len();
                }
                pending_comma = true;
            }
            c if c.is_whitespace() => {
                if pending_comma {
                    pending_space.push(c);
                } else {
                    out.push(c);
                }
            }
            '}' | ']' => {
                pending_comma = false;
                out.push_str(&pending_space);
                pending_space.clear();

                if !closers.contains(&ch) {
                    continue;
                }
                while let Some(expected) = closers.pop() {
                    cuts.pop();
                    out.push(expected);
                    if expected == ch {
                        break;
                    }
                }
            }
            _ => {
                flush_comma(&mut out, &mut pending_comma, &mut pending_space);
                out.push(ch);
                match ch {
                    '{' | '[' => {
                        closers.push(if ch == '{' { '}' } else { ']' });
                        cuts.push(out.len());
                    }
                    '"' => in_string = true,
                    _ => {}
                }
            }
        }
    }

    if in_string {
        if escaped {
            out.pop();
        }
        out.push('"');
    }

    if let (Some(&closer), Some(&cut)) = (closers.last(), cuts.last()) {
        if !is_complete_member(&out[cut..], closer == '}') {
            out.truncate(cut);
        }
    }

    while let Some(closer) = closers.pop() {
        out.push(closer);
    }

    out
}

/// Whether the tail of an open container ends in a usable member
fn is_complete_member(tail: &str, in_object: bool) -> bool {
    let member = tail.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    if member.is_empty() {
        return true;
    }

    let value = if in_object {
        let Some(after_key) = skip_string(member) else {
            return false;
        };
        let Some(value) = after_key.trim_start().strip_prefix(':') else {
            return false;
        };
        value.trim()
    } else {
        member.trim_end()
    };

    match value.chars().next() {
        None => false,
        Some('"') => skip_string(value).map_or(false, |rest| rest.trim().is_empty()),
        Some('{' | '[') => true,
        Some(_) => matches!(value, "true" | "false" | "null") || value.parse::<f64>().is_ok(),
    }
}

/// The text after a leading string literal
fn skip_string(text: &str) -> Option<&str> {
    let body = text.strip_prefix('"')?;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(&body[idx + 1..]),
            _ => {}
        }
    }
    None
}

fn flush_comma(out: &mut String, pending_comma: &mut bool, pending_space: &mut String) {
    if *pending_comma {
        out.push(',');
        *pending_comma = false;
    }
    out.push_str(pending_space);
    pending_space.clear();
}

/// Turn a parsed object into labels.
///
/// `None` for an object with none of the known keys; it is not a label
/// record.
fn coerce(root: &Map<String, Value>, repaired: bool) -> Option<Decoded> {
    if !KNOWN_KEYS.iter().any(|key| root.contains_key(*key)) {
        return None;
    }

    let mut status = DecodeStatus::Ok;

    let nested = match root.get(VECTOR_KEY) {
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            status = DecodeStatus::Malformed;
            None
        }
        None => None,
    };

    let labels = LabelVector {
        keyword_spam: read_flag(root, nested, &["keyword_spam"], &mut status),
        malicious_links: read_flag(root, nested, &["malicious_links"], &mut status),
        ads: read_flag(root, nested, &["ads"], &mut status),
        wrong_language: read_flag(root, nested, &["wrong_language"], &mut status),
        unreadable: read_flag(root, nested, &["unreadable"], &mut status),
        is_spam: read_flag(root, nested, AGGREGATE_KEYS, &mut status),
        confidence: read_confidence(root, nested, &mut status),
    };

    Some(Decoded {
        labels,
        status,
        repaired,
    })
}

fn read_flag(
    root: &Map<String, Value>,
    nested: Option<&Map<String, Value>>,
    names: &[&str],
    status: &mut DecodeStatus,
) -> bool {
    match lookup(root, nested, names) {
        None => false,
        Some(value) => coerce_flag(value).unwrap_or_else(|| {
            *status = status.downgrade(DecodeStatus::Malformed);
            false
        }),
    }
}

fn read_confidence(
    root: &Map<String, Value>,
    nested: Option<&Map<String, Value>>,
    status: &mut DecodeStatus,
) -> Confidence {
    match lookup(root, nested, CONFIDENCE_KEYS) {
        None => Confidence::MIN,
        Some(value) => coerce_confidence(value).unwrap_or_else(|| {
            *status = status.downgrade(DecodeStatus::Malformed);
            Confidence::MIN
        }),
    }
}

/// Look a field up in the nested vector first, then at the top level
fn lookup<'a>(
    root: &'a Map<String, Value>,
    nested: Option<&'a Map<String, Value>>,
    names: &[&str],
) -> Option<&'a Value> {
    names.iter().find_map(|name| {
        nested
            .and_then(|map| map.get(*name))
            .or_else(|| root.get(*name))
    })
}

/// Interpret a boolean-like token; `None` when the value is not one
pub fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret a confidence score, clamping it into range
pub fn coerce_confidence(value: &Value) -> Option<Confidence> {
    let whole = |v: f64| (v.is_finite() && v.fract() == 0.0).then(|| Confidence::clamped(v as i64));

    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Confidence::clamped)
            .or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .map(Confidence::clamped)
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reply() {
        for raw in ["", "   \n\t"] {
            let decoded = decode(raw);
            assert_eq!(decoded.status, DecodeStatus::Empty);
            assert_eq!(decoded.labels, LabelVector::fallback());
            assert_eq!(decoded.labels.confidence.value(), 1);
        }
    }

    #[test]
    fn test_flat_object_with_missing_fields() {
        let decoded = decode(r#"{"keyword_spam": true, "malicious_links": false, "ads": false}"#);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.labels.keyword_spam);
        assert!(!decoded.labels.malicious_links);
        assert!(!decoded.labels.ads);
        assert!(!decoded.labels.wrong_language);
        assert!(!decoded.labels.unreadable);
        assert_eq!(decoded.labels.confidence, Confidence::MIN);
        assert!(!decoded.repaired);
    }

    #[test]
    fn test_markdown_fenced_reply() {
        let raw = concat!(
            "Here is my analysis:\n```json\n{\n",
            "  \"labels_spam\": 1,\n",
            "  \"labels_spam_vector\": ",
            "{\"keyword_spam\": 0, \"malicious_links\": 0, \"ads\": 1},\n",
            "  \"confidence_score\": 4\n}\n```\nLet me know if you need more."
        );
        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.labels.ads);
        assert!(decoded.labels.is_spam);
        assert!(!decoded.labels.keyword_spam);
        assert_eq!(decoded.labels.confidence.value(), 4);
    }

    #[test]
    fn test_nested_override_fields() {
        let raw = concat!(
            r#"{"labels_spam": 0, "labels_spam_vector": "#,
            r#"{"keyword_spam": 0, "malicious_links": 0, "ads": 0, "wrong_language": 1}, "#,
            r#""confidence_score": 5}"#
        );
        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.labels.wrong_language);
        assert!(!decoded.labels.unreadable);
        assert_eq!(decoded.labels.confidence, Confidence::MAX);
    }

    #[test]
    fn test_boolean_like_tokens() {
        let raw = concat!(
            r#"{"keyword_spam": "Yes", "malicious_links": "no", "#,
            r#""ads": 1.0, "unreadable": "FALSE"}"#
        );
        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.labels.keyword_spam);
        assert!(!decoded.labels.malicious_links);
        assert!(decoded.labels.ads);
        assert!(!decoded.labels.unreadable);
    }

    #[test]
    fn test_non_boolean_value_downgrades_to_malformed() {
        let decoded = decode(r#"{"keyword_spam": "maybe", "ads": true}"#);
        assert_eq!(decoded.status, DecodeStatus::Malformed);
        assert!(!decoded.labels.keyword_spam);
        assert!(decoded.labels.ads);

        let decoded = decode(r#"{"ads": 2}"#);
        assert_eq!(decoded.status, DecodeStatus::Malformed);
        assert!(!decoded.labels.ads);
    }

    #[test]
    fn test_confidence_coercion() {
        assert_eq!(decode(r#"{"confidence_score": "3"}"#).labels.confidence.value(), 3);
        assert_eq!(decode(r#"{"confidence_score": 9}"#).labels.confidence.value(), 5);
        assert_eq!(decode(r#"{"confidence": 0}"#).labels.confidence.value(), 1);
        assert_eq!(decode(r#"{"confidence_score": 4.0}"#).labels.confidence.value(), 4);

        let decoded = decode(r#"{"confidence_score": "high"}"#);
        assert_eq!(decoded.status, DecodeStatus::Malformed);
        assert_eq!(decoded.labels.confidence.value(), 1);
    }

    #[test]
    fn test_no_candidate_is_malformed() {
        for raw in ["I cannot classify this content.", "}}}{", "\u{0}\u{1}garbage\u{fffd}"] {
            let decoded = decode(raw);
            assert_eq!(decoded.status, DecodeStatus::Malformed, "{raw:?}");
            assert_eq!(decoded.labels, LabelVector::fallback());
        }
    }

    #[test]
    fn test_trailing_comma_is_repaired() {
        let decoded = decode(r#"{"keyword_spam": 1, "ads": 0,}"#);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.repaired);
        assert!(decoded.labels.keyword_spam);
    }

    #[test]
    fn test_truncated_reply_is_repaired() {
        let raw =
            r#"Sure! {"labels_spam_vector": {"keyword_spam": 0, "malicious_links": 1, "ads": 0"#;
        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.repaired);
        assert!(decoded.labels.malicious_links);
    }

    #[test]
    fn test_object_without_known_keys_is_malformed() {
        for raw in [r#"{"answer": "spam"}"#, "{}", "Sorry {"] {
            let decoded = decode(raw);
            assert_eq!(decoded.status, DecodeStatus::Malformed, "{raw:?}");
            assert_eq!(decoded.labels, LabelVector::fallback());
        }
    }

    #[test]
    fn test_unrepairable_candidate_is_malformed() {
        let decoded = decode(r#"{"keyword_spam": yes please}"#);
        assert_eq!(decoded.status, DecodeStatus::Malformed);
        assert_eq!(decoded.labels, LabelVector::fallback());
    }

    #[test]
    fn test_non_object_vector_is_malformed_but_top_level_used() {
        let decoded = decode(r#"{"labels_spam_vector": "none", "ads": true}"#);
        assert_eq!(decoded.status, DecodeStatus::Malformed);
        assert!(decoded.labels.ads);
    }

    #[test]
    fn test_extract_prefers_longest_balanced_candidate() {
        let raw = r#"Use {braces} like this: {"ads": 1, "nested": {"x": "}"}} done"#;
        let candidate = extract_candidate(raw).unwrap();
        assert_eq!(candidate.kind, CandidateKind::Balanced);
        assert_eq!(candidate.text, r#"{"ads": 1, "nested": {"x": "}"}}"#);
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let raw = r#"{"note": "a } and a \" and {", "ads": 0}"#;
        let candidate = extract_candidate(raw).unwrap();
        assert_eq!(candidate.text, raw);
    }

    #[test]
    fn test_extract_truncated_candidate() {
        let candidate = extract_candidate(r#"answer: {"ads": "ye"#).unwrap();
        assert_eq!(candidate.kind, CandidateKind::Truncated);
        assert_eq!(candidate.text, r#"{"ads": "ye"#);
        assert!(extract_candidate("no braces here").is_none());
    }

    #[test]
    fn test_repair_closes_strings_and_brackets() {
        assert_eq!(repair(r#"{"a": "x"#), r#"{"a": "x"}"#);
        assert_eq!(repair(r#"{"a": [1, 2,"#), r#"{"a": [1, 2]}"#);
        assert_eq!(repair(r#"{"a": [1, 2}"#), r#"{"a": [1, 2]}"#);
        assert_eq!(repair(r#"{"a": 1,  }"#), r#"{"a": 1  }"#);
        assert_eq!(repair(r#"{"a": "x\"#), r#"{"a": "x"}"#);
    }

    #[test]
    fn test_repair_drops_incomplete_last_member() {
        assert_eq!(repair(r#"{"a": 1, "b":"#), r#"{"a": 1}"#);
        assert_eq!(repair(r#"{"a": 1, "b": "#), r#"{"a": 1}"#);
        assert_eq!(repair(r#"{"a": 1, "b"#), r#"{"a": 1}"#);
        assert_eq!(repair(r#"{"a": tr"#), "{}");
        assert_eq!(repair(r#"{"a": {"b": 1}, "c": {"d"#), r#"{"a": {"b": 1}, "c": {}}"#);
        assert_eq!(repair(r#"{"a": [1, "x"#), r#"{"a": [1, "x"]}"#);
        assert_eq!(repair(r#"{"a": 4"#), r#"{"a": 4}"#);
    }

    const CUT_REPLY_HEAD: &str = concat!(
        r#"{"labels_spam": 1, "#,
        r#""labels_spam_vector": {"keyword_spam": 1, "malicious_links": 0, "ads": 0}"#
    );

    #[test]
    fn test_reply_cut_before_confidence_value() {
        let raw = format!(r#"{CUT_REPLY_HEAD}, "confidence_score": "#);
        let decoded = decode(&raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.repaired);
        assert!(decoded.labels.keyword_spam);
        assert!(decoded.labels.is_spam);
        assert_eq!(decoded.labels.confidence, Confidence::MIN);
    }

    #[test]
    fn test_reply_cut_inside_key() {
        let raw = format!(r#"{CUT_REPLY_HEAD}, "confid"#);
        let decoded = decode(&raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.labels.keyword_spam);
        assert!(decoded.labels.is_spam);
    }

    #[test]
    fn test_stray_open_brace_before_object() {
        let raw = "Classification {pending review:\n{\"ads\": 1}";
        let candidates = scan_candidates(raw);
        assert_eq!(candidates.primary.unwrap().kind, CandidateKind::Truncated);
        assert_eq!(candidates.nested, Some(r#"{"ads": 1}"#));

        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.repaired);
        assert!(decoded.labels.ads);
    }

    #[test]
    fn test_unparseable_outer_object_falls_back_to_nested() {
        let raw = concat!(
            r#"{"note": unsure, "#,
            r#""labels_spam_vector": {"keyword_spam": 0, "malicious_links": 1, "ads": 0}}"#
        );
        let decoded = decode(raw);
        assert_eq!(decoded.status, DecodeStatus::Ok);
        assert!(decoded.repaired);
        assert!(decoded.labels.malicious_links);
    }

    #[test]
    fn test_scan_tracks_longest_nested_object() {
        let raw = r#"{"a": {"b": 1}, "c": {"d": {"e": 22}}}"#;
        let candidates = scan_candidates(raw);
        assert_eq!(candidates.primary.unwrap().text, raw);
        assert_eq!(candidates.nested, Some(r#"{"d": {"e": 22}}"#));
        assert_eq!(scan_candidates(r#"{"a": 1}"#).nested, None);
    }

    #[test]
    fn test_repair_keeps_commas_inside_strings() {
        assert_eq!(repair(r#"{"a": "1,}", "b": 2,}"#), r#"{"a": "1,}", "b": 2}"#);
    }

    #[test]
    fn test_repair_is_deterministic() {
        let input = r#"{"keyword_spam": 1, "labels_spam_vector": {"ads": 0,"#;
        assert_eq!(repair(input), repair(input));
    }
}
