#![forbid(unsafe_code)]

//! Walkthrough steps and the declarative step source.
//!
//! A step source is a JSON array of records:
//!
//! ```json
//! [
//!   { "id": "step_profile", "title": "Profile", "description": "...", "targetKey": "profile" },
//!   { "id": "step_actions", "title": "Actions", "description": "...", "targetKey": "actions",
//!     "buttonText": "Let's go!" }
//! ]
//! ```
//!
//! Unknown fields are ignored. A source that cannot be read, does not parse,
//! is empty, repeats an id, or names an empty target key is rejected as a
//! whole; [`load_or_fallback`] then substitutes the caller's list.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One unit of the walkthrough sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique identifier within the list.
    pub id: String,
    /// Card heading.
    pub title: String,
    /// Card body copy.
    pub description: String,
    /// Registry key of the highlighted element(s).
    pub target_key: String,
    /// Label for the finish control when this step is the last one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

impl Step {
    /// Create a step without a custom button label.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        target_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            target_key: target_key.into(),
            button_text: None,
        }
    }

    /// Set the finish-control label.
    #[must_use]
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(text.into());
        self
    }
}

/// An immutable, shareable, ordered step sequence.
///
/// Cloning is O(1); the steps themselves are never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepList {
    steps: Arc<[Step]>,
}

impl StepList {
    pub fn new(steps: impl Into<Vec<Step>>) -> Self {
        Self {
            steps: Arc::from(steps.into()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Position of the step with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Check the list-level invariants of a declared source.
    pub fn validate(&self) -> Result<(), StepSourceError> {
        if self.steps.is_empty() {
            return Err(StepSourceError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                return Err(StepSourceError::MissingField { index, field: "id" });
            }
            if step.target_key.trim().is_empty() {
                return Err(StepSourceError::MissingField {
                    index,
                    field: "targetKey",
                });
            }
            if !seen.insert(step.id.as_str()) {
                return Err(StepSourceError::DuplicateId(step.id.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Step>> for StepList {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a StepList {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Why a declared step source was rejected.
#[derive(Debug, thiserror::Error)]
pub enum StepSourceError {
    #[error("failed to read step source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse step source: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step source declares no steps")]
    Empty,
    #[error("duplicate step id {0:?}")]
    DuplicateId(String),
    #[error("step {index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Where a loaded step list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSourceOrigin {
    /// Parsed from the declarative source.
    Declared,
    /// The caller-supplied fallback list.
    Fallback,
}

impl fmt::Display for StepSourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => f.write_str("declared"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Parse and validate a JSON step source.
pub fn parse_steps(json: &str) -> Result<StepList, StepSourceError> {
    let steps: Vec<Step> = serde_json::from_str(json)?;
    let list = StepList::new(steps);
    list.validate()?;
    Ok(list)
}

/// Read, parse, and validate a JSON step source file.
pub fn load_steps(path: impl AsRef<Path>) -> Result<StepList, StepSourceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| StepSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let list = parse_steps(&text)?;
    debug!(path = %path.display(), steps = list.len(), "loaded step source");
    Ok(list)
}

/// Load `path`, substituting `fallback` on any failure.
///
/// The failure is logged at `warn` and otherwise swallowed; the returned
/// origin tells the host which list is in use.
pub fn load_or_fallback(
    path: impl AsRef<Path>,
    fallback: impl Into<StepList>,
) -> (StepList, StepSourceOrigin) {
    let path = path.as_ref();
    match load_steps(path) {
        Ok(list) => (list, StepSourceOrigin::Declared),
        Err(err) => {
            let fallback = fallback.into();
            warn!(
                path = %path.display(),
                error = %err,
                fallback_steps = fallback.len(),
                "step source unavailable, using fallback steps"
            );
            (fallback, StepSourceOrigin::Fallback)
        }
    }
}

/// [`load_or_fallback`] for an in-memory source (e.g. an embedded asset).
pub fn parse_or_fallback(
    json: &str,
    fallback: impl Into<StepList>,
) -> (StepList, StepSourceOrigin) {
    match parse_steps(json) {
        Ok(list) => (list, StepSourceOrigin::Declared),
        Err(err) => {
            let fallback = fallback.into();
            warn!(
                error = %err,
                fallback_steps = fallback.len(),
                "step source rejected, using fallback steps"
            );
            (fallback, StepSourceOrigin::Fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Step> {
        vec![
            Step::new("a", "A", "first", "profile"),
            Step::new("b", "B", "second", "balance"),
            Step::new("c", "C", "third", "actions").button_text("Go"),
        ]
    }

    // ── Parsing ──────────────────────────────────────────────────────────

    #[test]
    fn parses_camel_case_records() {
        let json = r#"[
            {"id":"s1","title":"T","description":"D","targetKey":"k1"},
            {"id":"s2","title":"T2","description":"D2","targetKey":"k2","buttonText":"Done!"}
        ]"#;
        let list = parse_steps(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().target_key, "k1");
        assert_eq!(list.get(1).unwrap().button_text.as_deref(), Some("Done!"));
    }

    #[test]
    fn ignores_unknown_fields() {
        let json = r#"[{"id":"s1","title":"T","description":"D","targetKey":"k","extra":42}]"#;
        assert!(parse_steps(json).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_steps("[{").unwrap_err();
        assert!(matches!(err, StepSourceError::Parse(_)));
    }

    #[test]
    fn rejects_missing_required_field() {
        let json = r#"[{"id":"s1","title":"T","targetKey":"k"}]"#;
        assert!(matches!(
            parse_steps(json).unwrap_err(),
            StepSourceError::Parse(_)
        ));
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            parse_steps("[]").unwrap_err(),
            StepSourceError::Empty
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"id":"s","title":"T","description":"D","targetKey":"k1"},
            {"id":"s","title":"T","description":"D","targetKey":"k2"}
        ]"#;
        match parse_steps(json).unwrap_err() {
            StepSourceError::DuplicateId(id) => assert_eq!(id, "s"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_blank_target_key() {
        let json = r#"[{"id":"s","title":"T","description":"D","targetKey":"  "}]"#;
        assert!(matches!(
            parse_steps(json).unwrap_err(),
            StepSourceError::MissingField {
                index: 0,
                field: "targetKey"
            }
        ));
    }

    // ── Fallback ─────────────────────────────────────────────────────────

    #[test]
    fn parse_or_fallback_uses_fallback_on_garbage() {
        let (list, origin) = parse_or_fallback("not json", three());
        assert_eq!(origin, StepSourceOrigin::Fallback);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn load_or_fallback_missing_file() {
        let (list, origin) = load_or_fallback("/definitely/not/here.json", three());
        assert_eq!(origin, StepSourceOrigin::Fallback);
        assert_eq!(list.as_slice(), three().as_slice());
    }

    // ── StepList ─────────────────────────────────────────────────────────

    #[test]
    fn step_list_clone_shares_storage() {
        let list = StepList::new(three());
        let copy = list.clone();
        assert!(std::ptr::eq(list.as_slice(), copy.as_slice()));
    }

    #[test]
    fn position_by_id() {
        let list = StepList::new(three());
        assert_eq!(list.position("b"), Some(1));
        assert_eq!(list.position("zzz"), None);
    }

    #[test]
    fn serializes_without_absent_button_text() {
        let json = serde_json::to_string(&Step::new("a", "A", "d", "k")).unwrap();
        assert!(!json.contains("buttonText"));
        assert!(json.contains("\"targetKey\":\"k\""));
    }
}
