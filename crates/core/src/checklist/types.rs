//! Checklist session types.

use serde::{Deserialize, Serialize};

/// One closing task as tracked during a form session.
///
/// Created from the catalog at session start, mutated by user interaction
/// (toggle done, append an uploaded photo name), and discarded after
/// submission - nothing is persisted beyond the generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Task description shown to the employee.
    pub text: String,
    /// Whether this task requires photo evidence.
    pub require_image: bool,
    /// Whether the employee marked the task done.
    #[serde(default)]
    pub done: bool,
    /// File names of photos uploaded for this task, in upload order.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ChecklistItem {
    /// Create an unchecked item with no photos.
    #[must_use]
    pub fn new(text: impl Into<String>, require_image: bool) -> Self {
        Self {
            text: text.into(),
            require_image,
            done: false,
            images: Vec::new(),
        }
    }
}
