//! View state domain models.
//!
//! Contains the observable state of the client shell: which view is showing,
//! the theme, and a read-only snapshot handed to front ends.

use crate::upload::StudyConstraints;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The top-level views of the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    /// Landing page, nothing collected yet.
    #[default]
    Landing,
    /// Upload/configure form.
    Configuring,
    /// An analysis request is in flight.
    Analyzing,
    /// A result is displayed, optionally with a topic overlay.
    Result,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Landing => "Landing",
            View::Configuring => "Configuring",
            View::Analyzing => "Analyzing",
            View::Result => "Result",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation theme. Orthogonal to the view state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Read-only picture of the shell at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellSnapshot {
    pub view: View,
    pub theme: Theme,
    pub constraints: StudyConstraints,
    /// File name of the candidate document, if any.
    pub document_name: Option<String>,
    pub submit_enabled: bool,
    /// User-facing notice of the last failed analysis.
    pub failure_notice: Option<String>,
    /// Topic of the open detail overlay.
    pub selected_topic: Option<String>,
    pub has_result: bool,
}
