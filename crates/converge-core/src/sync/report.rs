//! Aggregated outcome of an import.

use serde::{Deserialize, Serialize};

/// Report from an import operation
///
/// Built fresh for every call and appended to as each entity is processed.
/// `success` turns false as soon as any error is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Whether every entity was applied without error
    pub success: bool,
    /// Lifecycle operations performed, in order
    pub actions: Vec<String>,
    /// Per-entity errors, in order
    pub errors: Vec<String>,
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportReport {
    /// Create an empty, successful report
    pub fn new() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record an action
    pub fn add_action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }

    /// Record an error and mark the report as failed
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.success = false;
    }
}

/// Options for import operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// If true, decide every operation against live state but perform none.
    /// Actions will be prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_successful() {
        let report = ImportReport::new();
        assert!(report.success);
        assert!(report.actions.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_add_error_marks_failure() {
        let mut report = ImportReport::new();
        report.add_action("Installed plugin seo");
        report.add_error("Plugin ghost could not be found");

        assert!(!report.success);
        assert_eq!(report.actions.len(), 1);
        assert_eq!(report.errors, vec!["Plugin ghost could not be found"]);
    }
}
