//! Validation outcome

use serde::Serialize;

/// Errors and warnings collected for a layer sequence
///
/// Validity is derived from the error list: a result is valid exactly when
/// it has no errors. Warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Valid result with no messages
    pub fn valid() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check whether an error with exactly this text was reported
    pub fn has_error(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }

    /// Check whether a warning with exactly this text was reported
    pub fn has_warning(&self, message: &str) -> bool {
        self.warnings.iter().any(|w| w == message)
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Generate human-readable summary
    pub fn to_human_summary(&self) -> String {
        let mut lines = Vec::new();
        if self.is_valid {
            lines.push("Model architecture is valid".to_string());
        } else {
            lines.push(format!("Model architecture has {} error(s)", self.errors.len()));
        }
        for error in &self.errors {
            lines.push(format!("  error: {}", error));
        }
        for warning in &self.warnings {
            lines.push(format!("  warning: {}", warning));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_tracks_errors() {
        assert!(ValidationResult::valid().is_valid());
        let result = ValidationResult::new(vec![], vec!["careful".to_string()]);
        assert!(result.is_valid());
        assert!(result.has_warnings());

        let result = ValidationResult::new(vec!["broken".to_string()], vec![]);
        assert!(!result.is_valid());
        assert!(result.has_error("broken"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"isValid": true, "errors": [], "warnings": []})
        );
    }
}
