//! Validation result
//!
//! Aggregate-level validation collects every violation rather than stopping
//! at the first one, so a caller gets the complete picture in one response.

use super::DomainError;

/// Outcome of validating a whole aggregate
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a violation
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All accumulated violations, in the order they were recorded
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Convert into a `Result`, surfacing the accumulated violations as a
    /// single [`DomainError::ValidationFailed`]
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed {
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_accumulates_all_errors_in_order() {
        let mut result = ValidationResult::new();
        result.add_error("first");
        result.add_error("second");

        assert!(!result.is_valid());
        assert_eq!(result.errors(), &["first", "second"]);

        match result.into_result() {
            Err(DomainError::ValidationFailed { errors }) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }
}
