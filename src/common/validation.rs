// Common validation types and traits

use super::error::FieldErrors;

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Groups messages by field, preserving the order they were added in
    pub fn into_field_errors(self) -> FieldErrors {
        let mut fields = FieldErrors::new();
        for error in self.errors {
            fields.entry(error.field).or_default().push(error.message);
        }
        fields
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_field_errors_grouped() {
        let mut result = ValidationResult::new();
        result.add_error("name", "first");
        result.add_error("country", "bad");
        result.add_error("name", "second");

        assert!(!result.is_valid);
        assert!(result.has_error("country"));

        let fields = result.into_field_errors();
        assert_eq!(fields["name"], vec!["first".to_string(), "second".to_string()]);
        assert_eq!(fields["country"], vec!["bad".to_string()]);
    }
}
