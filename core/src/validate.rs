use serde::{Deserialize, Serialize};

/// A single rejected form field, reported next to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Local input checks that run before any network call.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Collects field errors in declaration order.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric fields must be at least 1.
    pub fn at_least_one(mut self, field: &str, value: f64, message: &str) -> Self {
        if value.is_nan() || value < 1.0 {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Text fields must contain something other than whitespace.
    pub fn not_blank(mut self, field: &str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_every_field_is_filled() {
        let result = Checks::new()
            .at_least_one("budget", 1.0, "Budget is required.")
            .not_blank("eventType", "Wedding", "Event type is required.")
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn reports_all_failures_in_order() {
        let errors = Checks::new()
            .at_least_one("budget", 0.5, "Budget is required.")
            .not_blank("eventType", "   ", "Event type is required.")
            .at_least_one("numberOfGuests", 12.0, "Number of guests is required.")
            .finish()
            .unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::new("budget", "Budget is required."),
                FieldError::new("eventType", "Event type is required."),
            ]
        );
    }

    #[test]
    fn nan_is_rejected() {
        let errors = Checks::new()
            .at_least_one("budget", f64::NAN, "Budget is required.")
            .finish()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
