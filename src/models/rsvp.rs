//! RSVP model and its submission schema.

use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;

/// A stored RSVP entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub guests: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
}

/// Request body for submitting an RSVP. Guest count arrives as a string
/// from the form select and is coerced during validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRsvp {
    pub full_name: String,
    pub phone: String,
    pub guests: String,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated RSVP submission ready for persistence.
#[derive(Debug, Clone)]
pub struct InsertRsvp {
    pub full_name: String,
    pub phone: String,
    pub guests: i64,
    pub dietary: Option<String>,
    pub message: Option<String>,
}

impl NewRsvp {
    /// Check the submission against the RSVP schema. Returns the coerced
    /// insert form on success, or one message per offending field.
    pub fn validate(&self) -> Result<InsertRsvp, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.full_name.chars().count() < 2 {
            errors.insert("fullName".to_string(), "Name is required".to_string());
        }
        if self.phone.chars().count() < 5 {
            errors.insert("phone".to_string(), "Phone number is required".to_string());
        }

        let guests = if self.guests.is_empty() {
            errors.insert(
                "guests".to_string(),
                "Number of guests is required".to_string(),
            );
            0
        } else {
            match self.guests.trim().parse::<i64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    errors.insert(
                        "guests".to_string(),
                        "Number of guests must be a positive number".to_string(),
                    );
                    0
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(InsertRsvp {
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            guests,
            dietary: self.dietary.clone(),
            message: self.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewRsvp {
        NewRsvp {
            full_name: "Amari Lee".to_string(),
            phone: "5551234567".to_string(),
            guests: "2".to_string(),
            dietary: None,
            message: None,
        }
    }

    #[test]
    fn test_valid_submission_coerces_guests() {
        let insert = valid_form().validate().expect("submission should pass");
        assert_eq!(insert.full_name, "Amari Lee");
        assert_eq!(insert.guests, 2);
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = valid_form();
        form.full_name = "A".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("fullName").unwrap(), "Name is required");
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let form = NewRsvp {
            full_name: String::new(),
            phone: String::new(),
            guests: String::new(),
            dietary: None,
            message: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("fullName"));
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("guests"));
    }

    #[test]
    fn test_non_numeric_guests_rejected() {
        let mut form = valid_form();
        form.guests = "a few".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains_key("guests"));
    }
}
