//! Shared-memory model and its submission schema.

use serde::{Deserialize, Serialize};

use crate::errors::FieldErrors;

/// A stored guest memory. The photo field holds an object URL once
/// persisted server-side, or the submitted data URI in the local cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: i64,
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub created_at: String,
}

/// Request body for sharing a memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemory {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// A validated memory submission ready for persistence.
#[derive(Debug, Clone)]
pub struct InsertMemory {
    pub name: String,
    pub message: String,
    pub photo: Option<String>,
}

impl NewMemory {
    /// Check the submission against the memory schema.
    pub fn validate(&self) -> Result<InsertMemory, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.chars().count() < 2 {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if self.message.is_empty() {
            errors.insert("message".to_string(), "Message is required".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(InsertMemory {
            name: self.name.clone(),
            message: self.message.clone(),
            photo: self.photo.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_memory() {
        let form = NewMemory {
            name: "Priya".to_string(),
            message: "What a night!".to_string(),
            photo: None,
        };
        let insert = form.validate().expect("submission should pass");
        assert_eq!(insert.message, "What a night!");
        assert!(insert.photo.is_none());
    }

    #[test]
    fn test_empty_message_rejected() {
        let form = NewMemory {
            name: "Priya".to_string(),
            message: String::new(),
            photo: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("message").unwrap(), "Message is required");
    }
}
