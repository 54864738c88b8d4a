//! Contact form intake
//!
//! Messages are stored and never served back over HTTP.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A stored contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a string")]
    NotString(&'static str),
    #[error("{0} must not be empty")]
    Blank(&'static str),
    #[error("email must be a valid address")]
    InvalidEmail,
}

/// A validated contact submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewContact {
    pub fn from_json(body: &Value) -> Result<Self, ContactError> {
        let obj = body.as_object().ok_or(ContactError::NotAnObject)?;
        let field = |key: &'static str| -> Result<String, ContactError> {
            match obj.get(key) {
                None | Some(Value::Null) => Err(ContactError::Missing(key)),
                Some(Value::String(s)) if s.trim().is_empty() => Err(ContactError::Blank(key)),
                Some(Value::String(s)) => Ok(s.trim().to_string()),
                Some(_) => Err(ContactError::NotString(key)),
            }
        };

        let name = field("name")?;
        let email = field("email")?;
        let message = field("message")?;

        // Loose check; a real address is confirmed by replying to it
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail),
        }

        Ok(Self {
            name,
            email,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_contact() {
        let contact = NewContact::from_json(&json!({
            "name": " Grace ",
            "email": "grace@example.com",
            "message": "Hello there",
        }))
        .unwrap();
        assert_eq!(contact.name, "Grace");
        assert_eq!(contact.email, "grace@example.com");
    }

    #[test]
    fn test_invalid_contacts() {
        let cases = [
            (json!("hi"), ContactError::NotAnObject),
            (
                json!({"email": "a@b", "message": "m"}),
                ContactError::Missing("name"),
            ),
            (
                json!({"name": "  ", "email": "a@b", "message": "m"}),
                ContactError::Blank("name"),
            ),
            (
                json!({"name": "n", "email": 5, "message": "m"}),
                ContactError::NotString("email"),
            ),
            (
                json!({"name": "n", "email": "nobody", "message": "m"}),
                ContactError::InvalidEmail,
            ),
            (
                json!({"name": "n", "email": "@b", "message": "m"}),
                ContactError::InvalidEmail,
            ),
            (
                json!({"name": "n", "email": "a@b"}),
                ContactError::Missing("message"),
            ),
        ];
        for (body, expected) in cases {
            assert_eq!(NewContact::from_json(&body), Err(expected), "body {body}");
        }
    }
}
