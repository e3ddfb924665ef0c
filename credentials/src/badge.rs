//! Badge records.

use crate::error::CredentialError;
use serde::{Deserialize, Serialize};
use yideng_store::RecordId;
use yideng_types::{Address, Timestamp};

pub type TokenId = RecordId;

/// What a badge attests to. Fixed at mint time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BadgeMetadata {
    pub course_name: String,
    pub instructor_name: String,
    pub recipient_name: String,
    pub hours_completed: u32,
}

impl BadgeMetadata {
    pub fn new(
        course_name: impl Into<String>,
        instructor_name: impl Into<String>,
        recipient_name: impl Into<String>,
        hours_completed: u32,
    ) -> Self {
        Self {
            course_name: course_name.into(),
            instructor_name: instructor_name.into(),
            recipient_name: recipient_name.into(),
            hours_completed,
        }
    }

    /// Reject blank names and zero hours.
    pub fn validate(&self) -> Result<(), CredentialError> {
        let fields = [
            ("course name", &self.course_name),
            ("instructor name", &self.instructor_name),
            ("recipient name", &self.recipient_name),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(CredentialError::InvalidInput(format!(
                    "{label} must not be empty"
                )));
            }
        }
        if self.hours_completed == 0 {
            return Err(CredentialError::InvalidInput(
                "hours completed must be at least one".into(),
            ));
        }
        Ok(())
    }
}

/// A minted badge. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub token_id: TokenId,
    pub owner: Address,
    pub metadata: BadgeMetadata,
    pub issued_at: Timestamp,
}
