use super::domain::InquiryInput;

/// Raised when a submission is missing the identity fields needed to reply to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl ValidationError {
    /// Form field the UI should highlight.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => *field,
        }
    }
}

/// Check the identity fields; every other field may be blank.
pub(crate) fn validate_identity(input: &InquiryInput) -> Result<(), ValidationError> {
    if input.contact_name.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "contactName",
        });
    }

    if input.contact_email.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "contactEmail",
        });
    }

    Ok(())
}
