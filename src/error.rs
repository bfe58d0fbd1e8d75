use crate::command::CommandId;
use thiserror::Error;

/// A single violated constraint detected while validating a command.
///
/// Create and update collect every violation before failing, so one failed
/// write can carry several of these at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("name is required")]
    NameMissing,

    #[error("name is too long ({len} characters, maximum 50)")]
    NameTooLong { len: usize },

    #[error("name may only contain letters, digits, underscores, and hyphens")]
    NameInvalidChars,

    #[error("name '{name}' is already taken in this scope")]
    NameTaken { name: String },

    #[error("prompt is required")]
    PromptMissing,

    #[error("description is too long ({len} characters, maximum 200)")]
    DescriptionTooLong { len: usize },

    #[error("this scope requires a project")]
    ProjectRequired,

    #[error("this scope does not take a project")]
    ProjectForbidden,
}

/// Comprehensive error type for the prompt-commands core
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("command not found: {0}")]
    NotFound(CommandId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommandError {
    /// Create a validation error from a list of violated constraints
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation(issues)
    }

    /// Create a not-found error for a command id
    pub fn not_found(id: CommandId) -> Self {
        Self::NotFound(id)
    }

    /// The violated constraints, when this is a validation error
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            Self::Validation(issues) => Some(issues),
            _ => None,
        }
    }

    /// Get user-friendly error message suitable for field-level display
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(issues) => {
                format!("The command could not be saved: {}", join_issues(issues))
            }
            Self::NotFound(id) => {
                format!("Command '{}' no longer exists. It may have been deleted.", id)
            }
            _ => self.to_string(),
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenient result type for the prompt-commands core
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_validation_error_lists_every_issue() {
        let err = CommandError::validation(vec![
            ValidationIssue::NameTaken {
                name: "summarize".to_string(),
            },
            ValidationIssue::PromptMissing,
        ]);

        let message = err.to_string();
        assert!(message.contains("'summarize' is already taken"));
        assert!(message.contains("prompt is required"));

        let issues = err.issues().unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_not_found_user_message() {
        let id = Uuid::new_v4();
        let err = CommandError::not_found(id);

        assert!(err.issues().is_none());
        assert!(err.user_message().contains(&id.to_string()));
        assert!(err.user_message().contains("no longer exists"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CommandError = io_error.into();
        match err {
            CommandError::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }
}
