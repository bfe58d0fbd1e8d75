//! Command entity and validation
//!
//! This module handles:
//! - The persisted `Command` record and its scope variants
//! - Name normalization and field validation on every write
//! - The partition key that scopes name uniqueness

pub mod store;


use crate::context::{ProjectId, UserId};
use crate::error::ValidationIssue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a command
pub type CommandId = Uuid;

/// Maximum length of a command name, in characters
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length of a command description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Visibility tier of a command.
///
/// The derived ordering drives listing sort order; resolution priority is
/// fixed separately in the resolver and is not this ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Global,
    Project,
    User,
}

/// Reach of a `user` command: usable everywhere, or pinned to one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserScope {
    Common,
    ProjectLimited,
}

/// Scope of a command, carrying only the fields legal for that scope.
///
/// A project-scoped command always has a project id and a global one never
/// does, so an invalid combination cannot be constructed. The flat
/// attribute form used on the write path is [`CommandDraft`]; validation
/// converts it into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandScope {
    /// Organization-wide, resolvable by everyone
    Global,
    /// Shared within a single project
    Project { project_id: ProjectId },
    /// Personal, usable by the owner in any context
    UserCommon,
    /// Personal, usable by the owner only inside one project
    UserProject { project_id: ProjectId },
}

impl CommandScope {
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::Global => CommandType::Global,
            Self::Project { .. } => CommandType::Project,
            Self::UserCommon | Self::UserProject { .. } => CommandType::User,
        }
    }

    /// The user scope, when this is a `user` command
    pub fn user_scope(&self) -> Option<UserScope> {
        match self {
            Self::UserCommon => Some(UserScope::Common),
            Self::UserProject { .. } => Some(UserScope::ProjectLimited),
            _ => None,
        }
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::Project { project_id } | Self::UserProject { project_id } => Some(*project_id),
            _ => None,
        }
    }
}

/// A stored command: a shortcut name plus the prompt template it expands to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Unique command identifier, system-assigned
    pub id: CommandId,
    /// Shortcut name, always stored lowercase
    pub name: String,
    /// Prompt template with optional placeholders
    pub prompt: String,
    /// Free-text description shown in listings
    pub description: Option<String>,
    /// Visibility scope
    pub scope: CommandScope,
    /// The user that created and owns the command
    pub owner_user_id: UserId,
    /// When the command was created
    pub created_at: DateTime<Utc>,
    /// When the command was last modified
    pub updated_at: DateTime<Utc>,
}

impl Command {
    /// The uniqueness partition this command's name lives in
    pub fn partition(&self) -> Partition {
        Partition::of(&self.scope, self.owner_user_id)
    }
}

/// The domain a command name must be unique within.
///
/// Two commands may share a name as long as their partitions differ; a
/// duplicate inside one partition is rejected at write time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Partition {
    Global,
    Project {
        project_id: ProjectId,
    },
    UserCommon {
        owner_user_id: UserId,
    },
    UserProject {
        owner_user_id: UserId,
        project_id: ProjectId,
    },
}

impl Partition {
    pub fn of(scope: &CommandScope, owner_user_id: UserId) -> Self {
        match scope {
            CommandScope::Global => Self::Global,
            CommandScope::Project { project_id } => Self::Project {
                project_id: *project_id,
            },
            CommandScope::UserCommon => Self::UserCommon { owner_user_id },
            CommandScope::UserProject { project_id } => Self::UserProject {
                owner_user_id,
                project_id: *project_id,
            },
        }
    }
}

/// Flat attribute set for creating or updating a command.
///
/// This is the portable write-path contract: `command_type`, `user_scope`,
/// and `owner_project_id` arrive as independent fields and validation folds
/// them into a [`CommandScope`], reporting every violated constraint rather
/// than stopping at the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDraft {
    pub name: String,
    pub prompt: String,
    pub description: Option<String>,
    pub command_type: CommandType,
    /// Only meaningful when `command_type` is `User`
    pub user_scope: UserScope,
    pub owner_user_id: UserId,
    pub owner_project_id: Option<ProjectId>,
}

impl CommandDraft {
    /// Draft an organization-wide command
    pub fn global(name: impl Into<String>, prompt: impl Into<String>, owner: UserId) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: None,
            command_type: CommandType::Global,
            user_scope: UserScope::Common,
            owner_user_id: owner,
            owner_project_id: None,
        }
    }

    /// Draft a project-shared command
    pub fn project(
        name: impl Into<String>,
        prompt: impl Into<String>,
        owner: UserId,
        project: ProjectId,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: None,
            command_type: CommandType::Project,
            user_scope: UserScope::Common,
            owner_user_id: owner,
            owner_project_id: Some(project),
        }
    }

    /// Draft a personal command usable in any context
    pub fn user_common(name: impl Into<String>, prompt: impl Into<String>, owner: UserId) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: None,
            command_type: CommandType::User,
            user_scope: UserScope::Common,
            owner_user_id: owner,
            owner_project_id: None,
        }
    }

    /// Draft a personal command pinned to a single project
    pub fn user_project(
        name: impl Into<String>,
        prompt: impl Into<String>,
        owner: UserId,
        project: ProjectId,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            description: None,
            command_type: CommandType::User,
            user_scope: UserScope::ProjectLimited,
            owner_user_id: owner,
            owner_project_id: Some(project),
        }
    }

    /// Attach a description to the draft
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The name as it would be stored: lowercased
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Validate every self-contained constraint, collecting all violations.
    ///
    /// Returns the scope the draft folds into when the type/project
    /// combination is legal. Name uniqueness is not checked here; the store
    /// checks it under its write lock where the check and the write are one
    /// atomic unit.
    pub fn validate_fields(&self) -> (Option<CommandScope>, Vec<ValidationIssue>) {
        let mut issues = Vec::new();

        let name = self.normalized_name();
        if name.trim().is_empty() {
            issues.push(ValidationIssue::NameMissing);
        } else {
            let len = name.chars().count();
            if len > MAX_NAME_LEN {
                issues.push(ValidationIssue::NameTooLong { len });
            }
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                issues.push(ValidationIssue::NameInvalidChars);
            }
        }

        if self.prompt.trim().is_empty() {
            issues.push(ValidationIssue::PromptMissing);
        }

        if let Some(description) = &self.description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                issues.push(ValidationIssue::DescriptionTooLong { len });
            }
        }

        let scope = match (self.command_type, self.user_scope, self.owner_project_id) {
            (CommandType::Global, _, None) => Some(CommandScope::Global),
            (CommandType::Global, _, Some(_)) => {
                issues.push(ValidationIssue::ProjectForbidden);
                None
            }
            (CommandType::Project, _, Some(project_id)) => {
                Some(CommandScope::Project { project_id })
            }
            (CommandType::Project, _, None) => {
                issues.push(ValidationIssue::ProjectRequired);
                None
            }
            (CommandType::User, UserScope::Common, None) => Some(CommandScope::UserCommon),
            (CommandType::User, UserScope::Common, Some(_)) => {
                issues.push(ValidationIssue::ProjectForbidden);
                None
            }
            (CommandType::User, UserScope::ProjectLimited, Some(project_id)) => {
                Some(CommandScope::UserProject { project_id })
            }
            (CommandType::User, UserScope::ProjectLimited, None) => {
                issues.push(ValidationIssue::ProjectRequired);
                None
            }
        };

        (scope, issues)
    }

    /// The partition this draft would occupy, when its scope is legal
    pub fn partition(&self) -> Option<Partition> {
        let (scope, _) = self.validate_fields();
        scope.map(|s| Partition::of(&s, self.owner_user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        Uuid::new_v4()
    }

    #[test]
    fn test_normalized_name_lowercases() {
        let draft = CommandDraft::global("SummARIZE", "Summarize: {input}", owner());
        assert_eq!(draft.normalized_name(), "summarize");
    }

    #[test]
    fn test_valid_drafts_fold_into_scopes() {
        let user = owner();
        let project = Uuid::new_v4();

        let (scope, issues) = CommandDraft::global("a", "p", user).validate_fields();
        assert!(issues.is_empty());
        assert_eq!(scope, Some(CommandScope::Global));

        let (scope, issues) = CommandDraft::project("a", "p", user, project).validate_fields();
        assert!(issues.is_empty());
        assert_eq!(scope, Some(CommandScope::Project { project_id: project }));

        let (scope, issues) = CommandDraft::user_common("a", "p", user).validate_fields();
        assert!(issues.is_empty());
        assert_eq!(scope, Some(CommandScope::UserCommon));

        let (scope, issues) = CommandDraft::user_project("a", "p", user, project).validate_fields();
        assert!(issues.is_empty());
        assert_eq!(
            scope,
            Some(CommandScope::UserProject { project_id: project })
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut draft = CommandDraft::project("bad name!", "", owner(), Uuid::new_v4());
        draft.owner_project_id = None;

        let (scope, issues) = draft.validate_fields();
        assert!(scope.is_none());
        assert!(issues.contains(&ValidationIssue::NameInvalidChars));
        assert!(issues.contains(&ValidationIssue::PromptMissing));
        assert!(issues.contains(&ValidationIssue::ProjectRequired));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_blank_name_reports_missing_only() {
        let draft = CommandDraft::global("   ", "prompt", owner());
        let (_, issues) = draft.validate_fields();
        assert_eq!(issues, vec![ValidationIssue::NameMissing]);
    }

    #[test]
    fn test_name_length_limit() {
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        let draft = CommandDraft::global(long_name, "prompt", owner());
        let (_, issues) = draft.validate_fields();
        assert_eq!(issues, vec![ValidationIssue::NameTooLong { len: 51 }]);

        let max_name = "x".repeat(MAX_NAME_LEN);
        let draft = CommandDraft::global(max_name, "prompt", owner());
        let (_, issues) = draft.validate_fields();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_description_length_limit() {
        let draft = CommandDraft::global("a", "p", owner())
            .with_description("d".repeat(MAX_DESCRIPTION_LEN + 1));
        let (_, issues) = draft.validate_fields();
        assert_eq!(issues, vec![ValidationIssue::DescriptionTooLong { len: 201 }]);
    }

    #[test]
    fn test_project_forbidden_outside_project_scopes() {
        let user = owner();
        let project = Uuid::new_v4();

        let mut draft = CommandDraft::global("a", "p", user);
        draft.owner_project_id = Some(project);
        let (scope, issues) = draft.validate_fields();
        assert!(scope.is_none());
        assert_eq!(issues, vec![ValidationIssue::ProjectForbidden]);

        let mut draft = CommandDraft::user_common("a", "p", user);
        draft.owner_project_id = Some(project);
        let (scope, issues) = draft.validate_fields();
        assert!(scope.is_none());
        assert_eq!(issues, vec![ValidationIssue::ProjectForbidden]);
    }

    #[test]
    fn test_user_project_limited_requires_project() {
        let mut draft = CommandDraft::user_project("a", "p", owner(), Uuid::new_v4());
        draft.owner_project_id = None;
        let (scope, issues) = draft.validate_fields();
        assert!(scope.is_none());
        assert_eq!(issues, vec![ValidationIssue::ProjectRequired]);
    }

    #[test]
    fn test_scope_accessors() {
        let project = Uuid::new_v4();

        assert_eq!(CommandScope::Global.command_type(), CommandType::Global);
        assert_eq!(CommandScope::Global.user_scope(), None);
        assert_eq!(CommandScope::Global.project_id(), None);

        let scope = CommandScope::UserProject { project_id: project };
        assert_eq!(scope.command_type(), CommandType::User);
        assert_eq!(scope.user_scope(), Some(UserScope::ProjectLimited));
        assert_eq!(scope.project_id(), Some(project));
    }

    #[test]
    fn test_partitions_distinguish_owners_and_projects() {
        let user_a = owner();
        let user_b = owner();
        let project = Uuid::new_v4();

        let a = Partition::of(&CommandScope::UserCommon, user_a);
        let b = Partition::of(&CommandScope::UserCommon, user_b);
        assert_ne!(a, b);

        // Owner is irrelevant for shared scopes
        let a = Partition::of(&CommandScope::Project { project_id: project }, user_a);
        let b = Partition::of(&CommandScope::Project { project_id: project }, user_b);
        assert_eq!(a, b);

        assert_eq!(
            Partition::of(&CommandScope::Global, user_a),
            Partition::of(&CommandScope::Global, user_b)
        );
    }
}
