//! Durable command storage
//!
//! This module handles:
//! - Persisting commands as one JSON file per record
//! - Enforcing partitioned name uniqueness at write time
//! - The exact-match and enumeration lookups the resolver and lister use
//!
//! All mutating operations serialize the uniqueness check and the write
//! under one write lock, so two concurrent inserts of the same name into
//! the same partition cannot both succeed.

use super::{Command, CommandDraft, CommandId, CommandScope, Partition};
use crate::context::{ProjectId, UserId};
use crate::error::{CommandError, Result, ValidationIssue};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Command store with persistent storage and an in-memory working set
pub struct CommandStore {
    /// Directory where command data is stored
    data_dir: PathBuf,
    /// All commands, keyed by id
    commands: RwLock<HashMap<CommandId, Command>>,
}

impl CommandStore {
    /// Create a new command store, loading any commands already on disk
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let commands_dir = data_dir.join("commands");
        if !commands_dir.exists() {
            std::fs::create_dir_all(&commands_dir)?;
        }

        let store = Self {
            data_dir,
            commands: RwLock::new(HashMap::new()),
        };
        store.load_commands()?;

        Ok(store)
    }

    /// Validate and persist a new command.
    ///
    /// Fails with `CommandError::Validation` carrying every violated
    /// constraint, including a name collision inside the draft's partition.
    pub fn insert(&self, draft: &CommandDraft) -> Result<Command> {
        let mut commands = self.commands.write();
        let (scope, name) = self.validate(draft, None, &commands)?;

        let now = Utc::now();
        let command = Command {
            id: Uuid::new_v4(),
            name,
            prompt: draft.prompt.clone(),
            description: draft.description.clone(),
            scope,
            owner_user_id: draft.owner_user_id,
            created_at: now,
            updated_at: now,
        };

        self.save_command(&command)?;
        debug!(id = %command.id, name = %command.name, "command inserted");
        commands.insert(command.id, command.clone());

        Ok(command)
    }

    /// Replace a command's attributes, re-validating the full resulting
    /// record. The record's own id is excluded from the uniqueness check so
    /// saving a command under its existing name is not a collision.
    pub fn update(&self, id: CommandId, draft: &CommandDraft) -> Result<Command> {
        let mut commands = self.commands.write();
        let existing = commands.get(&id).ok_or(CommandError::NotFound(id))?;
        let created_at = existing.created_at;

        let (scope, name) = self.validate(draft, Some(id), &commands)?;

        let command = Command {
            id,
            name,
            prompt: draft.prompt.clone(),
            description: draft.description.clone(),
            scope,
            owner_user_id: draft.owner_user_id,
            created_at,
            updated_at: Utc::now(),
        };

        self.save_command(&command)?;
        debug!(id = %command.id, name = %command.name, "command updated");
        commands.insert(id, command.clone());

        Ok(command)
    }

    /// Remove a command. Deleting an id that does not exist is an error,
    /// including a repeat delete of an already-deleted id.
    pub fn delete(&self, id: CommandId) -> Result<()> {
        let mut commands = self.commands.write();
        let command = commands.remove(&id).ok_or(CommandError::NotFound(id))?;

        let path = self.command_file_path(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        debug!(id = %id, name = %command.name, "command deleted");

        Ok(())
    }

    /// Get a command by id
    pub fn get(&self, id: CommandId) -> Option<Command> {
        self.commands.read().get(&id).cloned()
    }

    /// Exact lookup of a name inside one partition.
    ///
    /// The name is case-folded before comparison; stored names are already
    /// lowercase.
    pub fn find_by_scope(&self, partition: &Partition, name: &str) -> Option<Command> {
        let name = name.to_lowercase();
        self.commands
            .read()
            .values()
            .find(|c| c.name == name && c.partition() == *partition)
            .cloned()
    }

    /// Every command the given user/project combination may resolve or
    /// enumerate: global, the project's (when one is in context), the
    /// user's common, and the user's project-limited for that project.
    pub fn list_for(&self, user_id: UserId, project_id: Option<ProjectId>) -> Vec<Command> {
        self.commands
            .read()
            .values()
            .filter(|c| match &c.scope {
                CommandScope::Global => true,
                CommandScope::Project { project_id: p } => Some(*p) == project_id,
                CommandScope::UserCommon => c.owner_user_id == user_id,
                CommandScope::UserProject { project_id: p } => {
                    c.owner_user_id == user_id && Some(*p) == project_id
                }
            })
            .cloned()
            .collect()
    }

    /// Number of stored commands
    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    /// Full validation of a draft against the current records, collecting
    /// every violated constraint. Must be called with the write lock held
    /// so the uniqueness verdict stays true until the write lands.
    fn validate(
        &self,
        draft: &CommandDraft,
        exclude: Option<CommandId>,
        commands: &HashMap<CommandId, Command>,
    ) -> Result<(CommandScope, String)> {
        let (scope, mut issues) = draft.validate_fields();
        let name = draft.normalized_name();

        if let Some(scope) = &scope {
            if !name.is_empty() {
                let partition = Partition::of(scope, draft.owner_user_id);
                let taken = commands.values().any(|c| {
                    Some(c.id) != exclude && c.name == name && c.partition() == partition
                });
                if taken {
                    issues.push(ValidationIssue::NameTaken { name: name.clone() });
                }
            }
        }

        match scope {
            Some(scope) if issues.is_empty() => Ok((scope, name)),
            _ => Err(CommandError::Validation(issues)),
        }
    }

    /// Load all commands from disk
    fn load_commands(&self) -> Result<()> {
        let commands_dir = self.data_dir.join("commands");
        let mut commands = self.commands.write();

        for entry in std::fs::read_dir(&commands_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match Self::load_command_from_file(&path) {
                    Ok(command) => {
                        commands.insert(command.id, command);
                    }
                    Err(error) => {
                        warn!(path = %path.display(), %error, "skipping unreadable command record");
                    }
                }
            }
        }

        Ok(())
    }

    fn load_command_from_file(path: &Path) -> Result<Command> {
        let content = std::fs::read_to_string(path)?;
        let command: Command = serde_json::from_str(&content)?;
        Ok(command)
    }

    fn save_command(&self, command: &Command) -> Result<()> {
        let path = self.command_file_path(command.id);
        let content = serde_json::to_string_pretty(command)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn command_file_path(&self, id: CommandId) -> PathBuf {
        self.data_dir.join("commands").join(format!("{}.json", id))
    }
}

impl std::fmt::Debug for CommandStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandStore")
            .field("data_dir", &self.data_dir)
            .field("commands", &self.commands.read().len())
            .finish()
    }
}
