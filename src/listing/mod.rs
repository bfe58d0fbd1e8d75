//! Command availability listing
//!
//! This module handles:
//! - Enumerating the commands a user/project pair may reference, for
//!   autocomplete suggestions
//! - The visibility and edit-authority predicates display logic consults
//!
//! Unlike resolution, listing never collapses duplicate names across
//! tiers: the UI must show every option the user could type.

use crate::command::store::CommandStore;
use crate::command::{Command, CommandScope};
use crate::context::{ProjectId, UserContext, UserDirectory, UserId};
use serde::Serialize;

/// A listing entry: what autocomplete shows for one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableCommand {
    pub name: String,
    pub description: Option<String>,
}

/// Enumerate the commands the user may reference in the given project
/// context, sorted by `(command_type, name)`. When a prefix is supplied,
/// only names starting with its lowercase form are included.
pub fn available_commands(
    store: &CommandStore,
    user_id: UserId,
    project_id: Option<ProjectId>,
    prefix: Option<&str>,
) -> Vec<AvailableCommand> {
    let mut commands = store.list_for(user_id, project_id);

    if let Some(prefix) = prefix {
        let prefix = prefix.to_lowercase();
        commands.retain(|c| c.name.starts_with(&prefix));
    }

    commands.sort_by(|a, b| {
        (a.scope.command_type(), &a.name).cmp(&(b.scope.command_type(), &b.name))
    });

    commands
        .into_iter()
        .map(|c| AvailableCommand {
            name: c.name,
            description: c.description,
        })
        .collect()
}

/// Whether the user may see the command at all.
///
/// This is a display check, broader than resolution: a project command is
/// visible to every member of its project even when that project is not
/// the user's current context.
pub fn visible_to(command: &Command, user: &UserContext, directory: &dyn UserDirectory) -> bool {
    match &command.scope {
        CommandScope::Global => true,
        CommandScope::Project { project_id } => directory.is_member(&user.id, project_id),
        CommandScope::UserCommon | CommandScope::UserProject { .. } => {
            command.owner_user_id == user.id
        }
    }
}

/// Whether the user may update or delete the command: administrators and
/// the owner only. Gates writes, never resolution.
pub fn editable_by(command: &Command, user: &UserContext) -> bool {
    user.is_admin || command.owner_user_id == user.id
}
