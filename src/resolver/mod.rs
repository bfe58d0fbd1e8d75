//! Shortcut detection and priority resolution
//!
//! This module handles:
//! - Deciding whether a raw message is a command invocation at all
//! - Splitting the shortcut name from its trailing input
//! - Selecting exactly one command across the four visibility tiers
//! - Expanding the match into final prompt text
//!
//! A miss is a normal outcome, not an error: most input is ordinary text
//! and passes through unchanged.


use crate::command::store::CommandStore;
use crate::command::{Command, CommandId, Partition};
use crate::context::{Clock, ProjectContext, ProjectId, UserContext, UserId};
use crate::expansion::{expand, ExpansionContext};
use tracing::debug;

/// Character a message must start with (after leading whitespace) to be
/// treated as a command invocation
pub const COMMAND_PREFIX: char = '/';

/// A detected invocation: the case-folded shortcut name and its raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Shortcut name, lowercased for lookup
    pub name: String,
    /// Everything after the name, exactly as typed (one separator consumed)
    pub input: String,
}

/// Parse a raw message into an invocation, or `None` when the message is
/// not a command at all.
///
/// Leading whitespace is ignored for detection. The name runs from the
/// prefix character to the first whitespace; the single separator character
/// is consumed and the remainder, newlines included, becomes the input.
pub fn parse_invocation(raw: &str) -> Option<Invocation> {
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix(COMMAND_PREFIX)?;

    let (name, input) = body
        .split_once(|c: char| c.is_whitespace())
        .unwrap_or((body, ""));

    Some(Invocation {
        name: name.to_lowercase(),
        input: input.to_string(),
    })
}

/// Look up a shortcut name across the four tiers in fixed priority order:
/// the caller's project-limited command, their common command, the current
/// project's command, then the global one. The first hit wins; tiers are
/// never merged or scored.
pub fn lookup(
    store: &CommandStore,
    name: &str,
    user_id: UserId,
    project_id: Option<ProjectId>,
) -> Option<Command> {
    if let Some(project_id) = project_id {
        let partition = Partition::UserProject {
            owner_user_id: user_id,
            project_id,
        };
        if let Some(command) = store.find_by_scope(&partition, name) {
            return Some(command);
        }
    }

    let partition = Partition::UserCommon {
        owner_user_id: user_id,
    };
    if let Some(command) = store.find_by_scope(&partition, name) {
        return Some(command);
    }

    if let Some(project_id) = project_id {
        if let Some(command) = store.find_by_scope(&Partition::Project { project_id }, name) {
            return Some(command);
        }
    }

    store.find_by_scope(&Partition::Global, name)
}

/// Result of running a message through the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Whether a command matched and expansion happened
    pub expanded: bool,
    /// The expanded prompt on a hit, the original message otherwise
    pub text: String,
    /// Id of the matched command, on a hit
    pub matched_command_id: Option<CommandId>,
}

impl ResolveOutcome {
    fn pass_through(raw: &str) -> Self {
        Self {
            expanded: false,
            text: raw.to_string(),
            matched_command_id: None,
        }
    }
}

/// Detect, resolve, and expand a raw message in one step.
///
/// Messages that are not invocations, and invocations no tier matches,
/// come back unchanged with `expanded: false`.
pub fn resolve_and_expand(
    store: &CommandStore,
    raw_text: &str,
    user: &UserContext,
    project: Option<&ProjectContext>,
    clock: &dyn Clock,
) -> ResolveOutcome {
    let Some(invocation) = parse_invocation(raw_text) else {
        return ResolveOutcome::pass_through(raw_text);
    };

    let project_id = project.map(|p| p.id);
    let Some(command) = lookup(store, &invocation.name, user.id, project_id) else {
        debug!(name = %invocation.name, "no command matched");
        return ResolveOutcome::pass_through(raw_text);
    };

    debug!(name = %invocation.name, id = %command.id, "command matched");
    let text = expand(
        &command.prompt,
        &ExpansionContext {
            input: &invocation.input,
            user_name: &user.display_name,
            project_name: project.map(|p| p.display_name.as_str()).unwrap_or(""),
            timestamp: clock.now(),
        },
    );

    ResolveOutcome {
        expanded: true,
        text,
        matched_command_id: Some(command.id),
    }
}
