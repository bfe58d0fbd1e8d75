//! The external interface of the core.
//!
//! `CommandService` wires the store, resolver, expander, and lister
//! together behind the three entry points the host request layer calls:
//! message resolution, autocomplete listing, and command management.

use crate::command::store::CommandStore;
use crate::command::{Command, CommandDraft, CommandId};
use crate::context::{Clock, ProjectContext, SystemClock, UserContext};
use crate::error::Result;
use crate::listing::{self, AvailableCommand};
use crate::resolver::{self, ResolveOutcome};
use std::sync::Arc;

/// Facade over the command store with an injected clock
pub struct CommandService {
    store: Arc<CommandStore>,
    clock: Arc<dyn Clock>,
}

impl CommandService {
    /// Create a service on the wall clock
    pub fn new(store: Arc<CommandStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a service with an explicit time source
    pub fn with_clock(store: Arc<CommandStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The underlying store, for callers that need direct lookups
    pub fn store(&self) -> &CommandStore {
        &self.store
    }

    /// Create a command from host-supplied attributes
    pub fn create(&self, draft: &CommandDraft) -> Result<Command> {
        self.store.insert(draft)
    }

    /// Replace a command's attributes
    pub fn update(&self, id: CommandId, draft: &CommandDraft) -> Result<Command> {
        self.store.update(id, draft)
    }

    /// Delete a command
    pub fn delete(&self, id: CommandId) -> Result<()> {
        self.store.delete(id)
    }

    /// Run a raw message through detection, resolution, and expansion.
    /// Never fails: non-commands and unmatched shortcuts pass through with
    /// `expanded: false`.
    pub fn resolve_and_expand(
        &self,
        raw_text: &str,
        user: &UserContext,
        project: Option<&ProjectContext>,
    ) -> ResolveOutcome {
        resolver::resolve_and_expand(&self.store, raw_text, user, project, self.clock.as_ref())
    }

    /// Enumerate the commands the user may reference, for autocomplete
    pub fn list_available(
        &self,
        user: &UserContext,
        project: Option<&ProjectContext>,
        prefix: Option<&str>,
    ) -> Vec<AvailableCommand> {
        listing::available_commands(&self.store, user.id, project.map(|p| p.id), prefix)
    }
}

impl std::fmt::Debug for CommandService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandService")
            .field("store", &self.store)
            .finish()
    }
}
