//! User-defined prompt shortcuts with scope-aware name resolution.
//!
//! Users declare short textual commands (`/summarize`, `/review`, ...)
//! that expand into full prompt text before it reaches a downstream
//! text-generation system. Commands live at three visibility tiers
//! (organization-wide, project-scoped, personal; personal ones can be
//! pinned to a single project), names are unique per scope partition, and
//! resolution picks exactly one command per invocation using a fixed
//! priority order.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use prompt_commands::{CommandDraft, CommandService, CommandStore, UserContext};
//! use uuid::Uuid;
//!
//! # fn main() -> prompt_commands::Result<()> {
//! let store = Arc::new(CommandStore::new("/var/lib/myhost/commands".into())?);
//! let service = CommandService::new(store);
//!
//! let user = UserContext::new(Uuid::new_v4(), "Alice");
//! service.create(&CommandDraft::global(
//!     "summarize",
//!     "Please summarize: {input}",
//!     user.id,
//! ))?;
//!
//! let outcome = service.resolve_and_expand("/summarize meeting notes", &user, None);
//! assert!(outcome.expanded);
//! assert_eq!(outcome.text, "Please summarize: meeting notes");
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod context;
pub mod error;
pub mod expansion;
pub mod listing;
pub mod resolver;
pub mod service;

// Re-export commonly used types
pub use command::store::CommandStore;
pub use command::{
    Command, CommandDraft, CommandId, CommandScope, CommandType, Partition, UserScope,
};
pub use context::{
    Clock, FixedClock, ProjectContext, ProjectId, SystemClock, UserContext, UserDirectory, UserId,
};
pub use error::{CommandError, Result, ValidationIssue};
pub use expansion::{expand, ExpansionContext};
pub use listing::{available_commands, editable_by, visible_to, AvailableCommand};
pub use resolver::{parse_invocation, Invocation, ResolveOutcome, COMMAND_PREFIX};
pub use service::CommandService;

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
