//! Template expansion
//!
//! This module handles:
//! - Substituting the four supported placeholders into a prompt template
//! - Keeping substituted content inert (no second-pass rewriting)
//!
//! This is a one-shot string rewrite, not a templating language. The
//! template is scanned left to right exactly once; values spliced in are
//! never rescanned, so a placeholder-looking sequence inside the user's
//! input survives verbatim. Unknown `{...}` sequences pass through
//! untouched.

use chrono::{DateTime, Utc};

/// Format for `{datetime}` substitution, locale-independent
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const PLACEHOLDER_INPUT: &str = "{input}";
const PLACEHOLDER_USER_NAME: &str = "{user_name}";
const PLACEHOLDER_PROJECT_NAME: &str = "{project_name}";
const PLACEHOLDER_DATETIME: &str = "{datetime}";

/// Values substituted into a command's prompt template
#[derive(Debug, Clone)]
pub struct ExpansionContext<'a> {
    /// The trailing text after the shortcut name, exactly as typed
    pub input: &'a str,
    /// Display name of the acting user
    pub user_name: &'a str,
    /// Display name of the current project, or empty when none
    pub project_name: &'a str,
    /// Injected timestamp for `{datetime}`
    pub timestamp: DateTime<Utc>,
}

/// Substitute placeholders into `template`, each occurrence exactly once
pub fn expand(template: &str, ctx: &ExpansionContext<'_>) -> String {
    let mut out = String::with_capacity(template.len() + ctx.input.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        if let Some(stripped) = tail.strip_prefix(PLACEHOLDER_INPUT) {
            out.push_str(ctx.input);
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix(PLACEHOLDER_USER_NAME) {
            out.push_str(ctx.user_name);
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix(PLACEHOLDER_PROJECT_NAME) {
            out.push_str(ctx.project_name);
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix(PLACEHOLDER_DATETIME) {
            out.push_str(&ctx.timestamp.format(DATETIME_FORMAT).to_string());
            rest = stripped;
        } else {
            // Not one of ours, emit the brace literally and move on
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
