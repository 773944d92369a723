//! Orchestration: rewriting a command to run from the worktree root.

use std::path::Path;

use crate::classify::{Disposition, classify};
use crate::quote::single_quote;
use crate::worktree::find_worktree_root;

/// Rewrite `command` so it executes from the linked worktree containing
/// `cwd`, or return it unchanged when no rewrite applies.
///
/// This function is total: any uncertainty (not inside a worktree,
/// unreadable filesystem state, pass-through command) results in the
/// original string. The return value is the single line the host executes
/// in place of `command`.
pub fn rewrite(cwd: &Path, command: &str) -> String {
    let Some(root) = find_worktree_root(cwd) else {
        log::debug!("{} is not inside a linked worktree", cwd.display());
        return command.to_string();
    };

    if classify(command) == Disposition::PassThrough {
        log::debug!("command passes through unmodified: {command:?}");
        return command.to_string();
    }

    let quoted_root = single_quote(&root.to_string_lossy());

    // A trailing lone `&` must background the whole compound command, not
    // just the `cd`.
    let trimmed = command.trim_end();
    if let Some(body) = trimmed.strip_suffix('&') {
        if !body.ends_with('&') {
            return format!("cd {quoted_root} && {} &", body.trim_end());
        }
    }

    format!("cd {quoted_root} && {trimmed}")
}
