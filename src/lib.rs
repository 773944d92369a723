//! Worktree-aware command rewriting.
//!
//! `reroot` is a filter a host process invokes once per shell command:
//! given the literal command string, it prints either the command
//! unchanged or a `cd '<worktree root>' && <command>` form when the
//! current directory lies inside a linked git worktree. The filter never
//! fails — every unexpected condition degrades to echoing the input back.

pub mod classify;
pub mod quote;
pub mod rewrite;
pub mod worktree;

pub use classify::{Disposition, classify};
pub use quote::single_quote;
pub use rewrite::rewrite;
pub use worktree::find_worktree_root;
