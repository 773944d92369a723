//! Command classification: deciding which commands are left untouched.

/// Builtins whose effect never depends on being run from the worktree root.
/// A command consisting of a single plain invocation of one of these is
/// passed through as-is; prefixing a `cd` would be safe but pointless.
const PASSTHROUGH_BUILTINS: &[&str] = &[
    ":", "true", "false", "pwd", "echo", "export", "alias", "unalias", "set", "unset", "readonly",
    "umask", "times", ".",
];

/// Metacharacters that chain or compound commands. Their presence
/// disqualifies the builtin allow-list: `echo hi; rm -rf x` must be
/// rewritten as a whole, never skipped because it happens to start with
/// `echo`.
const CHAIN_METACHARACTERS: [char; 4] = [';', '&', '|', '\n'];

/// Whether a command should be rewritten or passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Leave the command exactly as supplied.
    PassThrough,
    /// Prefix the command with a `cd` into the worktree root.
    Rewrite,
}

/// Classify a raw command string.
///
/// Pass-through applies to empty input, commands already starting with a
/// `cd` token (rewriting would override an explicit directory change), and
/// single plain invocations of the builtin allow-list. This is a check on
/// the leading token of the trimmed string, not a shell parser; anything
/// ambiguous falls through to [`Disposition::Rewrite`].
pub fn classify(command: &str) -> Disposition {
    let trimmed = command.trim();

    let Some(first) = trimmed.split_whitespace().next() else {
        // Empty or whitespace-only
        return Disposition::PassThrough;
    };

    if first == "cd" {
        return Disposition::PassThrough;
    }

    if PASSTHROUGH_BUILTINS.contains(&first) && !trimmed.contains(CHAIN_METACHARACTERS) {
        return Disposition::PassThrough;
    }

    Disposition::Rewrite
}
