//! Linked-worktree detection.
//!
//! A linked worktree has a `.git` regular file (not a directory) whose
//! single line points at its per-worktree metadata directory under the
//! primary repository's `.git/worktrees/`. The locator walks ancestors of
//! a starting directory and stops at the first `.git` entry of either
//! form, mirroring how git itself resolves repository boundaries.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Outcome of examining one candidate directory during the ancestor walk.
#[derive(Debug)]
enum Step {
    /// The candidate is the root of a linked worktree.
    Found(PathBuf),
    /// The candidate is a repository boundary that is not a linked
    /// worktree: a normal `.git` directory, a submodule pointer, or a
    /// `.git` file that cannot be used. The walk must not continue past it.
    Boundary,
    /// No `.git` entry here; try the parent.
    Ascend,
}

/// Find the root of the linked worktree containing `start`, if any.
///
/// Walks `start` and every ancestor up to the filesystem root. The first
/// `.git` entry encountered decides the result: a `.git` directory marks a
/// normal repository (no rewrite), a `.git` file is inspected as a
/// worktree pointer. Every failure along the way degrades to `None`; the
/// caller treats that as "not a worktree" and leaves the command alone.
pub fn find_worktree_root(start: &Path) -> Option<PathBuf> {
    if !start.is_dir() {
        log::debug!("starting directory {} is not a directory", start.display());
        return None;
    }

    for dir in start.ancestors() {
        match examine(dir) {
            Step::Found(root) => {
                log::debug!("linked worktree root: {}", root.display());
                return Some(root);
            }
            Step::Boundary => return None,
            Step::Ascend => {}
        }
    }

    None
}

fn examine(dir: &Path) -> Step {
    let link = dir.join(".git");

    let Ok(metadata) = link.metadata() else {
        // No .git entry (or it is unreadable) - keep walking up
        return Step::Ascend;
    };

    if metadata.is_dir() {
        log::debug!("{} is a normal repository root", dir.display());
        return Step::Boundary;
    }

    match resolve_gitdir(dir, &link) {
        Ok(gitdir) if is_linked_worktree_gitdir(&gitdir) => Step::Found(dir.to_path_buf()),
        Ok(gitdir) => {
            log::debug!(
                "{} points at {}, which is not a worktree gitdir",
                link.display(),
                gitdir.display()
            );
            Step::Boundary
        }
        Err(err) => {
            log::debug!("{}: {:#}", link.display(), err);
            Step::Boundary
        }
    }
}

/// Resolve the target of a `.git` link file to an absolute directory.
///
/// The file's single line has the form `gitdir: <path>`; a relative path
/// is taken relative to the directory containing the link file.
fn resolve_gitdir(dir: &Path, link: &Path) -> Result<PathBuf> {
    let contents = std::fs::read_to_string(link)
        .with_context(|| format!("failed to read {}", link.display()))?;
    let target = parse_gitdir_line(&contents)
        .with_context(|| format!("malformed gitdir pointer in {}", link.display()))?;

    let target_path = Path::new(target);
    let joined = if target_path.is_absolute() {
        target_path.to_path_buf()
    } else {
        dir.join(target_path)
    };

    // Canonicalization doubles as the existence check: a dangling pointer
    // fails here.
    let resolved = dunce::canonicalize(&joined)
        .with_context(|| format!("gitdir target {} does not resolve", joined.display()))?;
    if !resolved.is_dir() {
        anyhow::bail!("gitdir target {} is not a directory", resolved.display());
    }
    Ok(resolved)
}

/// Extract the target path from the first line of a `.git` link file.
///
/// Accepts `gitdir:<path>` with optional whitespace around the path.
fn parse_gitdir_line(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?;
    let target = line.strip_prefix("gitdir:")?.trim();
    if target.is_empty() { None } else { Some(target) }
}

/// A gitdir belongs to a linked worktree when it lives under a `worktrees`
/// directory (`<primary>/.git/worktrees/<name>`). Submodule gitdirs live
/// under `.git/modules/` and do not qualify.
fn is_linked_worktree_gitdir(gitdir: &Path) -> bool {
    let mut components = gitdir.components().rev();
    // The segment must be interior: `.../worktrees/<name>`
    components.next();
    components.any(|c| matches!(c, Component::Normal(name) if name == "worktrees"))
}
