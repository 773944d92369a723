use std::env;
use std::ffi::OsString;

use clap::Parser;
use log::LevelFilter;

use reroot::rewrite;

/// Environment variable enabling diagnostic tracing on stderr.
const DEBUG_ENV_VAR: &str = "REROOT_DEBUG";

/// Values that switch diagnostics on. Anything else, including unset,
/// means off.
const DEBUG_TRUTHY: &[&str] = &["true", "TRUE", "1", "yes", "YES"];

#[derive(Parser)]
#[command(
    name = "reroot",
    about = "Rewrite a shell command to run from the linked worktree root",
    // This binary is a filter: whatever the host forwards must come back
    // out on stdout, so the automatic flags that would intercept `--help`
    // or `--version` are disabled.
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Command words, joined with single spaces into the command to filter
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    command: Vec<OsString>,
}

fn main() {
    init_logging(env::var(DEBUG_ENV_VAR).ok().as_deref());

    let cli = Cli::parse();
    let command = join_command(&cli.command);

    let output = match env::current_dir() {
        Ok(cwd) => rewrite(&cwd, &command),
        Err(err) => {
            // Unreadable cwd: emit the command untouched rather than block it
            log::debug!("cannot determine current directory: {err}");
            command
        }
    };

    println!("{output}");
}

/// Join the process arguments back into the command line the host
/// supplied.
///
/// Mirrors `"$*"`: words separated by single spaces, no re-tokenization.
/// Non-UTF-8 bytes are replaced rather than rejected so the filter never
/// refuses an input.
fn join_command(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn diagnostics_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| DEBUG_TRUTHY.contains(&v))
}

/// Route the log facade to stderr, at debug level when `REROOT_DEBUG` is
/// a recognized truthy value. Tracing must never reach stdout: stdout
/// carries exactly one line, the (possibly rewritten) command.
fn init_logging(debug_value: Option<&str>) {
    let level = if diagnostics_enabled(debug_value) {
        LevelFilter::Debug
    } else {
        LevelFilter::Off
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}
