pub mod config;
pub mod error;
pub mod git;
pub mod history;
pub mod policy;
pub mod protocol;
pub mod tagger;
pub mod validator;

pub(crate) mod cli;

pub use cli::HookKind;

/// Run one hook: read JSON from stdin, execute, write JSON to stdout.
///
/// This is the binary entry point. It exists to bridge the binary crate
/// (`main.rs`) to the library without exposing `cli` internals. Callers
/// embedding the hooks should use [`validator::run`], [`tagger::run`] and
/// [`policy::run`] directly.
pub fn run_hook(kind: HookKind, config_path: Option<&std::path::Path>) -> std::process::ExitCode {
    cli::init_tracing();
    cli::hook::run(kind, config_path)
}
