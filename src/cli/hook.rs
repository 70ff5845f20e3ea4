use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::ExitCode;

use crate::config::Defaults;
use crate::error::HookError;
use crate::git::{Git, GitCommand};
use crate::protocol::{HookRequest, HookResponse};
use crate::{policy, tagger, validator};

use super::HookKind;

/// Execute one hook invocation: read JSON from stdin, run the workflow, write
/// exactly one JSON line to stdout, and map the outcome to the exit code.
///
/// Every failure, including a panic inside a workflow, becomes a failure
/// response; nothing else is written to stdout.
pub fn run(kind: HookKind, config_path: Option<&Path>) -> ExitCode {
    panic::set_hook(Box::new(|info| tracing::error!("panic: {info}")));

    let response = respond(kind, config_path, &GitCommand::new(), || {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    });
    output_json(&response);
    ExitCode::from(response.exit_code())
}

/// Produce the response for one invocation. Never panics.
pub(crate) fn respond<F>(
    kind: HookKind,
    config_path: Option<&Path>,
    git: &dyn Git,
    read_input: F,
) -> HookResponse
where
    F: FnOnce() -> std::io::Result<String>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        execute(kind, config_path, git, read_input)
    }));
    match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::debug!(hook = ?kind, kind = ?err.kind(), "hook failed: {err}");
            err.into_response()
        }
        Err(payload) => HookError::unexpected(panic_message(payload.as_ref())).into_response(),
    }
}

fn execute<F>(
    kind: HookKind,
    config_path: Option<&Path>,
    git: &dyn Git,
    read_input: F,
) -> Result<HookResponse, HookError>
where
    F: FnOnce() -> std::io::Result<String>,
{
    let raw = read_input()
        .map_err(|e| HookError::unexpected(format!("failed to read stdin: {e}")))?;
    let request = HookRequest::parse(&raw)?;
    check_required_fields(kind, &request)?;
    tracing::debug!(hook = ?kind, host_hook = ?request.hook, "request accepted");

    let defaults = match config_path {
        Some(path) => {
            let sections = HookKind::ALL.map(HookKind::section);
            Defaults::load(path, &sections)
                .map_err(|e| HookError::request(format!("Config error: {e}")))?
        }
        None => Defaults::default(),
    };
    let options = defaults.merge(kind.section(), request.config.as_ref());

    ensure_work_tree(git, request.require_project_root()?)?;

    match kind {
        HookKind::CommitValidator => validator::run(&request, &options, git),
        HookKind::GitTagger => tagger::run(&request, &options, git),
        HookKind::VersionPolicy => policy::run(&request, &options, git),
    }
}

fn check_required_fields(kind: HookKind, request: &HookRequest) -> Result<(), HookError> {
    if kind == HookKind::GitTagger {
        request.require_version()?;
    }
    request.require_project_root()?;
    Ok(())
}

/// `project_root` must be inside a git working tree.
fn ensure_work_tree(git: &dyn Git, root: &Path) -> Result<(), HookError> {
    match git.run(&["rev-parse", "--is-inside-work-tree"], root) {
        Ok(out) if out == "true" => Ok(()),
        Ok(out) => Err(HookError::request(format!(
            "Invalid project_root: {} is not a git working tree ({out})",
            root.display()
        ))),
        Err(e) => Err(HookError::request(format!(
            "Invalid project_root: {} is not a git working tree ({e})",
            root.display()
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "hook panicked".to_string()
    }
}

/// Serialize a HookResponse to JSON and print it to stdout as one line.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen for a struct of a
/// bool, a string, and a JSON map. Failure here indicates a programming bug.
fn output_json(response: &HookResponse) {
    let json = serde_json::to_string(response).expect("HookResponse serialization cannot fail");
    println!("{json}");
}
