//! Azure CLI command execution.
//!
//! Provides utilities for running Azure CLI commands and returning their output.

use crate::config;
use crate::error::{Result, VwanError};
use colored::Colorize;
use mockall::automock;
use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Runs the `az` executable.
#[automock]
pub trait CommandRunner {
    /// Run `az` with `args` and return its stdout.
    fn run_az(&self, args: &[String]) -> Result<String>;
}

/// [`CommandRunner`] backed by the installed Azure CLI.
#[derive(Debug, Clone, Default)]
pub struct AzCli;

impl CommandRunner for AzCli {
    fn run_az(&self, args: &[String]) -> Result<String> {
        let mut cmds = Vec::with_capacity(args.len() + 1);
        cmds.push("az".to_string());
        cmds.extend(args.iter().cloned());
        run_args(&cmds)
    }
}

/// Split a command string into arguments, with quoted substrings preserved.
///
/// # Examples
/// ```
/// use azure_vwan::azure::cli::split_args;
/// assert_eq!(split_args("account show --query 'id'"), vec!["account", "show", "--query", "id"]);
/// ```
pub fn split_args(cmd: &str) -> Vec<String> {
    let args: Vec<String> = split_and_strip(cmd)
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    log::trace!("split cmds={:?}", args);
    args
}

/// Run an already split command line and return its stdout.
///
/// Arguments are passed through untouched, so JSON bodies need no quoting.
pub fn run_args(cmds: &[String]) -> Result<String> {
    let cmd = cmds.join(" ");
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let (program, args) = cmds
        .split_first()
        .ok_or_else(|| VwanError::Configuration("Empty command".to_string()))?;

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        VwanError::Remote(format!("Failed to execute command {program}: {e}"))
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());
        log::debug!("Success output.status.code(): {:?}", output.status.code());

        if output.stdout.len() > config::MAX_OUTPUT_BYTES {
            return Err(VwanError::Remote(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                cmd
            )));
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(VwanError::Remote(format!("ERROR running: {}", stderr.trim())));
    }

    String::from_utf8(output.stdout).map_err(|e| VwanError::Remote(format!("Invalid UTF-8: {}", e)))
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
