//! [BranchStore] that shells out to `git` and `twig`.

use super::{parse_config_entries, BranchStore, MetadataKey};
use crate::errors::{SyncError, SyncResult};
use std::{
    path::Path,
    process::{Command, Output, Stdio},
};

/// Runs `git` for branch operations and `twig` for branch metadata.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CommandStore {
    git: String,
    twig: String,
}

impl Default for CommandStore {
    fn default() -> Self {
        Self::new("git", "twig")
    }
}

impl CommandStore {
    /// Creates a new [CommandStore] running the given `git` and `twig` executables.
    pub fn new(git: impl Into<String>, twig: impl Into<String>) -> Self {
        Self {
            git: git.into(),
            twig: twig.into(),
        }
    }

    /// Runs `program` with `args` in `dir` and captures its output, without checking the exit
    /// status.
    fn output(&self, dir: &Path, program: &str, args: &[&str]) -> SyncResult<Output> {
        Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(Into::into)
    }

    /// Runs `program` with `args` in `dir`, failing unless it exits successfully.
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> SyncResult<String> {
        let output = self.output(dir, program, args)?;
        if !output.status.success() {
            return Err(command_error(program, args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn twig(&self, dir: &Path, args: &[&str]) -> SyncResult<String> {
        self.run(dir, &self.twig, args)
    }

    /// Returns whether `branch.<branch>.<key>` is missing from the repository's local config.
    ///
    /// `twig` aborts when asked for a property that was never set, so its failures are checked
    /// against git config before being reported.
    fn is_unset(&self, dir: &Path, branch: &str, key: MetadataKey) -> SyncResult<bool> {
        let name = format!("branch.{}.{}", branch, key.as_str());
        let args = ["config", "--local", "--get", name.as_str()];
        let output = self.output(dir, &self.git, &args)?;

        // `--get` exits with 1 for a missing key and 128 outside a repository.
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(command_error(&self.git, &args, &output)),
        }
    }
}

fn command_error(program: &str, args: &[&str], output: &Output) -> SyncError {
    SyncError::Command {
        program: program.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

impl BranchStore for CommandStore {
    fn branch_exists(&self, dir: &Path, branch: &str) -> SyncResult<bool> {
        let reference = format!("refs/heads/{}", branch);
        let args = ["show-ref", "--verify", "--quiet", reference.as_str()];
        let output = self.output(dir, &self.git, &args)?;

        // `show-ref` exits with 1 for a missing ref and 128 outside a repository.
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(command_error(&self.git, &args, &output)),
        }
    }

    fn delete_branch(&self, dir: &Path, branch: &str) -> SyncResult<()> {
        self.run(dir, &self.git, &["branch", "-D", branch])
            .map(|_| ())
    }

    fn get_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
    ) -> SyncResult<Option<String>> {
        let value = match self.twig(dir, &["--branch", branch, key.as_str()]) {
            Ok(value) => value,
            Err(e @ SyncError::Command { .. }) => {
                return if self.is_unset(dir, branch, key)? {
                    Ok(None)
                } else {
                    Err(e)
                };
            }
            Err(e) => return Err(e),
        };
        let value = value.trim();

        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn set_metadata(
        &self,
        dir: &Path,
        branch: &str,
        key: MetadataKey,
        value: &str,
    ) -> SyncResult<()> {
        self.twig(dir, &["--branch", branch, key.as_str(), value])
            .map(|_| ())
    }

    fn unset_metadata(&self, dir: &Path, branch: &str, key: MetadataKey) -> SyncResult<()> {
        match self.twig(dir, &["--branch", branch, "--unset", key.as_str()]) {
            Ok(_) => Ok(()),
            Err(e @ SyncError::Command { .. }) => {
                if self.is_unset(dir, branch, key)? {
                    Ok(())
                } else {
                    Err(e)
                }
            }
            Err(e) => Err(e),
        }
    }

    fn query_metadata(&self, dir: &Path, pattern: &str) -> SyncResult<Vec<(String, String)>> {
        let args = ["config", "--get-regexp", pattern];
        let output = self.output(dir, &self.git, &args)?;

        // `git config --get-regexp` exits with 1 when nothing matches.
        match output.status.code() {
            Some(0) => Ok(parse_config_entries(&String::from_utf8_lossy(&output.stdout))),
            Some(1) => Ok(Vec::new()),
            _ => Err(command_error(&self.git, &args, &output)),
        }
    }
}
