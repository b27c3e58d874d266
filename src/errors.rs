//! Error types for the `prsync` application.

use nu_ansi_term::Color;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while configuring or running a synchronization.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required environment variable is not set.
    #[error("{} environment variable must be set", Color::Blue.paint(.0.to_string()))]
    MissingEnv(&'static str),
    /// The configuration file is malformed or fails validation.
    #[error("invalid configuration: {}", .0)]
    InvalidConfig(String),
    /// The requested host has no section in the configuration file.
    #[error("host `{}` is not configured", Color::Blue.paint(.0.to_string()))]
    HostNotConfigured(String),
    /// A call to the GitHub API failed.
    #[error("GitHub API error while fetching {context}: {message}")]
    Remote {
        /// What was being fetched.
        context: String,
        /// Error detail reported by the client.
        message: String,
    },
    /// An external command exited unsuccessfully.
    #[error("`{program} {}` failed ({status}): {}", .args.join(" "), .stderr.trim())]
    Command {
        /// The program that was run.
        program: String,
        /// The arguments passed to the program.
        args: Vec<String>,
        /// The exit status of the program.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },
    /// A [git2::Error] occurred.
    #[error("libgit2 error: {}", .0)]
    Git2(#[from] git2::Error),
    /// A [std::io::Error] occurred.
    #[error("io error: {}", .0)]
    Io(#[from] std::io::Error),
    /// A [toml::de::Error] occurred.
    #[error("failed to parse configuration: {}", .0)]
    Toml(#[from] toml::de::Error),
    /// A spawned task panicked or was cancelled.
    #[error("task failed: {}", .0)]
    Join(#[from] tokio::task::JoinError),
}

/// A [Result] alias where the error is [SyncError].
pub type SyncResult<T> = Result<T, SyncError>;
