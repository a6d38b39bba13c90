//! Vendor utility invocation for camera-ipconfig.
//!
//! This module handles spawning the vendor `IpConfigUtility` executable and
//! collecting its output. The utility waits for an Enter keypress before
//! exiting, so every invocation feeds a single newline to its stdin.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Default path of the vendor executable, relative to the working directory.
pub const DEFAULT_UTILITY_PATH: &str = "./IpConfigUtility";

/// Errors that can occur while invoking the vendor utility.
#[derive(Debug, Error)]
pub enum UtilityError {
    /// The vendor executable was not found at the configured path.
    #[error(
        "vendor utility not found at '{path}'.\n\n\
         Place IpConfigUtility in the working directory, or point at it with\n\
         --utility <PATH> or the [utility] path setting in the config file."
    )]
    NotFound { path: PathBuf },

    /// Failed to spawn the vendor process.
    #[error("failed to spawn '{path}': {source}")]
    SpawnFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error while driving the vendor process.
    #[error("I/O error while running '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The vendor process exited with a non-zero status.
    #[error("'{path}' exited with code {exit_code:?}\n{stderr}")]
    CommandFailed {
        path: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// A single camera network assignment, as passed to `/force` and `/persist`.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub mac: String,
    pub ip: String,
    pub subnet: String,
    pub gateway: String,
}

impl Assignment {
    fn to_args(&self, operation: &str) -> Vec<String> {
        vec![
            operation.to_string(),
            "-a".to_string(),
            self.ip.clone(),
            "-m".to_string(),
            self.mac.clone(),
            "-s".to_string(),
            self.subnet.clone(),
            "-g".to_string(),
            self.gateway.clone(),
        ]
    }
}

/// Wrapper around the vendor `IpConfigUtility` executable.
#[derive(Debug, Clone)]
pub struct IpConfigUtility {
    program: PathBuf,
}

impl IpConfigUtility {
    /// Create a wrapper for the utility at the given path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        IpConfigUtility {
            program: program.into(),
        }
    }

    /// The configured executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `IpConfigUtility /list` and return its stdout.
    pub fn list(&self) -> Result<String, UtilityError> {
        self.run(&["/list".to_string()])
    }

    /// Run `IpConfigUtility /force` for the given assignment.
    ///
    /// Forces the new address onto the camera without writing it to the
    /// camera's persistent configuration.
    pub fn force(&self, assignment: &Assignment) -> Result<(), UtilityError> {
        self.run(&assignment.to_args("/force")).map(|_| ())
    }

    /// Run `IpConfigUtility /persist` for the given assignment.
    ///
    /// Writes the new address to the camera's persistent configuration so it
    /// survives a power cycle.
    pub fn persist(&self, assignment: &Assignment) -> Result<(), UtilityError> {
        self.run(&assignment.to_args("/persist")).map(|_| ())
    }

    /// Apply an assignment: force the new address, then persist it.
    ///
    /// `/persist` is not attempted when `/force` fails.
    pub fn apply(&self, assignment: &Assignment) -> Result<(), UtilityError> {
        self.force(assignment)?;
        self.persist(assignment)
    }

    /// Spawn the utility with the given arguments, feed it the newline it
    /// waits for, and collect its output.
    fn run(&self, args: &[String]) -> Result<String, UtilityError> {
        log::debug!("running {:?} {:?}", self.program, args);

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    UtilityError::NotFound {
                        path: self.program.clone(),
                    }
                } else {
                    UtilityError::SpawnFailed {
                        path: self.program.clone(),
                        source: e,
                    }
                }
            })?;

        // Simulate the Enter keypress the utility blocks on.
        if let Some(mut stdin) = child.stdin.take() {
            // A broken pipe here means the utility exited without reading
            // stdin, which is fine.
            let _ = stdin.write_all(b"\n");
        }

        let output = child.wait_with_output().map_err(|e| UtilityError::Io {
            path: self.program.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(UtilityError::CommandFailed {
                path: self.program.clone(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for IpConfigUtility {
    fn default() -> Self {
        IpConfigUtility::new(DEFAULT_UTILITY_PATH)
    }
}
