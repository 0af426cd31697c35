// src/backend/tool.rs

//! Running SCCS and RCS tools
//!
//! Every invocation is recorded in the transcript as `$ <command>` followed
//! by its combined stdout/stderr. Tools are looked up on PATH extended with
//! an auxiliary directory (CSSC installs `prs`, `get` and friends under
//! `/usr/lib/cssc` on Debian-style systems), and the child inherits the same
//! extended PATH.
//!
//! There is no timeout: a hung tool hangs the conversion.

use crate::error::{Error, Result};
use crate::transcript::Transcript;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Captured result of a tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Rendered command line
    pub command: String,
    /// Exit code; None if killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    /// stdout followed by stderr, as recorded in the transcript
    pub combined: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs tools from a fixed working directory with an extended search path
#[derive(Debug, Clone)]
pub struct ToolRunner {
    work_dir: PathBuf,
    search_path: OsString,
}

impl ToolRunner {
    /// Create a runner for `work_dir`, appending `tool_dir` to PATH
    pub fn new(work_dir: impl Into<PathBuf>, tool_dir: Option<&Path>) -> Self {
        let base = std::env::var_os("PATH").unwrap_or_default();
        let search_path = match tool_dir {
            Some(dir) => {
                let mut dirs: Vec<PathBuf> = std::env::split_paths(&base).collect();
                dirs.push(dir.to_path_buf());
                std::env::join_paths(dirs).unwrap_or(base)
            }
            None => base,
        };

        Self {
            work_dir: work_dir.into(),
            search_path,
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The PATH handed to child processes
    pub fn search_path(&self) -> &OsString {
        &self.search_path
    }

    /// Locate `program` on the extended search path
    pub fn resolve(&self, program: &str) -> Result<PathBuf> {
        which::which_in(program, Some(&self.search_path), &self.work_dir).map_err(|_| {
            Error::ToolNotFound {
                tool: program.to_string(),
                search_path: self.search_path.to_string_lossy().into_owned(),
            }
        })
    }

    /// Run a tool, failing if it exits non-zero
    pub fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
        log: &mut Transcript,
    ) -> Result<ToolOutput> {
        let output = self.run_unchecked(program, args, stdin, log)?;
        if !output.success() {
            return Err(Error::CommandFailed {
                command: output.command,
                status: output.status,
                output: output.combined,
            });
        }
        Ok(output)
    }

    /// Run a tool and return its output whatever the exit status
    ///
    /// Only failure to locate or start the tool is an error.
    pub fn run_unchecked(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&str>,
        log: &mut Transcript,
    ) -> Result<ToolOutput> {
        let command = render_command(program, args);
        let resolved = match self.resolve(program) {
            Ok(path) => path,
            Err(e) => {
                log.command(&command, e.to_string());
                return Err(e);
            }
        };
        debug!("Running {} ({})", command, resolved.display());

        let mut child = Command::new(&resolved)
            .args(args)
            .current_dir(&self.work_dir)
            .env("PATH", &self.search_path)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        // stdin is written on its own thread while stdout/stderr are drained
        let pipe = child.stdin.take();
        let output = thread::scope(|scope| {
            if let (Some(input), Some(mut pipe)) = (stdin, pipe) {
                let command = &command;
                scope.spawn(move || {
                    // A tool that exits without reading its input closes the
                    // pipe; its exit status reports the real problem.
                    if let Err(e) = pipe.write_all(input.as_bytes()) {
                        debug!("Writing stdin of {} failed: {}", command, e);
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(|source| Error::CommandSpawn {
            command: command.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let mut combined = stdout.clone();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        log.command(&command, &combined);

        Ok(ToolOutput {
            command,
            status: output.status.code(),
            stdout,
            combined,
        })
    }
}

/// Render a command line the way a shell user would type it
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
            rendered.push('"');
            rendered.push_str(&arg.replace('"', "\\\""));
            rendered.push('"');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}
