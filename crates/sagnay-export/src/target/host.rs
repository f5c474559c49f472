//! Desktop host target: files on disk, clipboard and print via helper programs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::artifact::{Artifact, Delivery, ExportFile};
use crate::common::slugify;
use crate::error::TargetError;

use super::ExportTarget;

/// A helper program with fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Build from an argv list (`["xclip", "-selection", "clipboard"]`).
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Clipboard writer for the current platform.
    #[cfg(target_os = "macos")]
    #[must_use]
    pub fn platform_clipboard() -> Self {
        Self::new("pbcopy", &[])
    }

    /// Clipboard writer for the current platform.
    #[cfg(target_os = "windows")]
    #[must_use]
    pub fn platform_clipboard() -> Self {
        Self::new("clip", &[])
    }

    /// Clipboard writer for the current platform.
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[must_use]
    pub fn platform_clipboard() -> Self {
        Self::new("wl-copy", &[])
    }

    /// Document opener for the current platform.
    #[cfg(target_os = "macos")]
    #[must_use]
    pub fn platform_opener() -> Self {
        Self::new("open", &[])
    }

    /// Document opener for the current platform.
    #[cfg(target_os = "windows")]
    #[must_use]
    pub fn platform_opener() -> Self {
        // Empty string is the window title expected by `start`.
        Self::new("cmd", &["/C", "start", ""])
    }

    /// Document opener for the current platform.
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[must_use]
    pub fn platform_opener() -> Self {
        Self::new("xdg-open", &[])
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> TargetError {
        TargetError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Run the program with `input` on stdin and wait for it.
    pub fn run_with_stdin(&self, input: &[u8]) -> Result<(), TargetError> {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(input),
            None => Ok(()),
        };
        if let Err(err) = written {
            // Reap the child before reporting the failed write.
            let _ = child.kill();
            let _ = child.wait();
            return Err(err.into());
        }
        let status = child.wait()?;
        self.check_status(status)
    }

    /// Run the program with a trailing path argument and wait for it.
    pub fn run_with_path(&self, path: &Path) -> Result<(), TargetError> {
        let status = self
            .command()
            .arg(path)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;
        self.check_status(status)
    }

    fn check_status(&self, status: std::process::ExitStatus) -> Result<(), TargetError> {
        if status.success() {
            Ok(())
        } else {
            Err(TargetError::CommandFailed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Target for a desktop session.
///
/// Files land in `output_dir`. Clipboard text is piped into the clipboard
/// command. Print documents are written to `output_dir` as HTML and handed
/// to the opener, whose browser then shows the print dialog.
#[derive(Debug, Clone)]
pub struct HostTarget {
    output_dir: PathBuf,
    clipboard: Option<CommandSpec>,
    opener: Option<CommandSpec>,
}

impl HostTarget {
    /// Target using the platform clipboard and opener.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            clipboard: Some(CommandSpec::platform_clipboard()),
            opener: Some(CommandSpec::platform_opener()),
        }
    }

    /// Replace or disable the clipboard command.
    #[must_use]
    pub fn with_clipboard(mut self, command: Option<CommandSpec>) -> Self {
        self.clipboard = command;
        self
    }

    /// Replace or disable the opener. Without one, print documents are only written.
    #[must_use]
    pub fn with_opener(mut self, command: Option<CommandSpec>) -> Self {
        self.opener = command;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn save(&self, file: &ExportFile) -> Result<PathBuf, TargetError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&file.name);
        fs::write(&path, &file.bytes)?;
        info!(path = %path.display(), bytes = file.bytes.len(), "saved export file");
        Ok(path)
    }

    fn copy(&self, text: &str) -> Result<(), TargetError> {
        let command = self.clipboard.as_ref().ok_or(TargetError::Unavailable {
            what: "clipboard command",
        })?;
        debug!(program = %command.program, bytes = text.len(), "writing clipboard");
        command.run_with_stdin(text.as_bytes())
    }

    fn print(&self, title: &str, html: &str) -> Result<Delivery, TargetError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.html", slugify(title, "print")));
        fs::write(&path, html)?;
        match &self.opener {
            Some(opener) => {
                opener.run_with_path(&path)?;
                info!(path = %path.display(), "opened print document");
                Ok(Delivery::Opened(path))
            }
            None => {
                info!(path = %path.display(), "print document written");
                Ok(Delivery::Spooled(path))
            }
        }
    }
}

impl ExportTarget for HostTarget {
    fn deliver(&self, artifact: &Artifact) -> Result<Delivery, TargetError> {
        match artifact {
            Artifact::File(file) => self.save(file).map(Delivery::Saved),
            Artifact::Clipboard { text } => self.copy(text).map(|()| Delivery::Copied),
            Artifact::Print { title, html } => self.print(title, html),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_from_argv() {
        let argv = vec![
            "xclip".to_string(),
            "-selection".to_string(),
            "clipboard".to_string(),
        ];
        let spec = CommandSpec::from_argv(&argv).unwrap();
        assert_eq!(spec.program, "xclip");
        assert_eq!(spec.args, vec!["-selection", "clipboard"]);
        assert!(CommandSpec::from_argv(&[]).is_none());
    }

    #[test]
    fn missing_clipboard_command_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let target = HostTarget::new(dir.path()).with_clipboard(None);
        let result = target.deliver(&Artifact::Clipboard {
            text: "Name".to_string(),
        });
        assert!(matches!(result, Err(TargetError::Unavailable { .. })));
    }

    #[test]
    fn unknown_program_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let target = HostTarget::new(dir.path()).with_clipboard(Some(CommandSpec::new(
            "sagnay-no-such-clipboard-program",
            &[],
        )));
        let result = target.deliver(&Artifact::Clipboard {
            text: "Name".to_string(),
        });
        assert!(matches!(result, Err(TargetError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_write_error() {
        // Larger than a pipe buffer, so the write outlives the child.
        let input = vec![b'x'; 4 * 1024 * 1024];
        let spec = CommandSpec::new("sh", &["-c", "exit 0"]);
        let result = spec.run_with_stdin(&input);
        assert!(matches!(result, Err(TargetError::Io(_))), "{result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_status() {
        let spec = CommandSpec::new("sh", &["-c", "cat >/dev/null; exit 3"]);
        let result = spec.run_with_stdin(b"Name");
        assert!(matches!(result, Err(TargetError::CommandFailed { .. })), "{result:?}");
    }
}
