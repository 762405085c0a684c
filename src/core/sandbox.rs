// sandbox - mirrors the file tree to disk and runs plan commands in it

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;

use crate::core::tree::{FileTree, NodeKind};
use crate::error::Error;

/// Hard ceiling for one plan command. npm installs are slow, but nothing
/// in a scaffold should take longer than this.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

const OUTPUT_CAP: usize = 50_000;

/// A project directory the plan materializes into. Ephemeral sandboxes
/// live in a temp dir that is removed when the sandbox drops; pinned ones
/// write into a directory the user chose and leave it behind.
pub struct Sandbox {
    root: PathBuf,
    keep: Option<TempDir>,
}

/// Captured result of one command run.
#[derive(Debug)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

impl Sandbox {
    pub fn ephemeral() -> Result<Self, Error> {
        let dir = tempfile::Builder::new().prefix("nlsite-").tempdir()?;
        Ok(Self {
            root: dir.path().to_path_buf(),
            keep: Some(dir),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = path.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, keep: None })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_ephemeral(&self) -> bool {
        self.keep.is_some()
    }

    /// Writes the tree under the sandbox root. Additive and idempotent:
    /// files already on disk are overwritten from the tree, files the tree
    /// does not know about (node_modules, lockfiles) are left alone.
    /// Returns the number of files written.
    pub fn sync(&self, tree: &FileTree) -> Result<usize, Error> {
        std::fs::create_dir_all(&self.root)?;
        let mut written = 0;
        for node in tree.nodes() {
            let target = self.root.join(node.path.trim_start_matches('/'));
            match node.kind {
                NodeKind::Folder => std::fs::create_dir_all(&target)?,
                NodeKind::File => {
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&target, &node.content)?;
                    written += 1;
                }
            }
        }
        log::debug!("synced {written} files into {}", self.root.display());
        Ok(written)
    }

    /// Runs one shell command with the sandbox root as working directory.
    /// The process is killed on timeout and its output capped, so a dev
    /// server or runaway install cannot wedge the caller.
    pub async fn run(&self, command: &str, timeout: Duration) -> Result<RunOutcome, Error> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = tokio::process::Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = tokio::process::Command::new("sh");
            c.args(["-c", command]);
            c
        };
        cmd.current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("running `{command}` in {}", self.root.display());
        let child = cmd
            .spawn()
            .map_err(|e| Error::Command(format!("failed to spawn `{command}`: {e}")))?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => {
                let output = output?;
                Ok(RunOutcome {
                    stdout: truncate_output(String::from_utf8_lossy(&output.stdout).into_owned()),
                    stderr: truncate_output(String::from_utf8_lossy(&output.stderr).into_owned()),
                    exit_code: output.status.code().unwrap_or(-1),
                    timed_out: false,
                })
            }
            Err(_) => {
                log::warn!("`{command}` hit the {}s timeout", timeout.as_secs());
                Ok(RunOutcome {
                    stdout: String::new(),
                    stderr: String::new(),
                    exit_code: -1,
                    timed_out: true,
                })
            }
        }
    }
}

fn truncate_output(mut text: String) -> String {
    if text.len() <= OUTPUT_CAP {
        return text;
    }
    let mut cut = OUTPUT_CAP;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text.push_str("\n... [output truncated]");
    text
}
