//! PlantUML process renderer.
//!
//! Runs `java -jar plantuml.jar -tsvg -pipe`, writing the diagram source to
//! stdin and reading the rendered SVG from stdout. The optional config file
//! is passed through with `-config` so PlantUML includes it before the
//! diagram.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use crate::gateway::{RenderError, Renderer};

/// [`Renderer`] backed by the PlantUML jar.
pub struct PlantUmlRenderer {
    jar_path: PathBuf,
    config_path: Option<PathBuf>,
}

impl PlantUmlRenderer {
    /// Create a renderer for the jar at `jar_path`.
    #[must_use]
    pub fn new(jar_path: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            jar_path,
            config_path,
        }
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new("java");
        command
            .arg("-jar")
            .arg(&self.jar_path)
            .args(["-tsvg", "-charset", "UTF-8", "-pipe"]);
        if let Some(config) = &self.config_path {
            command.arg("-config").arg(config);
        }
        command
    }
}

impl Renderer for PlantUmlRenderer {
    fn render(&self, source: &str) -> Result<String, RenderError> {
        run_piped(self.build_command(), source)
    }
}

/// Run `command` with `source` piped to stdin and return its stdout.
///
/// Stdin is fed from a separate thread while stdout drains, so a source
/// larger than the OS pipe buffer cannot deadlock against a child that
/// interleaves reading input with writing output.
fn run_piped(mut command: Command, source: &str) -> Result<String, RenderError> {
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(RenderError::Process)?;

    // Write the diagram and close stdin so the child sees EOF
    let stdin = child.stdin.take();
    let source_bytes = source.as_bytes().to_vec();
    let writer = thread::spawn(move || -> std::io::Result<()> {
        if let Some(mut stdin) = stdin {
            stdin.write_all(&source_bytes)?;
        }
        Ok(())
    });

    let output = child.wait_with_output().map_err(RenderError::Process)?;

    if !output.status.success() {
        return Err(RenderError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    // A broken pipe just means the child exited cleanly without draining
    // its stdin; any other write failure is a real error.
    if let Ok(Err(e)) = writer.join()
        && e.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(RenderError::Process(e));
    }

    String::from_utf8(output.stdout).map_err(RenderError::InvalidOutput)
}
