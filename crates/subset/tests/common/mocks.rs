//! Scriptable subsetting tool for pipeline tests.

use async_trait::async_trait;
use glyphpress_core::UnicodeRange;
use glyphpress_subset::{SubsetTool, ToolError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Mock tool that fakes artifact generation and can be told to fail for
/// outputs matching a substring.
#[derive(Default)]
pub struct MockTool {
    calls: AtomicUsize,
    fail_on: Mutex<Vec<String>>,
    partial_write_on_failure: bool,
    delay: Option<Duration>,
    inputs: Mutex<Vec<PathBuf>>,
}

#[allow(dead_code)]
impl MockTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose output path contains `pattern`.
    pub fn fail_on(self, pattern: &str) -> Self {
        self.fail_on
            .lock()
            .unwrap()
            .push(pattern.to_string());
        self
    }

    /// Leave a truncated artifact behind when failing, imitating a tool
    /// that dies mid-write.
    pub fn with_partial_writes(mut self) -> Self {
        self.partial_write_on_failure = true;
        self
    }

    /// Sleep this long inside each invocation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every scratch input path the tool was handed.
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.inputs.lock().unwrap().clone()
    }

    fn failure_status() -> std::process::ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(1 << 8)
    }
}

#[async_trait]
impl SubsetTool for MockTool {
    async fn run(
        &self,
        input: &Path,
        range: UnicodeRange,
        output: &Path,
    ) -> Result<(), ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.to_path_buf());

        // The pipeline must hand over a real staged file.
        let staged = tokio::fs::read(input).await.map_err(ToolError::Spawn)?;
        assert!(!staged.is_empty(), "scratch input is empty");

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let output_str = output.to_string_lossy();
        let should_fail = self
            .fail_on
            .lock()
            .unwrap()
            .iter()
            .any(|pattern| output_str.contains(pattern.as_str()));

        if should_fail {
            if self.partial_write_on_failure {
                tokio::fs::write(output, b"wOF2 truncated")
                    .await
                    .map_err(ToolError::Spawn)?;
            }
            return Err(ToolError::Failed {
                status: Self::failure_status(),
                output: "mock subsetter: refused".to_string(),
            });
        }

        let artifact = format!("wOF2 subset {range}");
        tokio::fs::write(output, artifact.as_bytes())
            .await
            .map_err(ToolError::Spawn)?;
        Ok(())
    }
}
