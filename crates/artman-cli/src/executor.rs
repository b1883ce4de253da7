//! Executor that prints the invocation for a downstream runner

use std::io::{self, Write};
use std::sync::Mutex;

use artman_core::{Error as CoreError, Invocation, PipelineExecutor};
use serde::Serialize;

/// What a pipeline runner receives on stdin.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub pipeline_name: &'a str,
    /// `None` under `--local`, where no container is used
    pub image: Option<&'a str>,
    pub arguments: &'a artman_core::Arguments,
}

/// Writes each invocation as one JSON document followed by a newline.
pub struct StdoutExecutor<W: Write = io::Stdout> {
    out: Mutex<W>,
    image: Option<String>,
}

impl StdoutExecutor {
    pub fn new(image: Option<String>) -> Self {
        Self::with_writer(io::stdout(), image)
    }
}

impl<W: Write> StdoutExecutor<W> {
    pub fn with_writer(out: W, image: Option<String>) -> Self {
        Self {
            out: Mutex::new(out),
            image,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write> PipelineExecutor for StdoutExecutor<W> {
    fn execute(&self, invocation: &Invocation) -> artman_core::Result<()> {
        let envelope = Envelope {
            pipeline_name: invocation.pipeline_name(),
            image: self.image.as_deref(),
            arguments: invocation.arguments(),
        };
        let failed = |message: String| CoreError::Execution {
            pipeline: invocation.pipeline_name().to_string(),
            message,
        };

        let rendered = serde_json::to_string_pretty(&envelope).map_err(|e| failed(e.to_string()))?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| failed("output writer poisoned".to_string()))?;
        writeln!(out, "{rendered}")
            .and_then(|_| out.flush())
            .map_err(|e| failed(e.to_string()))?;

        tracing::debug!(pipeline = invocation.pipeline_name(), "Invocation handed off");
        Ok(())
    }
}
