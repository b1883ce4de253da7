//! Hand-off point to whatever actually runs pipelines

use crate::{Invocation, Result};

/// Receives a resolved invocation and runs (or forwards) the named
/// pipeline.
///
/// Implementations own everything past resolution: containers, logging of
/// pipeline output, timeouts.
pub trait PipelineExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<()>;
}

impl<T: PipelineExecutor + ?Sized> PipelineExecutor for &T {
    fn execute(&self, invocation: &Invocation) -> Result<()> {
        (**self).execute(invocation)
    }
}

impl<T: PipelineExecutor + ?Sized> PipelineExecutor for Box<T> {
    fn execute(&self, invocation: &Invocation) -> Result<()> {
        (**self).execute(invocation)
    }
}
