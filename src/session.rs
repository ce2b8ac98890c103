// Session - owns the loaded/not-loaded state for interactive callers

use crate::error::{LoadError, PreconditionNotMet};
use crate::loader::{load, Ready, TableSource};
use crate::reports::{render, render_full_analysis, ReportKind};
use tracing::{error, info};

/// The caller-owned state of an interactive run: either nothing loaded
/// yet, or one `Ready` snapshot.
#[derive(Debug, Clone, Default)]
pub struct Session {
    ready: Option<Ready>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.ready.is_some()
    }

    pub fn ready(&self) -> Option<&Ready> {
        self.ready.as_ref()
    }

    /// Load (or reload) from a source.
    ///
    /// On failure the previous state is kept untouched.
    pub fn load(&mut self, source: &dyn TableSource) -> Result<&Ready, LoadError> {
        let ready = load(source).map_err(|err| {
            error!(error = %err, "failed to load sales data");
            err
        })?;
        info!("session ready");
        Ok(self.ready.insert(ready))
    }

    /// Render one report, or report that nothing is loaded
    pub fn run(&self, kind: ReportKind) -> Result<String, PreconditionNotMet> {
        self.ready()
            .map(|ready| render(ready, kind))
            .ok_or(PreconditionNotMet)
    }

    /// Complete analysis, loading first when nothing is loaded yet
    pub fn run_full_analysis(&mut self, source: &dyn TableSource) -> Result<String, LoadError> {
        if let Some(ready) = &self.ready {
            return Ok(render_full_analysis(ready));
        }
        let ready = self.load(source)?;
        Ok(render_full_analysis(ready))
    }
}
