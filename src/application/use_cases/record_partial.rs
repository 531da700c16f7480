use crate::application::dto::RecordRequest;
use crate::build_info::domain::{Partial, PartialPayload};
use crate::build_info::services::{collect_env, PropertyFilter};
use crate::ports::outbound::{EnvironmentReader, PartialStore, ProgressReporter};
use crate::shared::Result;
use std::path::PathBuf;

/// RecordPartialUseCase - Persists one fragment of a build
pub struct RecordPartialUseCase<S, PR> {
    store: S,
    progress_reporter: PR,
}

impl<S, PR> RecordPartialUseCase<S, PR>
where
    S: PartialStore,
    PR: ProgressReporter,
{
    pub fn new(store: S, progress_reporter: PR) -> Self {
        Self {
            store,
            progress_reporter,
        }
    }

    /// Records `payload` for the module and build named in `request`
    pub fn execute(&self, request: &RecordRequest, payload: PartialPayload) -> Result<PathBuf> {
        let kind = payload.kind();
        let partial = Partial::new(
            request.module_id.clone(),
            request.module_type,
            request.timestamp,
            payload,
        );
        let path = self.store.save_partial(&request.coordinates, &partial)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Recorded {} fragment for {}",
            kind, request.coordinates
        ));
        Ok(path)
    }

    /// Records the process environment, filtered before it reaches disk
    pub fn record_env<E: EnvironmentReader>(
        &self,
        request: &RecordRequest,
        environment: &E,
        filter: &PropertyFilter,
    ) -> Result<PathBuf> {
        let collected = collect_env(environment.variables());
        let total = collected.len();
        let kept = filter.filter(collected);

        self.progress_reporter.report(&format!(
            "🌱 Collected {} of {} environment variable(s)",
            kept.len(),
            total
        ));
        self.execute(request, PartialPayload::Env(kept))
    }
}
