use crate::application::dto::PublishRequest;
use crate::build_info::domain::BuildInfo;
use crate::build_info::services::{BuildInfoAssembler, FragmentMerger, PropertyFilter};
use crate::ports::outbound::{PartialStore, ProgressReporter};
use crate::shared::Result;
use chrono::Utc;

/// AssembleBuildInfoUseCase - Produces the final build-info document
///
/// Reads the start marker and every fragment of a build, merges the
/// fragments and wraps the result with the build's top-level metadata.
///
/// # Type Parameters
/// * `S` - PartialStore implementation
/// * `PR` - ProgressReporter implementation
pub struct AssembleBuildInfoUseCase<S, PR> {
    store: S,
    progress_reporter: PR,
}

impl<S, PR> AssembleBuildInfoUseCase<S, PR>
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

    /// # Errors
    /// Fails if the build was never started, if any fragment is corrupt, or
    /// if an environment pattern does not compile.
    pub fn execute(&self, request: &PublishRequest) -> Result<BuildInfo> {
        let coordinates = &request.coordinates;
        let filter = PropertyFilter::new(&request.env_include, &request.env_exclude)?;

        let general = self.store.read_general_details(coordinates)?;
        BuildInfoAssembler::require_started(coordinates, general.as_ref())?;

        let partials = self.store.read_partials(coordinates)?;
        self.progress_reporter.report(&format!(
            "📦 Merging {} fragment(s) of {}",
            partials.len(),
            coordinates
        ));

        let merged = FragmentMerger::merge(partials, &coordinates.name);
        let build_info = BuildInfoAssembler::assemble(
            coordinates,
            general.as_ref(),
            merged,
            &request.identity,
            &filter,
            Utc::now(),
        )?;

        self.progress_reporter.report_completion(&format!(
            "✅ Assembled build info with {} module(s)",
            build_info.modules.len()
        ));
        Ok(build_info)
    }
}

#[cfg(test)]
mod tests;
