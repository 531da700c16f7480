use crate::build_info::domain::BuildCoordinates;
use crate::ports::outbound::{PartialStore, ProgressReporter};
use crate::shared::Result;

/// CleanBuildUseCase - Removes every fragment and the start marker of a build
pub struct CleanBuildUseCase<S, PR> {
    store: S,
    progress_reporter: PR,
}

impl<S, PR> CleanBuildUseCase<S, PR>
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

    /// Returns `true` if anything was removed
    pub fn execute(&self, coordinates: &BuildCoordinates) -> Result<bool> {
        let removed = self.store.clean(coordinates)?;
        if removed {
            self.progress_reporter
                .report_completion(&format!("🧹 Cleaned {}", coordinates));
        } else {
            self.progress_reporter
                .report(&format!("ℹ️  Nothing recorded for {}", coordinates));
        }
        Ok(removed)
    }
}
