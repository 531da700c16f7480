use crate::build_info::domain::{BuildCoordinates, GeneralDetails};
use crate::ports::outbound::{PartialStore, ProgressReporter};
use crate::shared::Result;
use chrono::{DateTime, FixedOffset};

/// StartBuildUseCase - Writes the start marker of a build
///
/// Starting an already started build keeps the earliest marker, so a
/// retried CI step does not shorten the reported duration.
pub struct StartBuildUseCase<S, PR> {
    store: S,
    progress_reporter: PR,
}

impl<S, PR> StartBuildUseCase<S, PR>
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

    pub fn execute(
        &self,
        coordinates: &BuildCoordinates,
        started: DateTime<FixedOffset>,
    ) -> Result<GeneralDetails> {
        if let Some(existing) = self.store.read_general_details(coordinates)? {
            if existing.timestamp <= started {
                self.progress_reporter.report(&format!(
                    "ℹ️  {} already started at {}",
                    coordinates,
                    existing.timestamp.to_rfc3339()
                ));
                return Ok(existing);
            }
        }

        let details = GeneralDetails::new(started);
        self.store.save_general_details(coordinates, &details)?;
        self.progress_reporter
            .report_completion(&format!("🚀 Started {}", coordinates));
        Ok(details)
    }
}
