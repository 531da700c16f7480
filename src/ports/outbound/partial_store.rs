use crate::build_info::domain::{BuildCoordinates, GeneralDetails, Partial};
use crate::shared::Result;
use std::path::PathBuf;

/// PartialStore port for persisting build fragments
///
/// Fragments are write-once. Several processes may save fragments for the
/// same build at the same time, so implementations must never edit an
/// existing file in place.
pub trait PartialStore {
    /// Persists one fragment and returns the location it was written to
    ///
    /// # Errors
    /// Returns an error if the fragment cannot be serialized or written.
    fn save_partial(&self, coordinates: &BuildCoordinates, partial: &Partial) -> Result<PathBuf>;

    /// Reads every fragment recorded for a build
    ///
    /// A build without any fragments yields an empty list.
    ///
    /// # Errors
    /// Returns an error naming the offending file if any fragment is corrupt.
    fn read_partials(&self, coordinates: &BuildCoordinates) -> Result<Vec<Partial>>;

    /// Writes the start marker of a build
    fn save_general_details(
        &self,
        coordinates: &BuildCoordinates,
        details: &GeneralDetails,
    ) -> Result<()>;

    /// Reads the start marker, `None` if the build was never started
    fn read_general_details(&self, coordinates: &BuildCoordinates)
        -> Result<Option<GeneralDetails>>;

    /// Removes everything recorded for a build
    ///
    /// # Returns
    /// `true` if there was anything to remove
    fn clean(&self, coordinates: &BuildCoordinates) -> Result<bool>;
}
