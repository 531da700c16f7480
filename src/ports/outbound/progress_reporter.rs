/// ProgressReporter port for user-facing progress messages
///
/// Diagnostic detail goes through `tracing`; this port carries the short
/// status lines a CI log reader is expected to see.
pub trait ProgressReporter {
    /// Reports a status line
    fn report(&self, message: &str);

    /// Reports progress of a counted operation (e.g. checksum resolution)
    ///
    /// # Arguments
    /// * `current` - Items finished so far
    /// * `total` - Items expected
    /// * `message` - Optional label shown next to the bar
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning that does not stop the command
    fn report_error(&self, message: &str);

    /// Reports completion of a command
    fn report_completion(&self, message: &str);
}
