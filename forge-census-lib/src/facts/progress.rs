/// Receives progress of a harvest so that the pipeline itself never touches the terminal.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Listing", "Enriching").
    fn set_phase(&self, phase: &str);

    /// Switch to determinate reporting.
    ///
    /// The callback returns (total, current, message) and may be polled at any time.
    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>);

    /// Switch to indeterminate reporting, for work whose size is not yet known.
    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
