/// Edit request lifecycle status
///
/// A single request is either idle, in flight, or finished. The UI derives
/// its affordances (disabled submit, progress note, error banner) from this.

/// Status of the current edit request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    /// No request in progress and nothing to report
    #[default]
    Idle,
    /// A request has been sent and is awaiting a response
    InFlight,
    /// The last request completed and produced an edited image
    Succeeded,
    /// The last request failed with a user-facing message
    Failed(String),
}

impl OperationStatus {
    /// True while a request is awaiting a response
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// The error message to show in the banner, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
