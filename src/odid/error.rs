use thiserror::Error;

/// Frame-scoped decode failures.
///
/// A missing marker is not an error (see [`DecodeResult::is_found`]) and
/// neither is an unsupported message type; both are normal outcomes.
///
/// [`DecodeResult::is_found`]: super::DecodeResult::is_found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("message pack header truncated: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },
    #[error("message slot {slot} truncated: need {needed} bytes, got {actual}")]
    TruncatedSlot {
        slot: usize,
        needed: usize,
        actual: usize,
    },
    #[error("message pack holds more than {capacity} decodable messages")]
    TooManyMessages { capacity: usize },
}

impl DecodeError {
    /// Short identifier used in the NDJSON event stream.
    pub const fn code(&self) -> &'static str {
        match self {
            DecodeError::TruncatedHeader { .. } => "truncated_header",
            DecodeError::TruncatedSlot { .. } => "truncated_slot",
            DecodeError::TooManyMessages { .. } => "too_many_messages",
        }
    }

    pub const fn is_truncated(&self) -> bool {
        matches!(
            self,
            DecodeError::TruncatedHeader { .. } | DecodeError::TruncatedSlot { .. }
        )
    }
}
