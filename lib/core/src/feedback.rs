use crate::{Error, Result};
use serde::Serialize;

pub const FEEDBACK_THANKS: &str = "Thanks for your feedback!";

/// Acknowledgment for accepted feedback. Nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackAck {
    pub message: &'static str,
    pub chars: usize,
}

/// Validate a free-text comment. Blank input is rejected with [`Error::EmptyFeedback`].
pub fn submit_feedback(comment: &str) -> Result<FeedbackAck> {
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyFeedback);
    }
    Ok(FeedbackAck {
        message: FEEDBACK_THANKS,
        chars: trimmed.chars().count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_feedback_is_rejected() {
        for comment in ["", "   ", "\n\t "] {
            assert!(matches!(submit_feedback(comment), Err(Error::EmptyFeedback)));
        }
    }

    #[test]
    fn test_feedback_is_acknowledged() {
        let ack = submit_feedback("  Loved the picks  ").unwrap();
        assert_eq!(ack.message, FEEDBACK_THANKS);
        assert_eq!(ack.chars, 15);
    }
}
