//! Error types for routing.

use pvtp_types::PeerId;
use thiserror::Error;

/// An envelope reached a peer it was not addressed to.
///
/// Raised by a peer's receive handler. This is a bug in whatever routed the
/// envelope, never a network condition, so callers must not retry it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("{receiver} was handed an envelope from {source_peer} addressed to {destination}")]
    Misaddressed {
        receiver: PeerId,
        source_peer: PeerId,
        destination: PeerId,
    },
}

impl RoutingError {
    /// Check that `receiver` is the destination of an envelope.
    pub fn check(receiver: &PeerId, source: &PeerId, destination: &PeerId) -> Result<(), Self> {
        if receiver == destination {
            Ok(())
        } else {
            Err(RoutingError::Misaddressed {
                receiver: receiver.clone(),
                source_peer: source.clone(),
                destination: destination.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_destination() {
        let a = PeerId::from("A");
        let b = PeerId::from("B");

        assert!(RoutingError::check(&b, &a, &b).is_ok());

        let err = RoutingError::check(&a, &a, &b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "u/A was handed an envelope from u/A addressed to u/B"
        );
    }
}
