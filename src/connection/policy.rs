use serde::{Deserialize, Serialize};

use super::classifier::Transition;
use crate::events::TransportState;

/// When accumulated transcript and log state is discarded
///
/// The two policies are not interchangeable: with `OnNewAttempt` the previous
/// conversation disappears as soon as a reconnect starts, with `OnReady` it
/// stays visible until the new session is actually up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Reset when an attempt starts from a fully-down transport
    #[default]
    OnNewAttempt,
    /// Reset when the transport becomes ready
    OnReady,
}

impl ResetPolicy {
    /// Whether this transition opens a new session
    pub fn is_boundary(&self, transition: &Transition) -> bool {
        match self {
            ResetPolicy::OnNewAttempt => {
                transition.current == TransportState::Initializing
                    && matches!(
                        transition.previous,
                        TransportState::Disconnected | TransportState::Error
                    )
            }
            ResetPolicy::OnReady => {
                transition.current == TransportState::Ready
                    && transition.previous != TransportState::Ready
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use TransportState::*;

    fn transition(previous: TransportState, current: TransportState) -> Transition {
        Transition {
            previous,
            current,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_on_new_attempt() {
        let policy = ResetPolicy::OnNewAttempt;
        assert!(policy.is_boundary(&transition(Disconnected, Initializing)));
        assert!(policy.is_boundary(&transition(Error, Initializing)));
        assert!(!policy.is_boundary(&transition(Connecting, Initializing)));
        assert!(!policy.is_boundary(&transition(Connecting, Ready)));
    }

    #[test]
    fn test_on_ready() {
        let policy = ResetPolicy::OnReady;
        assert!(policy.is_boundary(&transition(Authenticating, Ready)));
        assert!(policy.is_boundary(&transition(Connecting, Ready)));
        assert!(!policy.is_boundary(&transition(Disconnected, Initializing)));
    }

    #[test]
    fn test_policy_deserializes_from_config_names() {
        let policy: ResetPolicy = serde_json::from_str("\"on_ready\"").unwrap();
        assert_eq!(policy, ResetPolicy::OnReady);
        assert_eq!(ResetPolicy::default(), ResetPolicy::OnNewAttempt);
    }
}
