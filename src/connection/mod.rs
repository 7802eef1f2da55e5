//! Connection state classification
//!
//! Follows the transport state sequence and answers two questions for the
//! rest of the session: is the connection failed (and with which message),
//! and does this transition start a new session.

mod classifier;
mod policy;

pub use classifier::{
    ConnectionClassifier, ConnectionStatus, Transition, CONNECTION_FAILED_MESSAGE, HISTORY_LIMIT,
};
pub use policy::ResetPolicy;
