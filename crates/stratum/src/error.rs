use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{geom, id::Identity};

/// Result type for stratum operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A lookup named an identity that has no node. Identities only come into
    /// existence through `start`.
    #[error("no node with identity {0}")]
    UnknownIdentity(Identity),

    /// `end` was called with no open node.
    #[error("end called without a matching start")]
    UnbalancedEnd,

    /// The frame finished while nodes were still open.
    #[error("{0} node(s) were still open at the end of the frame")]
    UnclosedNodes(usize),

    /// A declaration or `end_frame` happened outside of a frame.
    #[error("no frame in progress")]
    FrameNotStarted,

    /// `begin_frame` was called twice without an `end_frame`.
    #[error("a frame is already in progress")]
    FrameInProgress,

    /// A control asked the value store for a value it never stored.
    #[error("identity {0} has no stored value of the requested type")]
    MissingValue(Identity),

    /// A control callback failed.
    #[error("control {identity}: {message}")]
    Control {
        /// Node whose callback failed.
        identity: Identity,
        /// Failure description.
        message: String,
    },

    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),

    #[error("config: {0}")]
    /// Invalid configuration.
    Config(String),

    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl Error {
    /// Construct a control failure for a node.
    pub fn control(identity: Identity, message: impl Into<String>) -> Self {
        Self::Control {
            identity,
            message: message.into(),
        }
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
