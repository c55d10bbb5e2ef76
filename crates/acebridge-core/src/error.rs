// ABOUTME: Error types surfaced by the bridge to host callers
// ABOUTME: Readiness, staleness, alias validation and remote call failures

use acebridge_types::AliasKind;
use thiserror::Error;

use crate::readiness::Readiness;

/// Failures of the host-facing API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A live operation was attempted before the engine finished bootstrapping
    #[error("engine is not ready")]
    NotReady,

    /// The proxy was derived from an engine handle that has since been replaced
    #[error("engine handle from epoch {held} is stale (current epoch is {current})")]
    StaleHandle { held: u64, current: u64 },

    #[error("engine failed to load: {0}")]
    LoadFailure(String),

    #[error("unknown {kind} alias '{alias}'")]
    UnknownAlias { kind: AliasKind, alias: String },

    /// The engine raised, or returned something the bridge could not decode
    #[error("engine call {method} failed: {message}")]
    BridgeCall { method: String, message: String },

    #[error("cannot {action} while {from}")]
    InvalidTransition { from: Readiness, action: &'static str },
}

impl BridgeError {
    pub(crate) fn call(method: impl Into<String>, message: impl std::fmt::Display) -> Self {
        BridgeError::BridgeCall {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// True for errors a caller can clear by waiting for, or triggering, a reload
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            BridgeError::NotReady | BridgeError::StaleHandle { .. } | BridgeError::LoadFailure(_)
        )
    }
}

pub type Result<T, E = BridgeError> = std::result::Result<T, E>;
