//! Typed errors for the executor crate.

use remfn_core::ImplementationType;
use thiserror::Error;

/// Errors raised by the dispatcher itself, before any transport is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The implementation handed in is not a remote implementation.
    #[error("only remote scalar function implementations are supported, got {kind}")]
    InvalidHandleKind { kind: &'static str },

    /// The transport client the function's implementation type routes to
    /// was not configured for this process.
    #[error("{transport} SQL function executor is not set up (required by {implementation_type} function)")]
    NotConfigured {
        implementation_type: ImplementationType,
        transport: &'static str,
    },
}
