//! Error types for policy and scope resolution

use thiserror::Error;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Resolution errors.
///
/// These signal a mismatch between a test and the policy it exercises,
/// never a disagreement about an authorization decision. Decision
/// mismatches are assertion failures and panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The identity derived from the test does not name the bound policy
    #[error("Policy '{identity}' not found (bound policy is '{bound}')")]
    PolicyNotFound { identity: String, bound: String },

    /// The identity derived from the test does not name the bound scope
    #[error("Scope '{identity}' not found (bound scope is '{bound}')")]
    ScopeNotFound { identity: String, bound: String },

    /// The policy has no predicate for the requested action
    #[error("Policy '{policy}' does not define a predicate for '{action}'")]
    PredicateNotFound { policy: String, action: String },

    /// The policy defines no generic permitted attributes accessor
    #[error("Policy '{policy}' does not define permitted attributes")]
    AccessorNotFound { policy: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for AuthzError {
    fn from(err: anyhow::Error) -> Self {
        AuthzError::Internal {
            message: err.to_string(),
        }
    }
}
