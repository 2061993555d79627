//! Derivation of policy and scope identities from a test identity

use super::{SCOPE_QUALIFIER, TEST_MARKER};
use std::fmt;

/// Configuration for identity derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Substring removed from the test identity (every occurrence)
    pub test_marker: String,

    /// Suffix naming the scope nested in a policy
    pub scope_qualifier: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            test_marker: TEST_MARKER.to_string(),
            scope_qualifier: SCOPE_QUALIFIER.to_string(),
        }
    }
}

/// Fully-qualified identity of a test suite
///
/// # Examples
///
/// ```
/// use authz_assertions::TestIdentity;
///
/// let identity = TestIdentity::new("blog::CommentPolicyTest");
/// assert_eq!(identity.policy_identity(), "blog::CommentPolicy");
/// assert_eq!(identity.scope_identity(), "blog::CommentPolicy::Scope");
///
/// let scope_test = TestIdentity::new("blog::CommentPolicyTest::Scope");
/// assert_eq!(scope_test.scope_identity(), "blog::CommentPolicy::Scope");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    raw: String,
    config: IdentityConfig,
}

impl TestIdentity {
    /// Creates a test identity using the default marker and qualifier
    pub fn new(identity: impl Into<String>) -> Self {
        Self::with_config(identity, IdentityConfig::default())
    }

    pub fn with_config(identity: impl Into<String>, config: IdentityConfig) -> Self {
        Self {
            raw: identity.into(),
            config,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// Identity of the policy this test exercises
    pub fn policy_identity(&self) -> String {
        if self.config.test_marker.is_empty() {
            return self.raw.clone();
        }
        self.raw.replace(&self.config.test_marker, "")
    }

    /// Identity of the scope nested in the exercised policy
    pub fn scope_identity(&self) -> String {
        let mut identity = self.policy_identity();
        if !identity.ends_with(&self.config.scope_qualifier) {
            identity.push_str(&self.config.scope_qualifier);
        }
        identity
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for TestIdentity {
    fn from(identity: &str) -> Self {
        Self::new(identity)
    }
}
