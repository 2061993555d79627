//! Identity resolution for convention-bound test suites.
//!
//! A suite may be tied to the policy it exercises through its own name:
//! - `blog::CommentPolicyTest` exercises `blog::CommentPolicy`
//! - its scope is `blog::CommentPolicy::Scope`
//! - `blog::CommentPolicyTest::Scope` resolves to the same scope
//!
//! The convention is a precondition. Nothing here checks that an identity
//! is well formed; a derived identity that names no bound type surfaces
//! later as a resolution error.

mod resolver;

pub use resolver::{IdentityConfig, TestIdentity};

/// Default marker removed from a test identity to obtain the policy identity
pub const TEST_MARKER: &str = "Test";

/// Default qualifier naming the scope nested in a policy
pub const SCOPE_QUALIFIER: &str = "::Scope";
