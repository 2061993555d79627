//! Assertion surface for policy and scope tests.
//!
//! [`PolicySuite`] binds a test to the policy it exercises, either
//! explicitly through its type parameter or by convention from the test's
//! identity. Every method builds a fresh policy or scope.
//!
//! Two failure modes are kept apart:
//! - a decision that does not match the expectation panics, like `assert!`
//! - a test/policy mismatch (unknown identity, undefined predicate or
//!   accessor) is returned as [`AuthzError`](crate::AuthzError)

mod assertions;

pub use assertions::PolicySuite;
