//! # Authorization Assertions (authz-assertions)
//!
//! Assertion helpers for testing authorization policies with support for:
//! - Permission predicates per action
//! - Permitted attribute sets (generic and action-specific)
//! - Scope resolution for "all records of a kind"
//! - Convention-based binding of a test suite to the policy it exercises
//!
//! Every call builds a fresh policy or scope instance. Assertion failures
//! panic like `assert!`; resolution failures come back as [`AuthzError`].
//!
//! ## Example
//!
//! ```rust
//! use authz_assertions::{AttributeAccess, Action, Policy, PolicySuite};
//!
//! #[derive(Debug)]
//! struct Note;
//!
//! struct NotePolicy {
//!     signed_in: bool,
//! }
//!
//! impl Policy for NotePolicy {
//!     type User = String;
//!     type Record = Note;
//!
//!     fn new(user: Option<&String>, _record: &Note) -> Self {
//!         Self { signed_in: user.is_some() }
//!     }
//!
//!     fn permitted(&self, action: &Action) -> Option<bool> {
//!         match action.as_str() {
//!             "index" => Some(self.signed_in),
//!             _ => None,
//!         }
//!     }
//!
//!     fn permitted_attributes(&self) -> AttributeAccess {
//!         AttributeAccess::defined(self.signed_in.then(|| ["body"].into()))
//!     }
//! }
//!
//! # fn main() -> authz_assertions::Result<()> {
//! let suite = PolicySuite::<NotePolicy>::new();
//! let alice = "alice".to_string();
//!
//! suite.assert_permitted(Some(&alice), &Note, "index")?;
//! suite.refute_permitted(None, &Note, "index")?;
//! suite.assert_attributes_permitted(Some(&alice), &Note, "body", None)?;
//! suite.assert_no_permitted_attributes(None, &Note, None)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod identity;
pub mod policy;
pub mod scope;
pub mod suite;
pub mod types;

pub use error::{AuthzError, Result};
pub use identity::{IdentityConfig, TestIdentity};
pub use policy::{AttributeAccess, Policy};
pub use scope::{Scope, ScopedPolicy};
pub use suite::PolicySuite;
pub use types::{Action, Attribute, AttributeSet, Record};
