//! Policy abstraction and invocation.
//!
//! A [`Policy`] is built fresh from `(user, record)` for every call and
//! answers two questions:
//! - may this user perform an action on this record (`permitted`)
//! - which attributes may this user touch (`permitted_attributes`,
//!   optionally specialised per action with `permitted_attributes_for`)

mod invoker;

pub use invoker::{is_permitted, permitted_attributes};

use crate::types::{Action, AttributeSet};
use std::borrow::Cow;

/// Result of an attribute accessor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeAccess {
    /// The policy has no such accessor
    #[default]
    Undefined,

    /// The accessor's result; `None` means "no attributes determined",
    /// which is distinct from an empty set
    Defined(Option<AttributeSet>),
}

impl AttributeAccess {
    pub fn defined(attributes: Option<AttributeSet>) -> Self {
        AttributeAccess::Defined(attributes)
    }

    /// Accessor that permits exactly `attributes`
    pub fn permit(attributes: impl Into<AttributeSet>) -> Self {
        AttributeAccess::Defined(Some(attributes.into()))
    }

    /// Accessor that determines nothing
    pub fn undetermined() -> Self {
        AttributeAccess::Defined(None)
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, AttributeAccess::Defined(_))
    }
}

/// Per-(user, record) authorization decision object
///
/// # Examples
///
/// ```
/// use authz_assertions::{Action, AttributeAccess, Policy};
///
/// struct Comment;
///
/// struct CommentPolicy {
///     user: Option<String>,
/// }
///
/// impl Policy for CommentPolicy {
///     type User = String;
///     type Record = Comment;
///
///     fn new(user: Option<&String>, _record: &Comment) -> Self {
///         Self { user: user.cloned() }
///     }
///
///     fn permitted(&self, action: &Action) -> Option<bool> {
///         match action.as_str() {
///             "index" => Some(self.user.is_some()),
///             _ => None,
///         }
///     }
///
///     fn permitted_attributes(&self) -> AttributeAccess {
///         match self.user {
///             Some(_) => AttributeAccess::permit("content"),
///             None => AttributeAccess::undetermined(),
///         }
///     }
///
///     fn permitted_attributes_for(&self, action: &Action) -> AttributeAccess {
///         match (action.as_str(), &self.user) {
///             ("create", Some(_)) => AttributeAccess::permit(["content", "hidden"]),
///             ("create", None) => AttributeAccess::undetermined(),
///             _ => AttributeAccess::Undefined,
///         }
///     }
/// }
/// ```
pub trait Policy: Sized {
    /// Acting user; `None` at call sites means unauthenticated
    type User;

    /// Subject the decision is about
    type Record;

    fn new(user: Option<&Self::User>, record: &Self::Record) -> Self;

    /// Predicate for `action`, or `None` if the policy defines none
    fn permitted(&self, action: &Action) -> Option<bool>;

    /// Generic permitted attributes accessor
    fn permitted_attributes(&self) -> AttributeAccess {
        AttributeAccess::Undefined
    }

    /// Action-specific accessor, preferred over the generic one when defined
    fn permitted_attributes_for(&self, _action: &Action) -> AttributeAccess {
        AttributeAccess::Undefined
    }

    /// Identity matched against a test's derived policy identity
    ///
    /// Defaults to `std::any::type_name`, which includes the crate path;
    /// override it to bind with a short identity.
    fn identity() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}
