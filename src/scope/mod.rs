//! Scope abstraction and resolution.
//!
//! A [`Scope`] is built fresh from `(user, kind)` and resolves to the
//! records of that kind the user may access. `None` means "nothing
//! determined"; an empty list means "nothing permitted".

mod resolver;

pub use resolver::resolve;

use crate::policy::Policy;
use crate::types::Record;
use std::borrow::Cow;

/// Per-(user, record kind) resolver of permitted records
pub trait Scope: Sized {
    type User;
    type Record: Record;

    fn new(user: Option<&Self::User>, kind: &<Self::Record as Record>::Kind) -> Self;

    fn resolve(&self) -> Option<Vec<Self::Record>>;

    /// Identity matched against a test's derived scope identity
    ///
    /// Defaults to `std::any::type_name`, which includes the crate path;
    /// override it to bind with a short identity.
    fn identity() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// A policy with a nested scope over the same user and record types
pub trait ScopedPolicy: Policy {
    type Scope: Scope<User = Self::User, Record = Self::Record>;
}
