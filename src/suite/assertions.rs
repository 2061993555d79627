//! Policy and scope assertions

use crate::error::{AuthzError, Result};
use crate::identity::TestIdentity;
use crate::policy::{self, Policy};
use crate::scope::{self, Scope, ScopedPolicy};
use crate::types::{Action, AttributeSet, Record};
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use tracing::trace;

/// Assertion helpers bound to one policy (and its scope)
///
/// # Examples
///
/// ```
/// use authz_assertions::{Action, Policy, PolicySuite};
/// use std::borrow::Cow;
///
/// #[derive(Debug)]
/// struct Comment;
///
/// struct CommentPolicy {
///     signed_in: bool,
/// }
///
/// impl Policy for CommentPolicy {
///     type User = String;
///     type Record = Comment;
///
///     fn new(user: Option<&String>, _record: &Comment) -> Self {
///         Self { signed_in: user.is_some() }
///     }
///
///     fn permitted(&self, action: &Action) -> Option<bool> {
///         (action.as_str() == "index").then_some(self.signed_in)
///     }
///
///     fn identity() -> Cow<'static, str> {
///         Cow::Borrowed("blog::CommentPolicy")
///     }
/// }
///
/// // explicit binding, no identity checks
/// const SUITE: PolicySuite<CommentPolicy> = PolicySuite::new();
/// SUITE.refute_permitted(None, &Comment, "index")?;
///
/// // convention binding, every call checks that the test identity
/// // derives the identity of `CommentPolicy`
/// let suite = PolicySuite::<CommentPolicy>::for_test("blog::CommentPolicyTest");
/// suite.assert_permitted(Some(&"alice".to_string()), &Comment, "index")?;
///
/// let other = PolicySuite::<CommentPolicy>::for_test("blog::PostPolicyTest");
/// assert!(other.is_permitted(None, &Comment, "index").is_err());
/// # Ok::<(), authz_assertions::AuthzError>(())
/// ```
pub struct PolicySuite<P> {
    identity: Option<TestIdentity>,
    _policy: PhantomData<fn() -> P>,
}

impl<P> PolicySuite<P> {
    /// Binds the suite to `P` without identity checks
    pub const fn new() -> Self {
        Self {
            identity: None,
            _policy: PhantomData,
        }
    }

    /// Binds the suite to `P` through the identity of the calling test
    ///
    /// The derived identities are compared with [`Policy::identity`] and
    /// [`Scope::identity`]. Their defaults are `std::any::type_name`, which
    /// carries the full crate path (`my_crate::blog::CommentPolicy`), so a
    /// short identity such as `"blog::CommentPolicyTest"` only resolves when
    /// the policy and its scope override `identity()`.
    pub fn for_test(identity: impl Into<TestIdentity>) -> Self {
        Self {
            identity: Some(identity.into()),
            _policy: PhantomData,
        }
    }

    pub fn identity(&self) -> Option<&TestIdentity> {
        self.identity.as_ref()
    }
}

impl<P> Default for PolicySuite<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for PolicySuite<P> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            _policy: PhantomData,
        }
    }
}

impl<P> Debug for PolicySuite<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicySuite")
            .field("policy", &std::any::type_name::<P>())
            .field("identity", &self.identity)
            .finish()
    }
}

impl<P> PolicySuite<P>
where
    P: Policy,
    P::User: Debug,
    P::Record: Debug,
{
    fn resolve_policy(&self) -> Result<()> {
        let Some(identity) = &self.identity else {
            return Ok(());
        };

        let derived = identity.policy_identity();
        let bound = P::identity();
        if derived != bound {
            return Err(AuthzError::PolicyNotFound {
                identity: derived,
                bound: bound.into_owned(),
            });
        }
        Ok(())
    }

    /// Whether `user` may perform `action` on `record`
    pub fn is_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: impl Into<Action>,
    ) -> Result<bool> {
        self.resolve_policy()?;
        policy::is_permitted::<P>(user, record, &action.into())
    }

    #[track_caller]
    pub fn assert_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: impl Into<Action>,
    ) -> Result<()> {
        let action = action.into();
        let permitted = self.is_permitted(user, record, action.clone())?;
        assert!(
            permitted,
            "User {} should be permitted to {} {:?}, but isn't permitted",
            describe_user(user),
            action,
            record
        );
        Ok(())
    }

    #[track_caller]
    pub fn assert_not_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: impl Into<Action>,
    ) -> Result<()> {
        let action = action.into();
        let permitted = self.is_permitted(user, record, action.clone())?;
        assert!(
            !permitted,
            "User {} should NOT be permitted to {} {:?}, but is permitted",
            describe_user(user),
            action,
            record
        );
        Ok(())
    }

    /// Alias of [`assert_not_permitted`](Self::assert_not_permitted)
    #[track_caller]
    pub fn refute_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: impl Into<Action>,
    ) -> Result<()> {
        self.assert_not_permitted(user, record, action)
    }

    /// Attributes `user` may touch on `record`, `None` if undetermined
    pub fn permitted_attributes(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: Option<&str>,
    ) -> Result<Option<AttributeSet>> {
        self.resolve_policy()?;
        let action = action.map(Action::from);
        policy::permitted_attributes::<P>(user, record, action.as_ref())
    }

    /// Passes when the permitted attributes are determined and non-empty
    #[track_caller]
    pub fn assert_permitted_attributes(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: Option<&str>,
    ) -> Result<()> {
        let permitted = self.permitted_attributes(user, record, action)?;
        assert!(
            permitted.as_ref().is_some_and(|set| !set.is_empty()),
            "User {} should have permitted attributes{} on {:?}, but got {}",
            describe_user(user),
            describe_action(action),
            record,
            describe_attributes(permitted.as_ref())
        );
        Ok(())
    }

    /// Passes only when the permitted attributes are undetermined; an
    /// empty set fails
    #[track_caller]
    pub fn assert_no_permitted_attributes(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        action: Option<&str>,
    ) -> Result<()> {
        let permitted = self.permitted_attributes(user, record, action)?;
        assert!(
            permitted.is_none(),
            "User {} should have no permitted attributes{} on {:?}, but got {}",
            describe_user(user),
            describe_action(action),
            record,
            describe_attributes(permitted.as_ref())
        );
        Ok(())
    }

    /// Passes when every one of `attributes` is permitted
    #[track_caller]
    pub fn assert_attributes_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        attributes: impl Into<AttributeSet>,
        action: Option<&str>,
    ) -> Result<()> {
        let attributes = attributes.into();
        let permitted = self.permitted_attributes(user, record, action)?;
        let missing = attributes.missing_from(permitted.as_ref());
        trace!(expected = %attributes, missing = missing.len(), "Compared permitted attributes");

        assert!(
            missing.is_empty(),
            "User {} should be permitted attributes {}{} on {:?}, but {} not permitted (permitted: {})",
            describe_user(user),
            attributes,
            describe_action(action),
            record,
            missing.iter().map(|a| (*a).clone()).collect::<AttributeSet>(),
            describe_attributes(permitted.as_ref())
        );
        Ok(())
    }

    /// Passes when none of `attributes` is permitted
    #[track_caller]
    pub fn assert_attributes_not_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        attributes: impl Into<AttributeSet>,
        action: Option<&str>,
    ) -> Result<()> {
        let attributes = attributes.into();
        let permitted = self.permitted_attributes(user, record, action)?;
        let missing = attributes.missing_from(permitted.as_ref());
        trace!(expected = %attributes, missing = missing.len(), "Compared permitted attributes");

        assert!(
            missing.len() == attributes.len(),
            "User {} should NOT be permitted attributes {}{} on {:?}, but permitted: {}",
            describe_user(user),
            attributes,
            describe_action(action),
            record,
            describe_attributes(permitted.as_ref())
        );
        Ok(())
    }

    /// Alias of [`assert_attributes_not_permitted`](Self::assert_attributes_not_permitted)
    #[track_caller]
    pub fn assert_not_attributes_permitted(
        &self,
        user: Option<&P::User>,
        record: &P::Record,
        attributes: impl Into<AttributeSet>,
        action: Option<&str>,
    ) -> Result<()> {
        self.assert_attributes_not_permitted(user, record, attributes, action)
    }
}

impl<P> PolicySuite<P>
where
    P: ScopedPolicy,
    P::User: Debug,
    P::Record: Record,
{
    fn resolve_scope(&self) -> Result<()> {
        let Some(identity) = &self.identity else {
            return Ok(());
        };

        let derived = identity.scope_identity();
        let bound = <P::Scope as Scope>::identity();
        if derived != bound {
            return Err(AuthzError::ScopeNotFound {
                identity: derived,
                bound: bound.into_owned(),
            });
        }
        Ok(())
    }

    /// Records of `kind` that `user` may access
    ///
    /// Fails the calling test if the scope resolves to nothing; a scope
    /// expresses "nothing permitted" with an empty list.
    #[track_caller]
    pub fn scope(
        &self,
        user: Option<&P::User>,
        kind: &<P::Record as Record>::Kind,
    ) -> Result<Vec<P::Record>> {
        self.resolve_scope()?;
        let Some(records) = scope::resolve::<P::Scope>(user, kind) else {
            panic!(
                "Scope {} for user {} resolved to nothing, expected a list of records",
                <P::Scope as Scope>::identity(),
                describe_user(user)
            );
        };
        Ok(records)
    }

    /// Passes when each record is in the scope resolved for its own kind
    #[track_caller]
    pub fn assert_scope_includes<'a>(
        &self,
        user: Option<&P::User>,
        records: impl IntoIterator<Item = &'a P::Record>,
    ) -> Result<()>
    where
        P::Record: 'a,
    {
        for record in records {
            let resolved = self.scope(user, &record.kind())?;
            assert!(
                resolved.contains(record),
                "User {} should have {:?} in scope, but it is not included",
                describe_user(user),
                record
            );
        }
        Ok(())
    }

    /// Passes when each record is absent from the scope resolved for its
    /// own kind. A scope that resolves to nothing excludes every record.
    #[track_caller]
    pub fn assert_scope_not_includes<'a>(
        &self,
        user: Option<&P::User>,
        records: impl IntoIterator<Item = &'a P::Record>,
    ) -> Result<()>
    where
        P::Record: 'a,
    {
        self.resolve_scope()?;
        for record in records {
            let resolved = scope::resolve::<P::Scope>(user, &record.kind());
            assert!(
                resolved.map_or(true, |resolved| !resolved.contains(record)),
                "User {} should NOT have {:?} in scope, but it is included",
                describe_user(user),
                record
            );
        }
        Ok(())
    }

    /// Alias of [`assert_scope_not_includes`](Self::assert_scope_not_includes)
    #[track_caller]
    pub fn refute_scope_includes<'a>(
        &self,
        user: Option<&P::User>,
        records: impl IntoIterator<Item = &'a P::Record>,
    ) -> Result<()>
    where
        P::Record: 'a,
    {
        self.assert_scope_not_includes(user, records)
    }

    /// Passes when the scope resolves to an empty list; resolving to
    /// nothing fails
    #[track_caller]
    pub fn assert_scope_empty(
        &self,
        user: Option<&P::User>,
        kind: &<P::Record as Record>::Kind,
    ) -> Result<()> {
        let resolved = self.scope(user, kind)?;
        assert!(
            resolved.is_empty(),
            "Scope for user {} should be empty, but resolved to {:?}",
            describe_user(user),
            resolved
        );
        Ok(())
    }
}

fn describe_user<U: Debug>(user: Option<&U>) -> String {
    match user {
        Some(user) => format!("{:?}", user),
        None => "(none)".to_string(),
    }
}

fn describe_action(action: Option<&str>) -> String {
    action.map(|a| format!(" for {}", a)).unwrap_or_default()
}

fn describe_attributes(attributes: Option<&AttributeSet>) -> String {
    match attributes {
        Some(set) => set.to_string(),
        None => "nothing determined".to_string(),
    }
}
