//! Construct-and-call helpers for policies

use super::{AttributeAccess, Policy};
use crate::error::{AuthzError, Result};
use crate::types::{Action, AttributeSet};
use tracing::debug;

/// Returns exactly what the policy's predicate for `action` returns
///
/// # Errors
///
/// `AuthzError::PredicateNotFound` if the policy defines no predicate for
/// `action`.
pub fn is_permitted<P: Policy>(
    user: Option<&P::User>,
    record: &P::Record,
    action: &Action,
) -> Result<bool> {
    let policy = P::new(user, record);

    let permitted = policy
        .permitted(action)
        .ok_or_else(|| AuthzError::PredicateNotFound {
            policy: P::identity().into_owned(),
            action: action.to_string(),
        })?;

    debug!(
        policy = %P::identity(),
        action = %action,
        authenticated = user.is_some(),
        permitted,
        "Evaluated predicate"
    );

    Ok(permitted)
}

/// Returns the policy's permitted attributes, `None` meaning undetermined
///
/// With an action, the action-specific accessor is used when the policy
/// defines one; otherwise the generic accessor is used.
///
/// # Errors
///
/// `AuthzError::AccessorNotFound` if the generic accessor is needed but
/// undefined.
pub fn permitted_attributes<P: Policy>(
    user: Option<&P::User>,
    record: &P::Record,
    action: Option<&Action>,
) -> Result<Option<AttributeSet>> {
    let policy = P::new(user, record);

    if let Some(action) = action {
        if let AttributeAccess::Defined(attributes) = policy.permitted_attributes_for(action) {
            debug!(
                policy = %P::identity(),
                action = %action,
                determined = attributes.is_some(),
                "Resolved action-specific permitted attributes"
            );
            return Ok(attributes);
        }
    }

    match policy.permitted_attributes() {
        AttributeAccess::Defined(attributes) => {
            debug!(
                policy = %P::identity(),
                determined = attributes.is_some(),
                "Resolved permitted attributes"
            );
            Ok(attributes)
        }
        AttributeAccess::Undefined => Err(AuthzError::AccessorNotFound {
            policy: P::identity().into_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::cell::Cell;

    thread_local! {
        static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    }

    struct Doc;

    struct DocPolicy {
        signed_in: bool,
    }

    impl Policy for DocPolicy {
        type User = u32;
        type Record = Doc;

        fn new(user: Option<&u32>, _record: &Doc) -> Self {
            CONSTRUCTED.with(|count| count.set(count.get() + 1));
            Self {
                signed_in: user.is_some(),
            }
        }

        fn permitted(&self, action: &Action) -> Option<bool> {
            (action.as_str() == "show").then_some(self.signed_in)
        }

        fn permitted_attributes(&self) -> AttributeAccess {
            AttributeAccess::permit("title")
        }

        fn permitted_attributes_for(&self, action: &Action) -> AttributeAccess {
            match action.as_str() {
                "update" if self.signed_in => AttributeAccess::permit(["title", "body"]),
                "update" => AttributeAccess::permit(Vec::<&str>::new()),
                _ => AttributeAccess::Undefined,
            }
        }

        fn identity() -> Cow<'static, str> {
            Cow::Borrowed("docs::DocPolicy")
        }
    }

    struct BarePolicy;

    impl Policy for BarePolicy {
        type User = u32;
        type Record = Doc;

        fn new(_user: Option<&u32>, _record: &Doc) -> Self {
            BarePolicy
        }

        fn permitted(&self, _action: &Action) -> Option<bool> {
            None
        }
    }

    #[test]
    fn test_is_permitted_returns_predicate() {
        assert!(is_permitted::<DocPolicy>(Some(&1), &Doc, &"show".into()).unwrap());
        assert!(!is_permitted::<DocPolicy>(None, &Doc, &"show".into()).unwrap());
    }

    #[test]
    fn test_undefined_predicate() {
        let err = is_permitted::<DocPolicy>(Some(&1), &Doc, &"destroy".into()).unwrap_err();
        assert_eq!(
            err,
            AuthzError::PredicateNotFound {
                policy: "docs::DocPolicy".to_string(),
                action: "destroy".to_string(),
            }
        );
    }

    #[test]
    fn test_fresh_instance_per_call() {
        CONSTRUCTED.with(|count| count.set(0));

        is_permitted::<DocPolicy>(Some(&1), &Doc, &"show".into()).unwrap();
        is_permitted::<DocPolicy>(Some(&1), &Doc, &"show".into()).unwrap();
        permitted_attributes::<DocPolicy>(Some(&1), &Doc, None).unwrap();

        assert_eq!(CONSTRUCTED.with(Cell::get), 3);
    }

    #[test]
    fn test_action_specific_accessor_preferred() {
        let attributes =
            permitted_attributes::<DocPolicy>(Some(&1), &Doc, Some(&"update".into())).unwrap();
        assert_eq!(attributes, Some(["title", "body"].into()));

        // empty stays empty, it is not turned into "undetermined"
        let attributes =
            permitted_attributes::<DocPolicy>(None, &Doc, Some(&"update".into())).unwrap();
        assert_eq!(attributes, Some(AttributeSet::new()));
    }

    #[test]
    fn test_falls_back_to_generic_accessor() {
        let attributes =
            permitted_attributes::<DocPolicy>(Some(&1), &Doc, Some(&"create".into())).unwrap();
        assert_eq!(attributes, Some("title".into()));

        let attributes = permitted_attributes::<DocPolicy>(Some(&1), &Doc, None).unwrap();
        assert_eq!(attributes, Some("title".into()));
    }

    #[test]
    fn test_undefined_generic_accessor() {
        let err = permitted_attributes::<BarePolicy>(None, &Doc, Some(&"create".into())).unwrap_err();
        assert!(matches!(err, AuthzError::AccessorNotFound { .. }));
        assert!(err.to_string().contains("BarePolicy"));
    }
}
