//! Core value types shared by policies, scopes and assertions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation a predicate or attribute accessor is selected by
/// (e.g. "index", "create")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identifier of a record field a user may read or write
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(String);

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Ordered collection of attribute identifiers
///
/// An empty set means "determined, and none are permitted". The
/// undetermined case is `Option::<AttributeSet>::None` and is never
/// collapsed into an empty set by this crate.
///
/// A single attribute converts into a one-element set:
///
/// ```
/// use authz_assertions::AttributeSet;
///
/// let one: AttributeSet = "content".into();
/// let many: AttributeSet = ["content", "hidden"].into();
/// assert_eq!(one.len(), 1);
/// assert!(many.contains(&"hidden".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(Vec<Attribute>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, attribute: &Attribute) -> bool {
        self.0.contains(attribute)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Attributes of `self` that are not in `permitted`.
    ///
    /// An undetermined (`None`) permitted set counts as empty.
    pub fn missing_from(&self, permitted: Option<&AttributeSet>) -> Vec<&Attribute> {
        self.0
            .iter()
            .filter(|attribute| !permitted.is_some_and(|set| set.contains(attribute)))
            .collect()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, attribute) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", attribute)?;
        }
        write!(f, "]")
    }
}

impl<A: Into<Attribute>> FromIterator<A> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Attribute> for AttributeSet {
    fn from(attribute: Attribute) -> Self {
        Self(vec![attribute])
    }
}

impl From<&str> for AttributeSet {
    fn from(attribute: &str) -> Self {
        Self(vec![attribute.into()])
    }
}

impl<A: Into<Attribute>> From<Vec<A>> for AttributeSet {
    fn from(attributes: Vec<A>) -> Self {
        attributes.into_iter().collect()
    }
}

impl<A: Into<Attribute>, const N: usize> From<[A; N]> for AttributeSet {
    fn from(attributes: [A; N]) -> Self {
        attributes.into_iter().collect()
    }
}

/// A record that scopes can be resolved against.
///
/// `Kind` stands in for "all records of this kind": it is what a scope is
/// constructed from, and what the scope assertions resolve for a record's
/// own kind.
pub trait Record: PartialEq + fmt::Debug {
    type Kind;

    fn kind(&self) -> Self::Kind;
}
