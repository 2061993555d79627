//! Construct-and-resolve helper for scopes

use super::Scope;
use crate::types::Record;
use tracing::debug;

/// Builds a fresh scope and returns its resolution unchanged
pub fn resolve<S: Scope>(
    user: Option<&S::User>,
    kind: &<S::Record as Record>::Kind,
) -> Option<Vec<S::Record>> {
    let records = S::new(user, kind).resolve();

    debug!(
        scope = %S::identity(),
        authenticated = user.is_some(),
        resolved = ?records.as_ref().map(Vec::len),
        "Resolved scope"
    );

    records
}
