// classdex/src/resolve.rs

use std::collections::HashSet;
use crate::resolver::TypeResolver;

/// Separator inside qualified names; a record containing it is already
/// qualified.
pub const QUALIFIER: char = '.';

/// Resolve every record as a fully-qualified name.
///
/// Records unknown to the resolver are dropped silently; a stale index
/// entry is expected operating data, not an error. Duplicates collapse via
/// handle equality.
pub fn resolve_direct<R: TypeResolver>(resolver: &R, records: &HashSet<String>) -> HashSet<R::Type> {
    let mut types = HashSet::new();
    for record in records {
        match resolver.resolve(record) {
            Some(ty) => {
                types.insert(ty);
            }
            None => tracing::trace!("unresolved index record: {record}"),
        }
    }
    types
}

/// Resolve bare records against a target package.
///
/// Records that already carry a qualifier are skipped outright; they either
/// belong to another package or are malformed for this context. Bare names
/// are qualified as `<package>.<name>` and resolved under the direct rule.
pub fn resolve_in_package<R: TypeResolver>(
    resolver: &R,
    package: &str,
    records: &HashSet<String>,
) -> HashSet<R::Type> {
    let mut types = HashSet::new();
    for record in records {
        if record.contains(QUALIFIER) {
            continue;
        }
        let qualified = format!("{package}{QUALIFIER}{record}");
        match resolver.resolve(&qualified) {
            Some(ty) => {
                types.insert(ty);
            }
            None => tracing::trace!("unresolved package record: {qualified}"),
        }
    }
    types
}

/* ================================== Tests ================================== */
