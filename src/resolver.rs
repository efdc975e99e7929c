// classdex/src/resolver.rs
//! Type-resolver seam: turning index records into live type handles.
//! - `TypeResolver` is the injected capability; an unknown name is an
//!   explicit `None`, never an error
//! - `TableResolver` is a registry-style implementation for hosts that
//!   declare their types (and supertype edges) at startup

use std::collections::HashMap;
use std::hash::Hash;

/// Resolves fully-qualified names into opaque type handles.
pub trait TypeResolver {
    /// Resolved-type handle. Equality is identity: resolving the same name
    /// twice yields equal handles, so result sets deduplicate naturally.
    type Type: Clone + Eq + Hash;

    /// Resolve a fully-qualified name. `None` means the name is unknown to
    /// this resolver; callers skip such records, they never fail on them.
    fn resolve(&self, qualified_name: &str) -> Option<Self::Type>;

    /// Whether `candidate` is `ancestor` or a transitive subtype of it.
    fn is_subtype(&self, candidate: &Self::Type, ancestor: &Self::Type) -> bool;

    /// The fully-qualified name the handle was registered under.
    fn type_name(&self, ty: &Self::Type) -> String;
}

/// Cheap copyable handle into a [`TableResolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef(usize);

struct TypeEntry {
    name: String,
    supers: Vec<TypeRef>,
}

/// Append-only table of known types with declared supertype edges.
///
/// Supertype handles must exist before they can be extended, so edges always
/// point at earlier registrations and the subtype walk terminates.
#[derive(Default)]
pub struct TableResolver {
    entries: Vec<TypeEntry>,
    by_name: HashMap<String, TypeRef>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type with no declared supertypes. Re-registering a name
    /// returns the original handle.
    pub fn add(&mut self, name: &str) -> TypeRef {
        self.add_extending(name, &[])
    }

    /// Register a type extending the given supertypes.
    pub fn add_extending(&mut self, name: &str, supers: &[TypeRef]) -> TypeRef {
        if let Some(&existing) = self.by_name.get(name) {
            let entry = &mut self.entries[existing.0];
            for s in supers {
                if !entry.supers.contains(s) {
                    entry.supers.push(*s);
                }
            }
            return existing;
        }
        let handle = TypeRef(self.entries.len());
        self.entries.push(TypeEntry {
            name: name.to_string(),
            supers: supers.to_vec(),
        });
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeResolver for TableResolver {
    type Type = TypeRef;

    fn resolve(&self, qualified_name: &str) -> Option<TypeRef> {
        self.by_name.get(qualified_name).copied()
    }

    fn is_subtype(&self, candidate: &TypeRef, ancestor: &TypeRef) -> bool {
        if candidate == ancestor {
            return true;
        }
        let mut pending = vec![*candidate];
        while let Some(current) = pending.pop() {
            for s in &self.entries[current.0].supers {
                if s == ancestor {
                    return true;
                }
                pending.push(*s);
            }
        }
        false
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        self.entries[ty.0].name.clone()
    }
}

/* ================================== Tests ================================== */
