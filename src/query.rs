// classdex/src/query.rs
//! Public queries over the pre-built sidecar indexes, plus the fixed naming
//! convention that maps a domain identifier to a logical resource path.

use anyhow::{
    Result,
    anyhow
};
use std::collections::HashSet;
use crate::{
    loader::ModuleLoader,
    merge::merge_records,
    resolve::{resolve_direct, resolve_in_package},
    resolver::TypeResolver,
};

pub const SUBCLASS_INDEX_PREFIX: &str = "META-INF/services/";
pub const ANNOTATED_INDEX_PREFIX: &str = "META-INF/annotations/";
pub const PACKAGE_INDEX_NAME: &str = "jaxb.index";
pub const JAVADOC_PREFIX: &str = "META-INF/javadocs/";

/// Logical path of the subclass index for a type name.
pub fn subclass_index_path(type_name: &str) -> String {
    format!("{SUBCLASS_INDEX_PREFIX}{type_name}")
}

/// Logical path of the annotation index for a marker name.
pub fn annotated_index_path(annotation_name: &str) -> String {
    format!("{ANNOTATED_INDEX_PREFIX}{annotation_name}")
}

/// Logical path of the membership index for a package.
pub fn package_index_path(package: &str) -> String {
    format!("{}/{}", package.replace('.', "/"), PACKAGE_INDEX_NAME)
}

/// Logical path of the documentation sidecar for a type name.
pub fn javadoc_path(type_name: &str) -> String {
    format!("{JAVADOC_PREFIX}{type_name}")
}

/* ----------------------------- record level ----------------------------- */

/// Raw merged records of the subclass index for `superclass_name`.
pub fn subclass_entries<L: ModuleLoader>(
    loader: &L,
    superclass_name: &str,
) -> Result<HashSet<String>> {
    merge_records(loader, &subclass_index_path(superclass_name))
}

/// Raw merged records of the annotation index for `annotation_name`.
pub fn annotated_entries<L: ModuleLoader>(
    loader: &L,
    annotation_name: &str,
) -> Result<HashSet<String>> {
    merge_records(loader, &annotated_index_path(annotation_name))
}

/// Raw merged records of the membership index for `package`.
pub fn package_entries<L: ModuleLoader>(loader: &L, package: &str) -> Result<HashSet<String>> {
    merge_records(loader, &package_index_path(package))
}

/* ----------------------------- handle level ----------------------------- */

/// All indexed subclasses of `superclass`.
///
/// Unresolvable records are skipped, but a record that resolves to a type
/// which does not actually extend `superclass` is a data-integrity failure:
/// the generated index and the loaded types disagree, so the whole query
/// fails rather than return a wrong set.
pub fn subclasses_of<L, R>(
    loader: &L,
    resolver: &R,
    superclass: &R::Type,
) -> Result<HashSet<R::Type>>
where
    L: ModuleLoader,
    R: TypeResolver,
{
    let superclass_name = resolver.type_name(superclass);
    let entries = subclass_entries(loader, &superclass_name)?;
    let classes = resolve_direct(resolver, &entries);

    for class in &classes {
        if !resolver.is_subtype(class, superclass) {
            return Err(anyhow!(
                "class '{}' is not a subclass of '{}'",
                resolver.type_name(class),
                superclass_name
            ));
        }
    }
    Ok(classes)
}

/// All types annotated with `annotation`.
pub fn annotated_with<L, R>(
    loader: &L,
    resolver: &R,
    annotation: &R::Type,
) -> Result<HashSet<R::Type>>
where
    L: ModuleLoader,
    R: TypeResolver,
{
    let entries = annotated_entries(loader, &resolver.type_name(annotation))?;
    Ok(resolve_direct(resolver, &entries))
}

/// All types recorded in `package`'s membership index.
///
/// Bare records are qualified with the package; records that are already
/// fully qualified resolve as-is. Both passes feed one result set.
pub fn package_classes<L, R>(loader: &L, resolver: &R, package: &str) -> Result<HashSet<R::Type>>
where
    L: ModuleLoader,
    R: TypeResolver,
{
    let entries = package_entries(loader, package)?;
    let mut classes = resolve_in_package(resolver, package, &entries);
    classes.extend(resolve_direct(resolver, &entries));
    Ok(classes)
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryLoader;
    use crate::resolver::TableResolver;

    #[test]
    fn path_conventions() {
        assert_eq!(
            subclass_index_path("com.example.Engine"),
            "META-INF/services/com.example.Engine"
        );
        assert_eq!(
            annotated_index_path("com.example.Marker"),
            "META-INF/annotations/com.example.Marker"
        );
        assert_eq!(package_index_path("com.example.parts"), "com/example/parts/jaxb.index");
        assert_eq!(javadoc_path("com.example.Engine"), "META-INF/javadocs/com.example.Engine");
    }

    #[test]
    fn subclasses_resolve_and_verify() {
        let mut table = TableResolver::new();
        let engine = table.add("com.example.Engine");
        let turbo = table.add_extending("com.example.Turbo", &[engine]);
        let slow = table.add_extending("com.example.Slow", &[engine]);

        let mut loader = MemoryLoader::new();
        loader.insert(
            "META-INF/services/com.example.Engine",
            "com.example.Turbo\ncom.example.Slow\ncom.example.Retired\n",
        );

        let classes = subclasses_of(&loader, &table, &engine).unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.contains(&turbo));
        assert!(classes.contains(&slow));
    }

    #[test]
    fn subclass_query_fails_on_non_subtype_record() {
        let mut table = TableResolver::new();
        let engine = table.add("com.example.Engine");
        table.add("com.example.Unrelated");

        let mut loader = MemoryLoader::new();
        loader.insert("META-INF/services/com.example.Engine", "com.example.Unrelated\n");

        let err = subclasses_of(&loader, &table, &engine).unwrap_err();
        assert!(err.to_string().contains("com.example.Unrelated"));
        assert!(err.to_string().contains("not a subclass"));
    }

    #[test]
    fn annotated_query_skips_unknown_records() {
        let mut table = TableResolver::new();
        let marker = table.add("com.example.Marker");
        let tagged = table.add("com.example.Tagged");

        let mut loader = MemoryLoader::new();
        loader.insert(
            "META-INF/annotations/com.example.Marker",
            "com.example.Tagged\ncom.example.Removed\n",
        );

        let classes = annotated_with(&loader, &table, &marker).unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes.contains(&tagged));
    }

    #[test]
    fn package_query_unions_scoped_and_direct_passes() {
        let mut table = TableResolver::new();
        let widget = table.add("com.example.Widget");
        let alien = table.add("other.Alien");

        let mut loader = MemoryLoader::new();
        // A bare member plus a fully-qualified record from another package.
        loader.insert("com/example/jaxb.index", "Widget\nother.Alien\n");

        let classes = package_classes(&loader, &table, "com.example").unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.contains(&widget));
        assert!(classes.contains(&alien));
    }

    #[test]
    fn queries_return_empty_sets_when_nothing_is_indexed() {
        let table = {
            let mut t = TableResolver::new();
            t.add("com.example.Engine");
            t
        };
        let engine = table.resolve("com.example.Engine").unwrap();
        let loader = MemoryLoader::new();

        assert!(subclasses_of(&loader, &table, &engine).unwrap().is_empty());
        assert!(annotated_with(&loader, &table, &engine).unwrap().is_empty());
        assert!(package_classes(&loader, &table, "com.example").unwrap().is_empty());
    }
}
