// classdex/src/loader.rs
//! Module-loader seam: where sidecar index resources come from.
//! - `ModuleLoader` is the injected capability the engine reads through
//! - `PathLoader` is the production implementation over plain directories
//! - `MemoryLoader` serves embedded or test-supplied index data

use anyhow::{
    Context,
    Result
};
use std::{
    collections::HashMap,
    fs::File,
    io::{
        Cursor,
        ErrorKind,
        Read
    },
    path::{
        Path,
        PathBuf
    },
};

/// Supplies physical resource locations for a logical sidecar path.
///
/// Several independent sources (directories, archives, embedded bundles) may
/// expose the same logical path; `enumerate` returns one location per source.
/// Every engine call takes its loader as an explicit argument; there is no
/// ambient "current loader" anywhere in this crate.
pub trait ModuleLoader {
    /// Opaque handle to one physical instance of a resource. Constructed and
    /// owned by the loader; the engine only iterates over them.
    type Location;

    /// All locations exposing `logical_path`, in no guaranteed order.
    /// May be empty.
    fn enumerate(&self, logical_path: &str) -> Result<Vec<Self::Location>>;

    /// First location exposing `logical_path`, if any. Used where the
    /// convention is one resource per type (javadoc sidecars), never merged.
    fn locate(&self, logical_path: &str) -> Result<Option<Self::Location>> {
        Ok(self.enumerate(logical_path)?.into_iter().next())
    }

    /// Open a location for reading. `Ok(None)` means the location was
    /// enumerated but no longer exists: some loaders report the same
    /// logical path twice with one stale entry, and callers skip those.
    fn open(&self, location: &Self::Location) -> Result<Option<Box<dyn Read>>>;
}

/// Filesystem loader over an ordered list of root directories.
///
/// The classpath analogue: each root may carry its own copy of a sidecar
/// index under the same relative path, and all copies contribute to a merge.
pub struct PathLoader {
    roots: Vec<PathBuf>,
}

impl PathLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ModuleLoader for PathLoader {
    type Location = PathBuf;

    fn enumerate(&self, logical_path: &str) -> Result<Vec<PathBuf>> {
        let rel = Path::new(logical_path);
        let mut found = Vec::new();
        for root in &self.roots {
            let candidate = root.join(rel);
            if candidate.is_file() {
                found.push(candidate);
            }
        }
        Ok(found)
    }

    fn open(&self, location: &PathBuf) -> Result<Option<Box<dyn Read>>> {
        match File::open(location) {
            Ok(f) => Ok(Some(Box::new(f))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("enumerated location vanished: {}", location.display());
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("open {}", location.display())),
        }
    }
}

/// In-memory loader for embedded or test-supplied index data.
///
/// Each `insert` adds one more location for the logical path, so merge
/// semantics across several contributing sources can be exercised without
/// touching a filesystem. Locations are `(path, ordinal)` pairs; opening a
/// pair the loader no longer knows is the stale-entry case and yields
/// `Ok(None)` like any other loader.
#[derive(Default)]
pub struct MemoryLoader {
    resources: HashMap<String, Vec<Vec<u8>>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one resource instance at `logical_path`.
    pub fn insert(&mut self, logical_path: &str, contents: impl Into<Vec<u8>>) {
        self.resources
            .entry(logical_path.to_string())
            .or_default()
            .push(contents.into());
    }
}

impl ModuleLoader for MemoryLoader {
    type Location = (String, usize);

    fn enumerate(&self, logical_path: &str) -> Result<Vec<(String, usize)>> {
        let n = self.resources.get(logical_path).map_or(0, Vec::len);
        Ok((0..n).map(|i| (logical_path.to_string(), i)).collect())
    }

    fn open(&self, location: &(String, usize)) -> Result<Option<Box<dyn Read>>> {
        let (path, ordinal) = location;
        match self.resources.get(path).and_then(|v| v.get(*ordinal)) {
            Some(bytes) => Ok(Some(Box::new(Cursor::new(bytes.clone())))),
            None => Ok(None),
        }
    }
}

/* ================================== Tests ================================== */

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn path_loader_enumerates_every_root() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write(a.path(), "META-INF/services/x.Y", "one\n");
        write(b.path(), "META-INF/services/x.Y", "two\n");

        let loader = PathLoader::new(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        let found = loader.enumerate("META-INF/services/x.Y").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn path_loader_skips_roots_without_the_resource() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write(b.path(), "META-INF/services/x.Y", "two\n");

        let loader = PathLoader::new(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        let found = loader.enumerate("META-INF/services/x.Y").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with(b.path()));
    }

    #[test]
    fn path_loader_open_tolerates_vanished_location() {
        let a = TempDir::new().unwrap();
        let loader = PathLoader::new(vec![a.path().to_path_buf()]);
        let ghost = a.path().join("META-INF/services/gone.Type");
        assert!(loader.open(&ghost).unwrap().is_none());
    }

    #[test]
    fn locate_returns_first_root_copy() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        write(a.path(), "META-INF/javadocs/x.Y", "first\n");
        write(b.path(), "META-INF/javadocs/x.Y", "second\n");

        let loader = PathLoader::new(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        let loc = loader.locate("META-INF/javadocs/x.Y").unwrap().unwrap();
        assert!(loc.starts_with(a.path()));
    }

    #[test]
    fn memory_loader_stacks_locations_per_path() {
        let mut loader = MemoryLoader::new();
        loader.insert("META-INF/annotations/m.M", "a\n");
        loader.insert("META-INF/annotations/m.M", "b\n");

        let locs = loader.enumerate("META-INF/annotations/m.M").unwrap();
        assert_eq!(locs.len(), 2);

        let mut contents = String::new();
        loader
            .open(&locs[1])
            .unwrap()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "b\n");
    }

    #[test]
    fn memory_loader_unknown_location_is_stale() {
        let loader = MemoryLoader::new();
        let stale = ("META-INF/services/gone".to_string(), 3);
        assert!(loader.open(&stale).unwrap().is_none());
    }
}
