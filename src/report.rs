// classdex/src/report.rs
//! Diagnostic view over the sidecar files present under a set of roots:
//! which logical paths exist, how many sources contribute to each, how much
//! the merge deduplicates, and a content fingerprint per index. This reads
//! the sidecars themselves; it is not a query fallback and resolves nothing.

use anyhow::{
    Context,
    Result
};
use serde::Serialize;
use std::{
    collections::{
        BTreeMap,
        BTreeSet,
        HashSet
    },
    fs,
    fs::File,
    io::Write,
    path::{
        Path,
        PathBuf
    },
};
use walkdir::WalkDir;
use crate::{
    loader::PathLoader,
    merge::merge_records,
    query::{ANNOTATED_INDEX_PREFIX, JAVADOC_PREFIX, PACKAGE_INDEX_NAME, SUBCLASS_INDEX_PREFIX},
    util,
};

/// Which sidecar family a logical path belongs to.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SidecarKind {
    Subclass,
    Annotated,
    Package,
    Javadoc,
}

impl SidecarKind {
    /// Classify a root-relative path; `None` for files that are not sidecars.
    pub fn classify(logical_path: &str) -> Option<SidecarKind> {
        if logical_path.starts_with(SUBCLASS_INDEX_PREFIX) {
            return Some(SidecarKind::Subclass);
        }
        if logical_path.starts_with(ANNOTATED_INDEX_PREFIX) {
            return Some(SidecarKind::Annotated);
        }
        if logical_path.starts_with(JAVADOC_PREFIX) {
            return Some(SidecarKind::Javadoc);
        }
        if logical_path == PACKAGE_INDEX_NAME
            || logical_path.ends_with(&format!("/{PACKAGE_INDEX_NAME}"))
        {
            return Some(SidecarKind::Package);
        }
        None
    }

    fn label(self) -> &'static str {
        use SidecarKind::*;
        match self {
            Subclass => "subclass indexes",
            Annotated => "annotation indexes",
            Package => "package indexes",
            Javadoc => "javadoc sidecars",
        }
    }
}

/// Per-logical-path summary of one merged index.
#[derive(Serialize)]
pub struct IndexEntrySummary {
    pub logical_path: String,
    pub kind: SidecarKind,
    /// Contributing locations across all roots.
    pub locations: usize,
    /// Raw line count summed over locations.
    pub records: usize,
    /// Size of the merged, deduplicated set.
    pub distinct: usize,
    /// SHA-256 over the sorted distinct records, newline-joined.
    pub fingerprint: String,
}

#[derive(Serialize)]
pub struct SidecarReport {
    pub generated: String,
    pub roots: Vec<String>,
    pub indexes: Vec<IndexEntrySummary>,
    /// Type names with a javadoc sidecar present. Listed, not parsed;
    /// their content is prose, not identifiers.
    pub documented: Vec<String>,
}

/// Walk every root and summarize the sidecar indexes found there.
pub fn build_report(roots: &[PathBuf]) -> Result<SidecarReport> {
    let mut grouped: BTreeMap<String, (SidecarKind, Vec<PathBuf>)> = BTreeMap::new();
    let mut documented: BTreeSet<String> = BTreeSet::new();

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        for dent in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !dent.file_type().is_file() {
                continue;
            }
            let rel = normalize_rel(root, dent.path());
            match SidecarKind::classify(&rel) {
                None => {}
                Some(SidecarKind::Javadoc) => {
                    documented.insert(rel.trim_start_matches(JAVADOC_PREFIX).to_string());
                }
                Some(kind) => {
                    let slot = grouped.entry(rel).or_insert_with(|| (kind, Vec::new()));
                    slot.1.push(dent.path().to_path_buf());
                }
            }
        }
    }

    let loader = PathLoader::new(roots.to_vec());
    let mut indexes = Vec::with_capacity(grouped.len());
    for (logical_path, (kind, locations)) in grouped {
        let mut records = 0usize;
        for location in &locations {
            let text = fs::read_to_string(location)
                .with_context(|| format!("read {}", location.display()))?;
            records += text.lines().count();
        }
        let merged = merge_records(&loader, &logical_path)?;
        let fingerprint = fingerprint_records(&merged);
        indexes.push(IndexEntrySummary {
            logical_path,
            kind,
            locations: locations.len(),
            records,
            distinct: merged.len(),
            fingerprint,
        });
    }

    Ok(SidecarReport {
        generated: util::now_timestamp(),
        roots: roots.iter().map(|r| r.display().to_string()).collect(),
        indexes,
        documented: documented.into_iter().collect(),
    })
}

/// Render the report as markdown for humans; JSON output is for tools.
pub fn write_report_markdown(report: &SidecarReport, output_path: &Path) -> Result<()> {
    let mut out = File::create(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writeln!(out, "# Sidecar Index Report\n")?;
    writeln!(out, "Generated: {}\n", report.generated)?;
    writeln!(out, "Roots:")?;
    for root in &report.roots {
        writeln!(out, "- `{root}`")?;
    }

    for kind in [SidecarKind::Subclass, SidecarKind::Annotated, SidecarKind::Package] {
        let section: Vec<&IndexEntrySummary> =
            report.indexes.iter().filter(|e| e.kind == kind).collect();
        if section.is_empty() {
            continue;
        }
        writeln!(out, "\n## {}\n", kind.label())?;
        for entry in section {
            let short: String = entry.fingerprint.chars().take(8).collect();
            writeln!(
                out,
                "- `{}` — {} location(s), {} record(s), {} distinct [{}]",
                entry.logical_path, entry.locations, entry.records, entry.distinct, short
            )?;
        }
    }

    if !report.documented.is_empty() {
        writeln!(out, "\n## {}\n", SidecarKind::Javadoc.label())?;
        for name in &report.documented {
            writeln!(out, "- `{name}`")?;
        }
    }
    Ok(())
}

/* ----------------------------- helpers ----------------------------- */

fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

fn fingerprint_records(records: &HashSet<String>) -> String {
    util::sha256_hex(util::sorted(records).join("\n").as_bytes())
}

/* ================================== Tests ================================== */
