// classdex/src/merge.rs

use anyhow::{
    Context,
    Result
};
use std::collections::HashSet;
use std::io::{
    BufRead,
    BufReader
};
use crate::loader::ModuleLoader;

/// Merge every copy of the index at `logical_path` into one record set.
///
/// Each contributing location is read as UTF-8 text and every line goes into
/// the set verbatim: no trimming, no identifier validation. Duplicates
/// across locations collapse; order is irrelevant. A location that vanished
/// between enumeration and open is skipped; any other failure while
/// enumerating or reading fails the whole call with no partial result.
pub fn merge_records<L: ModuleLoader>(loader: &L, logical_path: &str) -> Result<HashSet<String>> {
    let mut records = HashSet::new();

    let locations = loader
        .enumerate(logical_path)
        .with_context(|| format!("enumerating index resources for {logical_path}"))?;

    for location in &locations {
        let stream = match loader.open(location)? {
            Some(s) => s,
            // Stale duplicate from an inconsistent loader; the surviving copy wins.
            None => continue,
        };
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            let line = line.with_context(|| format!("reading index resource {logical_path}"))?;
            records.insert(line);
        }
    }

    tracing::debug!(
        "merged {} record(s) for {} from {} location(s)",
        records.len(),
        logical_path,
        locations.len()
    );
    Ok(records)
}

/* ================================== Tests ================================== */
