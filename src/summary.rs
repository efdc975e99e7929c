// classdex/src/summary.rs
//! First-sentence summaries from pre-generated documentation sidecars.

use anyhow::{
    Context,
    Result
};
use memchr::memchr;
use std::io::{
    BufRead,
    BufReader
};
use crate::{
    loader::ModuleLoader,
    query::javadoc_path,
    resolver::TypeResolver,
};

/// Documentation summary for a fully-qualified type name.
///
/// Exactly one documentation resource is consulted (first match wins; these
/// sidecars are written per type and never merged). The summary is the text
/// up to the first period, scanned across lines with nothing inserted at
/// line breaks (the generator wraps prose; the period decides). With no
/// period anywhere the whole accumulated text is the summary. `Ok(None)`
/// when no resource exists.
pub fn type_summary<L: ModuleLoader>(loader: &L, type_name: &str) -> Result<Option<String>> {
    let path = javadoc_path(type_name);
    let location = match loader.locate(&path)? {
        Some(l) => l,
        None => return Ok(None),
    };
    let stream = match loader.open(&location)? {
        Some(s) => s,
        // Located but gone by open time: same tolerance as enumeration.
        None => return Ok(None),
    };

    let reader = BufReader::new(stream);
    let mut summary = String::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("reading javadoc resource {path}"))?;
        match memchr(b'.', line.as_bytes()) {
            None => summary.push_str(&line),
            Some(dot) => {
                summary.push_str(&line[..dot]);
                return Ok(Some(summary.trim().to_string()));
            }
        }
    }
    Ok(Some(summary.trim().to_string()))
}

/// Summary for a resolved handle, via its registered name.
pub fn summary_of<L, R>(loader: &L, resolver: &R, ty: &R::Type) -> Result<Option<String>>
where
    L: ModuleLoader,
    R: TypeResolver,
{
    type_summary(loader, &resolver.type_name(ty))
}

/* ================================== Tests ================================== */
