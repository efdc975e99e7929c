// classdex/src/util.rs

use sha2::{
    Digest,
    Sha256
};
use std::collections::HashSet;

/// RFC3339 (sortable) + a compact stamp string.
pub fn now_timestamp() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    // e.g., 2025-08-10T14:03:59-05:00 | 20250810_140359
    let rfc3339 = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let compact = now.format("%Y%m%d_%H%M%S").to_string();
    format!("{compact} ({rfc3339})")
}

/// Hex-encoded SHA-256 of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Sorted copy of a record set for deterministic display and fingerprints.
pub fn sorted(set: &HashSet<String>) -> Vec<&str> {
    let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
    v.sort_unstable();
    v
}

/* ================================== Tests ================================== */
