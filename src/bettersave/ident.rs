//! # Identity Synthesis
//!
//! Every categorized item lives in a directory named after its identifier, so the
//! identifier must be filesystem-safe and unique across *all* category roots: moving an
//! item between categories is a directory rename, and a rename onto an existing ID
//! would either fail or merge two items.
//!
//! ## Algorithm
//!
//! 1. Convert the display name to kebab-case (`My Cool_Level` → `my-cool-level`,
//!    `SCREAM1NG L33T` → `scream1ng-l33t`). Only ASCII alphanumerics survive.
//! 2. Truncate to [`MAX_ID_LEN`] characters; an empty result becomes `unnamed`.
//! 3. Reserved device names (`con`, `nul`, `com1`, ...) get a `-0` suffix.
//! 4. Append `-0`, `-1`, ... until no category root contains a directory with that name.
//!
//! Synthesis only checks; the caller reserves the ID by creating the directory
//! right after.

use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_ID_LEN: usize = 20;
pub const FALLBACK_ID: &str = "unnamed";

const RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "clock$", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

pub fn to_kebab_case(name: &str) -> String {
    let mut res = String::with_capacity(name.len());
    let mut last = '\0';
    for c in name.chars() {
        // No dash inside runs of capitals or after digits: SCREAM1NG stays one word
        let word_start = c.is_ascii_uppercase()
            && !(last.is_ascii_uppercase() || last.is_ascii_digit());
        if (word_start || c.is_whitespace() || c == '_') && !res.is_empty() && !res.ends_with('-')
        {
            res.push('-');
        }
        if c.is_ascii_alphanumeric() {
            res.push(c.to_ascii_lowercase());
        }
        last = c;
    }
    if res.ends_with('-') {
        res.pop();
    }
    res
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// The candidate ID before uniqueness is considered.
pub fn base_id(name: &str) -> String {
    let mut id = to_kebab_case(name);
    id.truncate(MAX_ID_LEN);
    if id.is_empty() {
        id = FALLBACK_ID.to_string();
    }
    if is_reserved(&id) {
        id.push_str("-0");
    }
    id
}

/// Synthesize an ID for `name` that does not exist as a subdirectory of any of `roots`.
pub fn synthesize_id(name: &str, roots: &[PathBuf]) -> String {
    let base = base_id(name);
    let mut id = base.clone();
    let mut counter = 0usize;
    while roots.iter().any(|root| root.join(&id).exists()) {
        id = format!("{}-{}", base, counter);
        counter += 1;
    }
    id
}

/// All directories an ID must be unique in: every subdirectory of the save root.
///
/// Scanning the whole root (instead of a fixed list of categories) also guards
/// against directories created by other tools or future categories.
pub fn scope_roots(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut roots: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    roots.sort();
    roots
}
