use std::collections::HashSet;

const FALLBACK: &str = "untitled";

/// Derives a URL-safe identifier from free text, unique against `taken`.
///
/// Collisions are resolved with a numeric suffix counter: `base`, `base-2`,
/// `base-3`, and so on until a free candidate is found. Runs once per entity;
/// an assigned slug is never re-derived on later edits.
pub fn generate(source: &str, taken: &HashSet<String>) -> String {
    let mut base = slugify(source);
    if base.is_empty() {
        base = FALLBACK.to_string();
    }
    if !taken.contains(&base) {
        return base;
    }
    let mut counter: u64 = 2;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn slugify(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut gap = false;
    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            // any run of other characters collapses into a single hyphen
            gap = true;
        }
    }
    out
}
