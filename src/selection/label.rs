//! Label text cleanup. Source files carry encoding-damaged dashes
//! (e.g. "Web Attack \u{FFFD} Brute Force").

/// Multi-character mojibake of en/em dashes (UTF-8 read as cp1252).
const MOJIBAKE_DASHES: &[&str] = &["\u{e2}\u{20ac}\u{201c}", "\u{e2}\u{20ac}\u{201d}"];

/// Single characters that stand in for a plain hyphen.
const DASH_LIKE: &[char] = &['\u{fffd}', '\u{2013}', '\u{2014}'];

/// Replace dash artifacts with `-`, collapse whitespace runs, trim. Idempotent.
pub fn normalize_label(raw: &str) -> String {
    let mut text = raw.to_string();
    for artifact in MOJIBAKE_DASHES {
        if text.contains(artifact) {
            text = text.replace(artifact, "-");
        }
    }
    let text: String = text
        .chars()
        .map(|c| if DASH_LIKE.contains(&c) { '-' } else { c })
        .collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased normalized form used for every label comparison.
pub fn normalized_key(raw: &str) -> String {
    normalize_label(raw).to_lowercase()
}
