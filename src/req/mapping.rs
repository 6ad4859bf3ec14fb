use std::collections::BTreeMap;

/// Import names whose installable distribution is published under a different
/// name on PyPI. Keys are lowercased import identifiers; the table is sorted
/// for binary search.
const IMPORT_TO_DIST: &[(&str, &str)] = &[
    ("bs4", "beautifulsoup4"),
    ("cv2", "opencv-python"),
    ("dateutil", "python-dateutil"),
    ("dotenv", "python-dotenv"),
    ("gi", "pygobject"),
    ("pil", "pillow"),
    ("sklearn", "scikit-learn"),
    ("yaml", "pyyaml"),
];

/// Distribution name for an import identifier: an explicit override wins,
/// then the built-in table, then the identifier itself.
pub fn dist_name(import_name: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(d) = overrides.get(import_name) {
        return normalize(d);
    }
    let lower = import_name.to_ascii_lowercase();
    if let Some(d) = overrides.get(&lower) {
        return normalize(d);
    }
    match IMPORT_TO_DIST.binary_search_by_key(&lower.as_str(), |&(k, _)| k) {
        Ok(i) => normalize(IMPORT_TO_DIST[i].1),
        Err(_) => normalize(&lower),
    }
}

/// PEP-503-style distribution-name normalization: lowercase, runs of `-`,
/// `_` and `.` collapse to a single `-`. All cross-set comparisons between
/// import names, installed distributions, and pins go through this.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !prev_sep {
                out.push('-');
            }
            prev_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            prev_sep = false;
        }
    }
    out
}
