use std::sync::LazyLock;

use regex::Regex;

// `_mat`, `_mt`, `_mat2`, ... at the very end of a material name
static MATERIAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_ma?t[0-9]*$").unwrap());

/// Canonical key of a material name.
///
/// Lowercases, then strips trailing material tokens (`_mat`, `_mt2`, ...)
/// together with one dangling underscore each, until none remain.
pub fn normalize_target(raw: &str) -> String {
    let mut name = raw.to_lowercase();
    // `hero_mat_mat` needs two passes to reach a fixed point
    while let Some(stripped) = strip_material_suffix(&name) {
        if stripped.is_empty() {
            break;
        }
        let len = stripped.len();
        name.truncate(len);
    }
    name
}

fn strip_material_suffix(name: &str) -> Option<&str> {
    if !MATERIAL_SUFFIX.is_match(name) {
        return None;
    }
    let (head, _) = name.rsplit_once('_')?;
    Some(head.strip_suffix('_').unwrap_or(head))
}

/// Canonical identifier of a texture name: lowercased with every trailing `marker` removed.
pub fn normalize_source(raw: &str, marker: &str) -> String {
    let mut name = raw.to_lowercase();
    let marker = marker.to_lowercase();
    if marker.is_empty() {
        return name;
    }
    // repeated so that normalizing twice changes nothing
    while name.len() > marker.len() && name.ends_with(marker.as_str()) {
        name.truncate(name.len() - marker.len());
    }
    name
}
