use std::path::{Path, PathBuf};

use crate::content::QuadKey;

pub const CACHE_DIR: &str = "cache";
pub const CACHE_FILE_EXTENSION: &str = "mesh";

/// `<root>/cache/<style_tag>/<level_of_detail>/<quad_key>.mesh`
///
/// Pure; hit detection, writing and reading all go through here so they agree on location.
pub fn cache_path(root: &Path, style_tag: &str, level_of_detail: u8, quad_key: &str) -> PathBuf {
    root.join(CACHE_DIR)
        .join(style_tag)
        .join(level_of_detail.to_string())
        .join(format!("{quad_key}.{CACHE_FILE_EXTENSION}"))
}

pub fn resolve(root: &Path, style_tag: &str, quad_key: &QuadKey) -> PathBuf {
    cache_path(
        root,
        style_tag,
        quad_key.level_of_detail(),
        &quad_key.to_string(),
    )
}
