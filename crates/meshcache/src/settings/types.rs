use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root under which `cache/<style>/<lod>/` lives.
    pub data_path: String,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            data_path: "./".to_string(),
            enabled: true,
        }
    }
}
