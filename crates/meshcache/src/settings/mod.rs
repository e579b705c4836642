mod loader;
mod types;

pub use loader::load_config;
#[cfg(test)]
pub(crate) use loader::load_config_from_env;
pub use types::CacheConfig;
