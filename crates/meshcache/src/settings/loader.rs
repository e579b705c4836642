use tracing::{event, Level};

use crate::{helpers::CacheError, settings::CacheConfig};

const ENV_PREFIX: &str = "MESHCACHE";

/// Loads `meshcache[.local].{toml,json,…}` from the working directory, then
/// `MESHCACHE__*` environment overrides (a `.env` file is honoured).
pub fn load_config() -> Result<CacheConfig, CacheError> {
    let _ = dotenvy::dotenv();
    load_config_from_env(None)
}

/// `env` replaces the process environment as the override source when given.
pub(crate) fn load_config_from_env(
    env: Option<::config::Map<String, String>>,
) -> Result<CacheConfig, CacheError> {
    let defaults = CacheConfig::default();
    let builder = ::config::Config::builder()
        .set_default("data_path", defaults.data_path)?
        .set_default("enabled", defaults.enabled)?
        .add_source(::config::File::with_name("meshcache").required(false))
        .add_source(::config::File::with_name("meshcache.local").required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

    let cfg = builder.build()?;
    let cfg: CacheConfig = cfg.try_deserialize()?;
    event!(Level::INFO, "Cache config loaded: {:?}", cfg);

    Ok(cfg)
}
