mod cache;
mod codec;
mod content;
mod helpers;
mod settings;

#[cfg(test)]
mod tests;

pub use cache::{
    cache_path, intercept_elements, intercept_meshes, replay, resolve, CacheStats, MeshCache,
    RecordTag, RegistryGuard, ReplayStats, Session, SessionEnd, SessionId, SessionRegistry,
    CACHE_DIR, CACHE_FILE_EXTENSION,
};
pub use codec::{BinaryCodec, Codecs, ElementCodec, MeshCodec};
pub use content::{
    BuildContext, Element, ElementCallback, ElementGeometry, ElevationProvider,
    FlatElevationProvider, GeoCoordinate, InMemoryStringTable, Mesh, MeshCallback, QuadKey,
    QuadKeyError, StringTable, StyleProvider, StyleTag, Tag, MAX_LEVEL_OF_DETAIL,
};
pub use helpers::{init_logging, CacheError, CancellationToken, CorruptContext};
pub use settings::{load_config, CacheConfig};
