mod interceptor;
mod mesh_cache;
mod path;
mod reader;
mod record;
mod registry;
mod stats;

pub use interceptor::{intercept_elements, intercept_meshes};
pub use mesh_cache::MeshCache;
pub use path::{cache_path, resolve, CACHE_DIR, CACHE_FILE_EXTENSION};
pub use reader::{replay, ReplayStats};
pub use record::RecordTag;
pub use registry::{RegistryGuard, Session, SessionEnd, SessionId, SessionRegistry};
pub use stats::CacheStats;
