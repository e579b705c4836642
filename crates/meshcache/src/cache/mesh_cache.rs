use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::{event, Level};

use crate::{
    cache::{
        intercept_elements, intercept_meshes, replay, resolve, CacheStats, SessionEnd,
        SessionRegistry,
    },
    codec::Codecs,
    content::BuildContext,
    helpers::{CacheError, CancellationToken},
    settings::CacheConfig,
};

/// Disk memoization in front of the tile builders.
///
/// Typical flow for one tile:
///
/// ```text
/// if !cache.try_load(&ctx, &cancel)? {
///     let ctx = cache.attach(&ctx);
///     build(&ctx);
///     cache.finalize(&ctx, &cancel);
/// }
/// ```
pub struct MeshCache {
    data_path: PathBuf,
    enabled: AtomicBool,
    registry: SessionRegistry,
    codecs: Codecs,
    stats: CacheStats,
}

impl MeshCache {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self::with_codecs(data_path, Codecs::default())
    }

    pub fn with_codecs(data_path: impl Into<PathBuf>, codecs: Codecs) -> Self {
        Self {
            data_path: data_path.into(),
            enabled: AtomicBool::new(true),
            registry: SessionRegistry::new(),
            codecs,
            stats: CacheStats::new(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        let cache = Self::new(&config.data_path);
        cache.set_enabled(config.enabled);
        cache
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn path_for(&self, context: &BuildContext) -> PathBuf {
        resolve(&self.data_path, context.style_tag(), &context.quad_key)
    }

    pub fn is_cached(&self, context: &BuildContext) -> bool {
        self.is_enabled()
            && self
                .registry
                .is_hit(&context.quad_key, &self.path_for(context))
    }

    /// Returns the context to build with.
    ///
    /// On a hit the input comes back unchanged; the caller should [`try_load`](Self::try_load)
    /// instead of building. On a miss a session is opened and the returned context mirrors
    /// every mesh and element into it. If no session can be opened the build simply goes
    /// uncached.
    pub fn attach(&self, context: &BuildContext) -> BuildContext {
        if !self.is_enabled() {
            return context.clone();
        }

        let path = self.path_for(context);
        let mut registry = self.registry.lock();
        if registry.is_hit(&context.quad_key, &path) {
            return context.clone();
        }

        let session = match registry.begin(&context.quad_key, &path) {
            Ok(session) => session,
            Err(CacheError::SessionInProgress(quad_key)) => {
                event!(
                    Level::DEBUG,
                    "Tile {quad_key} is already being cached, building without cache"
                );
                return context.clone();
            }
            Err(e) => {
                event!(
                    Level::WARN,
                    "Failed to open cache file {}: {e}",
                    path.display()
                );
                return context.clone();
            }
        };
        drop(registry);
        self.stats.record_session_opened();

        context.with_session(
            session.id(),
            intercept_meshes(
                session.clone(),
                self.codecs.mesh.clone(),
                context.mesh_callback.clone(),
            ),
            intercept_elements(
                session,
                self.codecs.element.clone(),
                context.element_callback.clone(),
            ),
        )
    }

    /// Replays a complete cache file into the callbacks of `context`.
    ///
    /// `Ok(false)` means there is nothing usable on disk and the tile has to be built.
    pub fn try_load(
        &self,
        context: &BuildContext,
        cancel: &CancellationToken,
    ) -> Result<bool, CacheError> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let path = self.path_for(context);
        if !self.registry.is_hit(&context.quad_key, &path) {
            self.stats.record_miss();
            return Ok(false);
        }
        self.stats.record_hit();

        match replay(&path, context, &self.codecs, cancel) {
            Ok(replayed) => {
                self.stats.record_replayed(replayed.records());
                Ok(true)
            }
            Err(e) => {
                if e.is_corrupt() {
                    self.stats.record_corrupt();
                }
                Err(e)
            }
        }
    }

    /// Closes the session opened by [`attach`](Self::attach). The file is kept unless `cancel`
    /// is set or a write failed. Contexts that never got a session are ignored.
    pub fn finalize(&self, context: &BuildContext, cancel: &CancellationToken) {
        let Some(id) = context.session() else {
            return;
        };

        match self
            .registry
            .end_session(&context.quad_key, id, cancel.is_cancelled())
        {
            Some(SessionEnd::Kept { records }) => self.stats.record_session_kept(records),
            Some(SessionEnd::Discarded { .. }) => self.stats.record_session_discarded(),
            None => {}
        }
    }

    /// Deletes the cache file for `context`, e.g. after [`try_load`](Self::try_load) reported
    /// corruption. Refuses while a session is writing it.
    pub fn invalidate(&self, context: &BuildContext) -> Result<bool, CacheError> {
        let path = self.path_for(context);
        let registry = self.registry.lock();
        if registry.session(&context.quad_key).is_some() {
            return Err(CacheError::SessionInProgress(context.quad_key));
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                event!(Level::INFO, "Removed cache file {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
