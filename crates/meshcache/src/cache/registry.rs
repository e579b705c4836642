use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use tracing::{event, Level};

use crate::{content::QuadKey, helpers::CacheError};

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Kept { records: u64 },
    Discarded { records: u64 },
}

#[derive(Debug)]
struct SessionStream {
    writer: Option<BufWriter<File>>,
    failed: bool,
    records: u64,
}

/// An in-progress write of one cache file.
///
/// The stream is shared by the mesh and element interceptors of a single build, hence the
/// mutex; the builder itself is expected to emit from one thread.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    quad_key: QuadKey,
    path: PathBuf,
    stream: Mutex<SessionStream>,
}

impl Session {
    fn open(id: SessionId, quad_key: QuadKey, path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            id,
            quad_key,
            path: path.to_path_buf(),
            stream: Mutex::new(SessionStream {
                writer: Some(BufWriter::new(file)),
                failed: false,
                records: 0,
            }),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn quad_key(&self) -> &QuadKey {
        &self.quad_key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record. Once the session is closed, or after any failed write, records are
    /// dropped and `false` is returned.
    pub fn append<F>(&self, write: F) -> bool
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        let mut guard = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        let stream = &mut *guard;
        if stream.failed {
            return false;
        }
        let Some(writer) = stream.writer.as_mut() else {
            return false;
        };

        match write(writer) {
            Ok(()) => {
                stream.records += 1;
                true
            }
            Err(e) => {
                event!(
                    Level::WARN,
                    "Cache write failed for {}, caching disabled for this tile: {e}",
                    self.path.display()
                );
                stream.failed = true;
                false
            }
        }
    }

    pub fn records(&self) -> u64 {
        self.stream
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .records
    }

    /// Flushes and drops the file handle. Returns `(failed, records)`.
    fn close(&self) -> (bool, u64) {
        let mut stream = self.stream.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut writer) = stream.writer.take() {
            if let Err(e) = writer.flush() {
                event!(
                    Level::WARN,
                    "Failed to flush cache file {}: {e}",
                    self.path.display()
                );
                stream.failed = true;
            }
        }
        (stream.failed, stream.records)
    }
}

fn is_readable(path: &Path) -> bool {
    File::open(path)
        .and_then(|f| f.metadata())
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Tracks which quadkeys currently have a cache file being written.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<QuadKey, Arc<Session>>>,
    next_id: AtomicU64,
}

/// Exclusive access to the registry; lets a caller check and begin in one critical section.
pub struct RegistryGuard<'a> {
    sessions: MutexGuard<'a, HashMap<QuadKey, Arc<Session>>>,
    next_id: &'a AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            sessions: self.sessions.lock().unwrap_or_else(PoisonError::into_inner),
            next_id: &self.next_id,
        }
    }

    pub fn is_hit(&self, quad_key: &QuadKey, path: &Path) -> bool {
        self.lock().is_hit(quad_key, path)
    }

    pub fn begin(&self, quad_key: &QuadKey, path: &Path) -> Result<Arc<Session>, CacheError> {
        self.lock().begin(quad_key, path)
    }

    pub fn end(&self, quad_key: &QuadKey, cancelled: bool) -> Option<SessionEnd> {
        self.lock().end(quad_key, cancelled)
    }

    pub fn end_session(
        &self,
        quad_key: &QuadKey,
        id: SessionId,
        cancelled: bool,
    ) -> Option<SessionEnd> {
        self.lock().end_session(quad_key, id, cancelled)
    }

    pub fn open_sessions(&self) -> usize {
        self.lock().sessions.len()
    }
}

impl RegistryGuard<'_> {
    /// A slot with an open session is always a miss, whatever is on disk.
    pub fn is_hit(&self, quad_key: &QuadKey, path: &Path) -> bool {
        !self.sessions.contains_key(quad_key) && is_readable(path)
    }

    pub fn session(&self, quad_key: &QuadKey) -> Option<Arc<Session>> {
        self.sessions.get(quad_key).cloned()
    }

    /// Opens `path` for append and registers the session. Fails without touching the
    /// registry if the quadkey already has one.
    pub fn begin(&mut self, quad_key: &QuadKey, path: &Path) -> Result<Arc<Session>, CacheError> {
        if self.sessions.contains_key(quad_key) {
            return Err(CacheError::SessionInProgress(*quad_key));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Session::open(id, *quad_key, path)?);
        self.sessions.insert(*quad_key, session.clone());

        event!(
            Level::DEBUG,
            "Cache session {id} opened for {quad_key} at {}",
            path.display()
        );
        Ok(session)
    }

    pub fn end(&mut self, quad_key: &QuadKey, cancelled: bool) -> Option<SessionEnd> {
        self.finish(quad_key, None, cancelled)
    }

    /// Like [`end`](Self::end) but only when the registered session is `id`.
    pub fn end_session(
        &mut self,
        quad_key: &QuadKey,
        id: SessionId,
        cancelled: bool,
    ) -> Option<SessionEnd> {
        self.finish(quad_key, Some(id), cancelled)
    }

    fn finish(
        &mut self,
        quad_key: &QuadKey,
        id: Option<SessionId>,
        cancelled: bool,
    ) -> Option<SessionEnd> {
        let session = self.sessions.get(quad_key)?.clone();
        if id.is_some_and(|id| id != session.id) {
            return None;
        }

        let (failed, records) = session.close();
        let discard = cancelled || failed;

        // The file has to be gone before the entry is, or a reader could see a partial file.
        if discard {
            if let Err(e) = fs::remove_file(&session.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    event!(
                        Level::WARN,
                        "Failed to remove discarded cache file {}: {e}",
                        session.path.display()
                    );
                }
            }
        }
        self.sessions.remove(quad_key);

        event!(
            Level::DEBUG,
            "Cache session {} for {quad_key} closed: {records} records, discarded: {discard}",
            session.id
        );

        Some(if discard {
            SessionEnd::Discarded { records }
        } else {
            SessionEnd::Kept { records }
        })
    }
}
