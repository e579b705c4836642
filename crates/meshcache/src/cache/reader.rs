use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use tracing::{event, Level};

use crate::{
    cache::record::{read_element_id, read_tag_byte},
    cache::RecordTag,
    codec::Codecs,
    content::BuildContext,
    helpers::{CacheError, CancellationToken, CorruptContext},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub meshes: u64,
    pub elements: u64,
    pub cancelled: bool,
}

impl ReplayStats {
    pub fn records(&self) -> u64 {
        self.meshes + self.elements
    }
}

/// Streams a cache file back through the callbacks of `context`.
///
/// Cancellation is checked before every record and ends the replay without error. An unknown
/// tag aborts with [`CacheError::CorruptCache`]; there is no attempt to resynchronize.
pub fn replay(
    path: &Path,
    context: &BuildContext,
    codecs: &Codecs,
    cancel: &CancellationToken,
) -> Result<ReplayStats, CacheError> {
    let _span = tracing::debug_span!("replay", quad_key = %context.quad_key).entered();

    let mut reader = BufReader::new(File::open(path)?);
    let stream: &mut dyn Read = &mut reader;
    let mut stats = ReplayStats::default();

    loop {
        if cancel.is_cancelled() {
            stats.cancelled = true;
            break;
        }

        let Some(tag) = read_tag_byte(stream)? else {
            break;
        };

        match RecordTag::try_from(tag) {
            Ok(RecordTag::Mesh) => {
                let mesh = codecs.mesh.read(stream).corrupt_context(path, "mesh record")?;
                context.emit_mesh(&mesh);
                stats.meshes += 1;
            }
            Ok(RecordTag::Element) => {
                let id = read_element_id(stream).corrupt_context(path, "element id")?;
                let element = codecs
                    .element
                    .read(stream, id)
                    .corrupt_context(path, "element record")?;
                context.emit_element(&element);
                stats.elements += 1;
            }
            Err(unknown) => {
                event!(
                    Level::ERROR,
                    "Unknown record tag 0x{unknown:02X} in cache file {}",
                    path.display()
                );
                return Err(CacheError::CorruptCache {
                    path: path.to_path_buf(),
                    reason: format!("unknown record tag 0x{unknown:02X}"),
                });
            }
        }
    }

    event!(
        Level::DEBUG,
        "Replayed {} meshes and {} elements from {}",
        stats.meshes,
        stats.elements,
        path.display()
    );
    Ok(stats)
}
