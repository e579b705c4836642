use std::{
    io::{Read, Write},
    sync::Arc,
};

use crate::content::{Element, Mesh};

pub mod binary;
pub use binary::BinaryCodec;

/// Serializes a single mesh body. Record framing is handled by the cache.
pub trait MeshCodec: Send + Sync {
    fn write(&self, stream: &mut dyn Write, mesh: &Mesh) -> std::io::Result<()>;
    fn read(&self, stream: &mut dyn Read) -> std::io::Result<Mesh>;
}

/// Serializes a single element body. The id lives outside the body and is handed back on read.
pub trait ElementCodec: Send + Sync {
    fn write(&self, stream: &mut dyn Write, element: &Element) -> std::io::Result<()>;
    fn read(&self, stream: &mut dyn Read, id: u64) -> std::io::Result<Element>;
}

#[derive(Clone)]
pub struct Codecs {
    pub mesh: Arc<dyn MeshCodec>,
    pub element: Arc<dyn ElementCodec>,
}

impl Default for Codecs {
    fn default() -> Self {
        let codec = Arc::new(BinaryCodec);
        Self {
            mesh: codec.clone(),
            element: codec,
        }
    }
}
