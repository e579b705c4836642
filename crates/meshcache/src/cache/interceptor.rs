use std::sync::Arc;

use crate::{
    cache::{
        record::{write_element_id, write_tag},
        RecordTag, Session,
    },
    codec::{ElementCodec, MeshCodec},
    content::{Element, ElementCallback, Mesh, MeshCallback},
};

/// Wraps `downstream` so every mesh is appended to `session` before it is forwarded.
///
/// The returned callback owns its handles and stays valid after the session has ended; late
/// values are then only forwarded.
pub fn intercept_meshes(
    session: Arc<Session>,
    codec: Arc<dyn MeshCodec>,
    downstream: MeshCallback,
) -> MeshCallback {
    Arc::new(move |mesh: &Mesh| {
        session.append(|stream| {
            write_tag(stream, RecordTag::Mesh)?;
            codec.write(stream, mesh)
        });
        downstream(mesh);
    })
}

/// Element counterpart of [`intercept_meshes`]; the id is written ahead of the codec body.
pub fn intercept_elements(
    session: Arc<Session>,
    codec: Arc<dyn ElementCodec>,
    downstream: ElementCallback,
) -> ElementCallback {
    Arc::new(move |element: &Element| {
        session.append(|stream| {
            write_tag(stream, RecordTag::Element)?;
            write_element_id(stream, element.id)?;
            codec.write(stream, element)
        });
        downstream(element);
    })
}
