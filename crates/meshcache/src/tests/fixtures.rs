use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::{
    init_logging, BuildContext, Element, ElementGeometry, FlatElevationProvider, GeoCoordinate,
    InMemoryStringTable, Mesh, MeshCache, QuadKey, StringTable, StyleTag,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Produced {
    Mesh(Mesh),
    Element(Element),
}

pub type Sink = Arc<Mutex<Vec<Produced>>>;

/// Context whose callbacks record everything they receive, in order.
pub fn recording_context(quad_key: QuadKey, style: &str) -> (BuildContext, Sink) {
    let sink: Sink = Arc::new(Mutex::new(Vec::new()));
    let mesh_sink = sink.clone();
    let element_sink = sink.clone();

    let context = BuildContext::new(
        quad_key,
        Arc::new(StyleTag(style.to_string())),
        Arc::new(InMemoryStringTable::new()),
        Arc::new(FlatElevationProvider),
        Arc::new(move |mesh: &Mesh| {
            mesh_sink.lock().unwrap().push(Produced::Mesh(mesh.clone()));
        }),
        Arc::new(move |element: &Element| {
            element_sink
                .lock()
                .unwrap()
                .push(Produced::Element(element.clone()));
        }),
    );
    (context, sink)
}

pub fn temp_cache() -> (TempDir, MeshCache) {
    init_logging();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let cache = MeshCache::new(dir.path());
    (dir, cache)
}

pub fn sample_mesh(name: &str) -> Mesh {
    Mesh {
        name: name.to_string(),
        vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.0, 1.0, -0.25],
        triangles: vec![0, 1, 2],
        colors: vec![0xFF336699, 0xFF336699, 0xFFFFFFFF],
        uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        uv_map: vec![0, 3],
    }
}

pub fn sample_element(id: u64, table: &dyn StringTable) -> Element {
    Element {
        id,
        tags: vec![crate::Tag {
            key: table.get_id("building"),
            value: table.get_id("yes"),
        }],
        geometry: ElementGeometry::Area(vec![
            GeoCoordinate::from((52.5200, 13.4050)),
            GeoCoordinate::from((52.5201, 13.4052)),
            GeoCoordinate::from((52.5199, 13.4053)),
        ]),
    }
}

pub fn quad_key(s: &str) -> QuadKey {
    s.parse().expect("Invalid quadkey in test")
}
