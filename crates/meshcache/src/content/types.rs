/// Builder-produced geometry. Vertices are packed `x, y, z` triples, uvs packed `u, v` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<f64>,
    pub triangles: Vec<u32>,
    pub colors: Vec<u32>,
    pub uvs: Vec<f64>,
    pub uv_map: Vec<u32>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for GeoCoordinate {
    fn from(t: (f64, f64)) -> Self {
        Self {
            latitude: t.0,
            longitude: t.1,
        }
    }
}

/// Tag stored as string table ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: u32,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementGeometry {
    Point(GeoCoordinate),
    Way(Vec<GeoCoordinate>),
    Area(Vec<GeoCoordinate>),
}

/// Discrete map entity emitted by the builders alongside meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: u64,
    pub tags: Vec<Tag>,
    pub geometry: ElementGeometry,
}

impl Element {
    pub fn point(id: u64, coordinate: impl Into<GeoCoordinate>) -> Self {
        Self {
            id,
            tags: Vec::new(),
            geometry: ElementGeometry::Point(coordinate.into()),
        }
    }

    pub fn with_tag(mut self, key: u32, value: u32) -> Self {
        self.tags.push(Tag { key, value });
        self
    }
}
