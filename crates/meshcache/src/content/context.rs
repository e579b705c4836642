use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    cache::SessionId,
    content::{Element, GeoCoordinate, Mesh, QuadKey},
};

pub type MeshCallback = Arc<dyn Fn(&Mesh) + Send + Sync>;
pub type ElementCallback = Arc<dyn Fn(&Element) + Send + Sync>;

/// Supplies the style tag that partitions the cache on disk.
pub trait StyleProvider: Send + Sync {
    fn tag(&self) -> &str;
}

/// Interns tag strings into the ids stored on [`Element`]s.
pub trait StringTable: Send + Sync {
    fn get_id(&self, value: &str) -> u32;
    fn get_string(&self, id: u32) -> Option<String>;
}

/// Per-element metadata lookup used by the builders (terrain elevation).
pub trait ElevationProvider: Send + Sync {
    fn elevation(&self, quad_key: &QuadKey, coordinate: &GeoCoordinate) -> f64;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTag(pub String);

impl StyleProvider for StyleTag {
    fn tag(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct FlatElevationProvider;

impl ElevationProvider for FlatElevationProvider {
    fn elevation(&self, _quad_key: &QuadKey, _coordinate: &GeoCoordinate) -> f64 {
        0.0
    }
}

#[derive(Debug, Default)]
struct StringTableState {
    ids: HashMap<String, u32>,
    strings: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryStringTable {
    state: RwLock<StringTableState>,
}

impl InMemoryStringTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringTable for InMemoryStringTable {
    fn get_id(&self, value: &str) -> u32 {
        if let Some(id) = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ids
            .get(value)
        {
            return *id;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = state.ids.get(value) {
            return *id;
        }
        let id = state.strings.len() as u32;
        state.strings.push(value.to_string());
        state.ids.insert(value.to_string(), id);
        id
    }

    fn get_string(&self, id: u32) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .strings
            .get(id as usize)
            .cloned()
    }
}

/// Everything a tile build needs. Never mutated in place: the cache hands back a new context
/// with replacement callbacks.
#[derive(Clone)]
pub struct BuildContext {
    pub quad_key: QuadKey,
    pub style_provider: Arc<dyn StyleProvider>,
    pub string_table: Arc<dyn StringTable>,
    pub ele_provider: Arc<dyn ElevationProvider>,
    pub mesh_callback: MeshCallback,
    pub element_callback: ElementCallback,
    session: Option<SessionId>,
}

impl BuildContext {
    pub fn new(
        quad_key: QuadKey,
        style_provider: Arc<dyn StyleProvider>,
        string_table: Arc<dyn StringTable>,
        ele_provider: Arc<dyn ElevationProvider>,
        mesh_callback: MeshCallback,
        element_callback: ElementCallback,
    ) -> Self {
        Self {
            quad_key,
            style_provider,
            string_table,
            ele_provider,
            mesh_callback,
            element_callback,
            session: None,
        }
    }

    pub(crate) fn with_session(
        &self,
        session: SessionId,
        mesh_callback: MeshCallback,
        element_callback: ElementCallback,
    ) -> Self {
        Self {
            quad_key: self.quad_key,
            style_provider: self.style_provider.clone(),
            string_table: self.string_table.clone(),
            ele_provider: self.ele_provider.clone(),
            mesh_callback,
            element_callback,
            session: Some(session),
        }
    }

    /// Ticket of the cache session this context writes into, if any.
    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn style_tag(&self) -> &str {
        self.style_provider.tag()
    }

    pub fn emit_mesh(&self, mesh: &Mesh) {
        (self.mesh_callback)(mesh)
    }

    pub fn emit_element(&self, element: &Element) {
        (self.element_callback)(element)
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("quad_key", &self.quad_key)
            .field("style", &self.style_provider.tag())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
