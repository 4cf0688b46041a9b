/// Generation-checked storage for live meshes and shaders
///
/// Backends keep their GPU objects here and hand out `MeshHandle` /
/// `ShaderHandle` keys. Command buffers embed the keys, never pointers, so a
/// handle whose resource was destroyed is detected at flush time instead of
/// being dereferenced.

use slotmap::{new_key_type, Key, KeyData, SlotMap};
use crate::error::{Error, Result};
use crate::renderer::Mesh;

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Handle to a mesh owned by a renderer
    ///
    /// Becomes invalid when the mesh is destroyed. A slot reused by a later
    /// mesh does not revive old handles.
    pub struct MeshHandle;

    /// Handle to a shader program owned by a renderer
    pub struct ShaderHandle;
}

/// Conversion between handles and the 64-bit value stored in command records
pub trait WireHandle: Key {
    fn to_wire(self) -> u64 {
        self.data().as_ffi()
    }

    fn from_wire(value: u64) -> Self {
        Self::from(KeyData::from_ffi(value))
    }
}

impl WireHandle for MeshHandle {}
impl WireHandle for ShaderHandle {}

// ===== RESOURCE STORE =====

/// Live meshes (`Mesh<M>`) and shaders (`S`) of one renderer
pub struct ResourceStore<M, S> {
    meshes: SlotMap<MeshHandle, Mesh<M>>,
    shaders: SlotMap<ShaderHandle, S>,
}

impl<M, S> ResourceStore<M, S> {
    pub fn new() -> Self {
        Self {
            meshes: SlotMap::with_key(),
            shaders: SlotMap::with_key(),
        }
    }

    pub fn insert_mesh(&mut self, mesh: Mesh<M>) -> MeshHandle {
        self.meshes.insert(mesh)
    }

    /// Look up a live mesh
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the handle was destroyed or never issued
    /// by this store.
    pub fn mesh(&self, handle: MeshHandle) -> Result<&Mesh<M>> {
        self.meshes.get(handle).ok_or_else(|| Error::InvalidResource(format!(
            "mesh handle {:?} does not refer to a live mesh", handle
        )))
    }

    /// Remove a mesh, handing its GPU state back for destruction
    pub fn remove_mesh(&mut self, handle: MeshHandle) -> Result<Mesh<M>> {
        self.meshes.remove(handle).ok_or_else(|| Error::InvalidResource(format!(
            "mesh handle {:?} was already destroyed", handle
        )))
    }

    pub fn insert_shader(&mut self, shader: S) -> ShaderHandle {
        self.shaders.insert(shader)
    }

    /// Look up a live shader
    pub fn shader(&self, handle: ShaderHandle) -> Result<&S> {
        self.shaders.get(handle).ok_or_else(|| Error::InvalidResource(format!(
            "shader handle {:?} does not refer to a live shader", handle
        )))
    }

    /// Remove a shader, handing its GPU state back for destruction
    pub fn remove_shader(&mut self, handle: ShaderHandle) -> Result<S> {
        self.shaders.remove(handle).ok_or_else(|| Error::InvalidResource(format!(
            "shader handle {:?} was already destroyed", handle
        )))
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Remove every resource, meshes first
    ///
    /// Used on renderer shutdown so backends can release all GPU objects.
    pub fn drain(&mut self) -> (Vec<Mesh<M>>, Vec<S>) {
        let meshes = self.meshes.drain().map(|(_, mesh)| mesh).collect();
        let shaders = self.shaders.drain().map(|(_, shader)| shader).collect();
        (meshes, shaders)
    }
}

impl<M, S> Default for ResourceStore<M, S> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resource_store_tests.rs"]
mod tests;
