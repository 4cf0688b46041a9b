use super::*;
use crate::renderer::{DataType, MeshInfo, VertexSpecification};

fn mesh(tag: &'static str) -> Mesh<&'static str> {
    let spec = VertexSpecification::new(DataType::UInt16).with_attribute(DataType::Float32, 2);
    let info = MeshInfo::new(&[0u8; 24], None, &spec).unwrap();
    Mesh::new(info, tag)
}

// ============================================================================
// Insert / lookup
// ============================================================================

#[test]
fn test_new_store_is_empty() {
    let store: ResourceStore<(), ()> = ResourceStore::new();
    assert_eq!(store.mesh_count(), 0);
    assert_eq!(store.shader_count(), 0);
}

#[test]
fn test_insert_and_lookup() {
    let mut store = ResourceStore::new();
    let m = store.insert_mesh(mesh("cube"));
    let s = store.insert_shader("basic");

    assert_eq!(*store.mesh(m).unwrap().backend(), "cube");
    assert_eq!(store.mesh(m).unwrap().info().vertex_count(), 3);
    assert_eq!(*store.shader(s).unwrap(), "basic");
}

// ============================================================================
// Stale handles
// ============================================================================

#[test]
fn test_removed_mesh_handle_is_stale() {
    let mut store: ResourceStore<&str, ()> = ResourceStore::new();
    let m = store.insert_mesh(mesh("cube"));

    let removed = store.remove_mesh(m).unwrap();
    assert_eq!(*removed.backend(), "cube");

    assert!(matches!(store.mesh(m), Err(Error::InvalidResource(_))));
    assert!(matches!(store.remove_mesh(m), Err(Error::InvalidResource(_))));
}

#[test]
fn test_reused_slot_does_not_revive_old_handle() {
    let mut store: ResourceStore<(), u32> = ResourceStore::new();
    let old = store.insert_shader(1);
    store.remove_shader(old).unwrap();
    let new = store.insert_shader(2);

    assert_ne!(old, new);
    assert!(store.shader(old).is_err());
    assert_eq!(*store.shader(new).unwrap(), 2);
}

#[test]
fn test_default_handle_is_never_live() {
    let mut store: ResourceStore<&str, u32> = ResourceStore::new();
    store.insert_mesh(mesh("a"));
    store.insert_shader(1);

    assert!(store.mesh(MeshHandle::default()).is_err());
    assert!(store.shader(ShaderHandle::default()).is_err());
}

// ============================================================================
// Wire encoding
// ============================================================================

#[test]
fn test_wire_roundtrip_keeps_handle_identity() {
    let mut store: ResourceStore<&str, u32> = ResourceStore::new();
    let m = store.insert_mesh(mesh("a"));
    let s = store.insert_shader(9);

    let m2 = MeshHandle::from_wire(m.to_wire());
    let s2 = ShaderHandle::from_wire(s.to_wire());

    assert_eq!(m, m2);
    assert_eq!(s, s2);
    assert!(store.mesh(m2).is_ok());
}

#[test]
fn test_wire_value_of_stale_handle_stays_stale() {
    let mut store: ResourceStore<(), u32> = ResourceStore::new();
    let s = store.insert_shader(1);
    let wire = s.to_wire();
    store.remove_shader(s).unwrap();
    store.insert_shader(2);

    assert!(store.shader(ShaderHandle::from_wire(wire)).is_err());
}

// ============================================================================
// Drain
// ============================================================================

#[test]
fn test_drain_returns_everything() {
    let mut store = ResourceStore::new();
    store.insert_mesh(mesh("a"));
    store.insert_mesh(mesh("b"));
    store.insert_shader(1u32);

    let (meshes, shaders) = store.drain();
    assert_eq!(meshes.len(), 2);
    assert_eq!(shaders, vec![1]);
    assert_eq!(store.mesh_count(), 0);
    assert_eq!(store.shader_count(), 0);
}
