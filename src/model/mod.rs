//! Data structures for mesh snapshots, triangle meshes and exported surfaces

// Declare all submodules
mod mesh;
mod snapshot;
mod surface;

// Re-export all public types from mesh module
pub use mesh::{EdgeKey, EdgeMap, EdgeUse, TriMesh, Triangle, Vertex};

// Re-export all public types from snapshot module
pub use snapshot::{Face, MaterialSlot, MeshSnapshot};

// Re-export all public types from surface module
pub use surface::ExportedSurface;
