//! Reusable entity building blocks: transforms, cameras, meshes and materials.

pub mod color;
mod camera;
mod material;
mod mesh;
mod transform;

pub use camera::{Camera, CameraResizeController, Projectable, ProjectionKind};
pub use material::{Material, MaterialLike, MaterialParts, MaterialRenderSystem, COLOR_UNIFORM, TEXTURE_UNIFORM};
pub use mesh::{InstancedMesh, Mesh, MeshData, INSTANCES_BLOCK, MODEL_UNIFORM};
pub use transform::{Transform, Transformable};
