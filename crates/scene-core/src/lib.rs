pub mod bounds;
pub mod camera;
pub mod color;
pub mod constants;
pub mod context;
pub mod error;
pub mod layout;
pub mod model;
pub mod sparkle;
pub mod uniforms;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use bounds::*;
pub use camera::*;
pub use constants::*;
pub use context::*;
pub use error::SceneError;
pub use layout::*;
pub use model::{MeshVertex, ModelMesh};
pub use sparkle::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static SPARKLE_WGSL: &str = include_str!("../shaders/sparkle.wgsl");
pub static SIGN_WGSL: &str = include_str!("../shaders/sign.wgsl");
