use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse OBJ: {0}")]
    Obj(#[source] tobj::LoadError),

    #[error("failed to parse MTL: {0}")]
    Mtl(#[source] tobj::LoadError),

    #[error("model has no triangles")]
    EmptyModel,

    #[error("face index {index} out of range for {vertices} vertices")]
    BadIndex { index: usize, vertices: usize },
}

pub type Result<T, E = SceneError> = std::result::Result<T, E>;
