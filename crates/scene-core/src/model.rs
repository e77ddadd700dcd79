//! OBJ/MTL decoding into a flat, lit-ready triangle list.

use crate::bounds::Aabb;
use crate::color::srgb_to_linear_rgb;
use crate::constants::DEFAULT_DIFFUSE_RGB;
use crate::error::{Result, SceneError};
use glam::Vec3;
use std::io::BufRead;
use std::path::Path;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// Unindexed triangle list in model space.
#[derive(Clone, Debug)]
pub struct ModelMesh {
    pub vertices: Vec<MeshVertex>,
    pub bounds: Aabb,
}

impl ModelMesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_lines: true,
        ignore_points: true,
        ..Default::default()
    }
}

/// Decode an OBJ held in memory, resolving `mtllib` against `mtl`.
///
/// A missing or broken material library falls back to the default diffuse
/// colour; the geometry is still usable.
pub fn from_obj_bytes(obj: &[u8], mtl: Option<&[u8]>) -> Result<ModelMesh> {
    let mtl = mtl.and_then(|bytes| match parse_mtl(&mut std::io::BufReader::new(bytes)) {
        Ok(_) => Some(bytes),
        Err(e) => {
            log::warn!("[model] {e}; using default colour");
            None
        }
    });
    let mut reader = std::io::BufReader::new(obj);
    let (models, materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_path| match mtl {
        Some(bytes) => tobj::load_mtl_buf(&mut std::io::BufReader::new(bytes)),
        None => Err(tobj::LoadError::OpenFileFailed),
    })
    .map_err(SceneError::Obj)?;
    let materials = materials.unwrap_or_else(|e| {
        log::warn!("[model] materials unavailable: {e}");
        Vec::new()
    });
    build_mesh(&models, &materials)
}

/// Decode an OBJ from disk; tobj resolves `mtllib` relative to the file.
pub fn from_obj_path(path: impl AsRef<Path>) -> Result<ModelMesh> {
    let (models, materials) =
        tobj::load_obj(path.as_ref(), &load_options()).map_err(SceneError::Obj)?;
    let materials = materials.unwrap_or_else(|e| {
        log::warn!("[model] materials unavailable: {e}");
        Vec::new()
    });
    build_mesh(&models, &materials)
}

/// Decode a standalone MTL library.
pub fn parse_mtl<R: BufRead>(reader: &mut R) -> Result<Vec<tobj::Material>> {
    tobj::load_mtl_buf(reader)
        .map(|(materials, _)| materials)
        .map_err(SceneError::Mtl)
}

fn build_mesh(models: &[tobj::Model], materials: &[tobj::Material]) -> Result<ModelMesh> {
    let mut vertices = Vec::new();
    for m in models {
        let mesh = &m.mesh;
        let color = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|mat| mat.diffuse)
            .unwrap_or(DEFAULT_DIFFUSE_RGB);
        // Kd is authored in sRGB; lighting wants linear
        let color = srgb_to_linear_rgb(color);
        let count = mesh.positions.len() / 3;
        let has_normals = mesh.normals.len() == mesh.positions.len();
        let fetch = |i: u32, data: &[f32]| -> Result<Vec3> {
            let i = i as usize;
            if i >= count {
                return Err(SceneError::BadIndex {
                    index: i,
                    vertices: count,
                });
            }
            Ok(Vec3::new(data[3 * i], data[3 * i + 1], data[3 * i + 2]))
        };

        for tri in mesh.indices.chunks_exact(3) {
            let p = [
                fetch(tri[0], &mesh.positions)?,
                fetch(tri[1], &mesh.positions)?,
                fetch(tri[2], &mesh.positions)?,
            ];
            let face = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();
            for (k, &idx) in tri.iter().enumerate() {
                let n = if has_normals {
                    fetch(idx, &mesh.normals)?.normalize_or_zero()
                } else {
                    face
                };
                vertices.push(MeshVertex {
                    position: p[k].to_array(),
                    normal: n.to_array(),
                    color,
                });
            }
        }
    }

    let bounds = Aabb::from_points(vertices.iter().map(|v| Vec3::from(v.position)))
        .ok_or(SceneError::EmptyModel)?;
    Ok(ModelMesh { vertices, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
mtllib material.mtl
v 0 0 0
v 2 0 0
v 2 1 0
v 0 1 0
usemtl red
f 1 2 3 4
";

    const RED_MTL: &str = "\
newmtl red
Kd 1.0 0.0 0.0
";

    #[test]
    fn quad_is_triangulated_with_material_color() {
        let mesh = from_obj_bytes(QUAD_OBJ.as_bytes(), Some(RED_MTL.as_bytes())).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        assert_eq!(mesh.bounds.max, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn missing_mtl_uses_default_color_and_flat_normals() {
        let mesh = from_obj_bytes(QUAD_OBJ.as_bytes(), None).unwrap();
        assert_eq!(mesh.vertices[0].color, srgb_to_linear_rgb(DEFAULT_DIFFUSE_RGB));
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn obj_without_faces_is_empty_model() {
        let err = from_obj_bytes(b"v 0 0 0\nv 1 0 0\n", None).unwrap_err();
        assert!(matches!(err, SceneError::EmptyModel));
    }

    #[test]
    fn parse_mtl_reads_diffuse() {
        let mats = parse_mtl(&mut std::io::BufReader::new(RED_MTL.as_bytes())).unwrap();
        assert_eq!(mats.len(), 1);
        assert_eq!(mats[0].diffuse, Some([1.0, 0.0, 0.0]));
    }

    const BROKEN_MTL: &str = "\
newmtl red
Kd one zero zero
";

    #[test]
    fn broken_mtl_is_an_mtl_error() {
        let err = parse_mtl(&mut std::io::BufReader::new(BROKEN_MTL.as_bytes())).unwrap_err();
        assert!(matches!(err, SceneError::Mtl(_)));
    }

    #[test]
    fn broken_mtl_keeps_geometry_with_default_color() {
        let mesh = from_obj_bytes(QUAD_OBJ.as_bytes(), Some(BROKEN_MTL.as_bytes())).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.color == srgb_to_linear_rgb(DEFAULT_DIFFUSE_RGB)));
    }
}
