//! Read-only triangle meshes fed to the rasterizer.
//!
//! The rasterizer only needs three things from a model: how many faces it
//! has, the three vertex indices of each face, and vertex positions. That
//! contract is [`MeshSource`]; [`Model`] implements it for OBJ files and the
//! built-in demo cube.

use std::io::BufRead;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::math::Vec3f;

/// Errors produced while building a [`Model`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("face {face} references vertex {index}, but the model has {count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
}

/// Face/vertex access used by the draw passes.
pub trait MeshSource {
    fn face_count(&self) -> usize;

    /// Zero-based vertex indices of face `i`.
    fn face(&self, i: usize) -> [usize; 3];

    /// Position of vertex `i`, nominally in `[-1, 1]`.
    fn vertex(&self, i: usize) -> Vec3f;

    /// The three positions of face `i`.
    fn face_vertices(&self, i: usize) -> [Vec3f; 3] {
        self.face(i).map(|index| self.vertex(index))
    }
}

/// A triangle mesh with validated indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vec3f>,
    faces: Vec<[usize; 3]>,
}

impl Model {
    /// Builds a model, checking every face index against the vertex list.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3f>,
        faces: Vec<[usize; 3]>,
    ) -> Result<Self, LoadError> {
        let count = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&index| index >= count) {
                return Err(LoadError::IndexOutOfRange { face, index, count });
            }
        }
        Ok(Self {
            name: name.into(),
            vertices,
            faces,
        })
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects/groups in the file are merged into one mesh. Polygons are
    /// triangulated and materials are ignored.
    pub fn from_obj(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file_path = file_path.as_ref();
        let (models, _materials) = tobj::load_obj(file_path, &Self::load_options())?;
        let name = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let model = Self::from_tobj(name, &models)?;
        info!(
            "loaded {} ({} vertices, {} faces)",
            file_path.display(),
            model.vertices.len(),
            model.faces.len()
        );
        Ok(model)
    }

    /// Parse OBJ text from a reader. Material libraries are not resolved.
    pub fn from_obj_reader(
        name: impl Into<String>,
        reader: &mut impl BufRead,
    ) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj_buf(reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_tobj(name.into(), &models)
    }

    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }

    fn from_tobj(name: String, models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for model in models {
            let mesh = &model.mesh;
            let base = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3f::new(p[0], p[1], p[2])),
            );
            faces.extend(mesh.indices.chunks_exact(3).map(|f| {
                [
                    base + f[0] as usize,
                    base + f[1] as usize,
                    base + f[2] as usize,
                ]
            }));
        }

        Self::new(name, vertices, faces)
    }

    /// Unit cube centered at the origin, turned so three faces face the viewer.
    ///
    /// Faces wind counter-clockwise when seen from outside.
    pub fn cube() -> Self {
        const CORNERS: [[f32; 3]; 8] = [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ];
        const FACES: [[usize; 3]; 12] = [
            // Front (+z)
            [4, 5, 6],
            [4, 6, 7],
            // Back (-z)
            [1, 0, 3],
            [1, 3, 2],
            // Right (+x)
            [5, 1, 2],
            [5, 2, 6],
            // Left (-x)
            [0, 4, 7],
            [0, 7, 3],
            // Top (+y)
            [7, 6, 2],
            [7, 2, 3],
            // Bottom (-y)
            [0, 1, 5],
            [0, 5, 4],
        ];

        let vertices = CORNERS
            .iter()
            .map(|&c| Vec3f::from(c).rotate_x(-0.5).rotate_y(0.6))
            .collect();

        Self {
            name: "cube".to_string(),
            vertices,
            faces: FACES.to_vec(),
        }
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3f] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }
}

impl MeshSource for Model {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, i: usize) -> [usize; 3] {
        self.faces[i]
    }

    fn vertex(&self, i: usize) -> Vec3f {
        self.vertices[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD_OBJ: &str = "\
o quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
f 1 2 3 4
";

    #[test]
    fn obj_quad_is_triangulated() {
        let model = Model::from_obj_reader("quad", &mut Cursor::new(QUAD_OBJ)).unwrap();
        assert_eq!(model.name(), "quad");
        assert_eq!(model.vertices().len(), 4);
        assert_eq!(model.face_count(), 2);
        for i in 0..model.face_count() {
            assert!(model.face(i).iter().all(|&v| v < 4));
        }
        assert_eq!(model.vertex(2), Vec3f::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Model::new("bad", vec![Vec3f::ZERO; 3], vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                face: 0,
                index: 3,
                count: 3
            }
        ));
    }

    #[test]
    fn cube_fits_normalized_range() {
        let cube = Model::cube();
        assert_eq!(cube.face_count(), 12);
        for v in cube.vertices() {
            assert!(v.x.abs() <= 1.0 && v.y.abs() <= 1.0 && v.z.abs() <= 1.0);
        }
    }

    #[test]
    fn cube_faces_wind_outward() {
        let cube = Model::cube();
        for i in 0..cube.face_count() {
            let [a, b, c] = cube.face_vertices(i);
            let outward = (b - a).cross(c - a);
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(outward.dot(centroid) > 0.0, "face {i} winds inward");
        }
    }

    #[test]
    fn missing_file_reports_obj_error() {
        let err = Model::from_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj(_)));
    }
}
