//! Triangle meshes.
//!
//! Vertex positions are stored in world space. When the mesh matrix mirrors (negative
//! determinant) the positions are mirrored through it on both read and write, so a mesh read
//! from a file always pairs with a right handed local frame.

use crate::{
    material::Material,
    math::{extend_bounds, face_normal, matrix_from_4x3, matrix_to_4x3, vector_normalize},
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, ChunkParseError,
    },
};
use glam::{Mat4, Vec3};
use linked_hash_map::LinkedHashMap;
use log::{debug, warn};
use std::io::{Seek, Write};

/// Texture projection types stored in `MapData::projection`.
pub mod projection {
    pub const NONE: u16 = 0xFFFF;
    pub const PLANAR: u16 = 0;
    pub const CYLINDRICAL: u16 = 1;
    pub const SPHERICAL: u16 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub index: [u16; 3],
    pub flags: u16,
    /// Index into `File::materials`, or -1.
    pub material: i32,
    pub smoothing_group: u32,
}

impl Face {
    pub const VIS_AC: u16 = 0x01;
    pub const VIS_BC: u16 = 0x02;
    pub const VIS_AB: u16 = 0x04;
    pub const WRAP_U: u16 = 0x08;
    pub const WRAP_V: u16 = 0x10;
    pub const SELECT_3: u16 = 1 << 13;
    pub const SELECT_2: u16 = 1 << 14;
    pub const SELECT_1: u16 = 1 << 15;

    pub fn new(a: u16, b: u16, c: u16) -> Face {
        Face {
            index: [a, b, c],
            flags: 0,
            material: -1,
            smoothing_group: 0,
        }
    }
}

/// Material names of the six sides of a box mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxMap {
    pub front: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub top: String,
    pub bottom: String,
}

impl BoxMap {
    fn is_empty(&self) -> bool {
        self.names().iter().all(|name| name.is_empty())
    }

    fn names(&self) -> [&String; 6] {
        [
            &self.front,
            &self.back,
            &self.left,
            &self.right,
            &self.top,
            &self.bottom,
        ]
    }
}

/// Texture mapping gizmo.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub projection: u16,
    pub tile: [f32; 2],
    pub pos: Vec3,
    pub scale: f32,
    pub matrix: Mat4,
    pub planar_size: [f32; 2],
    pub cylinder_height: f32,
}

impl Default for MapData {
    fn default() -> Self {
        MapData {
            projection: projection::NONE,
            tile: [0.0, 0.0],
            pos: Vec3::ZERO,
            scale: 0.0,
            matrix: Mat4::IDENTITY,
            planar_size: [0.0, 0.0],
            cylinder_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    /// `OBJ_*` flags of the named object, see `file::object_flags`.
    pub object_flags: u32,
    pub color: u8,
    pub matrix: Mat4,
    pub vertices: Vec<Vec3>,
    /// Empty, or one entry per vertex.
    pub texcos: Vec<[f32; 2]>,
    /// Empty, or one entry per vertex.
    pub vflags: Vec<u16>,
    pub faces: Vec<Face>,
    pub box_map: BoxMap,
    pub map_data: MapData,
}

/// `matrix · scale(-1, 1, 1) · matrix⁻¹`, the mirror applied to the vertices of a mesh whose
/// matrix has a negative determinant.
fn mirror(matrix: &Mat4) -> Option<Mat4> {
    if matrix.determinant() < 0.0 {
        Some(*matrix * Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)) * matrix.inverse())
    } else {
        None
    }
}

fn read_matrix(reader: &mut ChunkReader) -> Result<Mat4, ChunkParseError> {
    let mut cols = [Vec3::ZERO; 4];
    for col in cols.iter_mut() {
        *col = reader.read_vector()?;
    }
    Ok(matrix_from_4x3(cols))
}

fn write_matrix<W: Write + Seek>(
    matrix: &Mat4,
    writer: &mut ChunkWriter<W>,
) -> Result<(), ChunkParseError> {
    for col in matrix_to_4x3(matrix).iter() {
        writer.write_vector(*col)?;
    }
    Ok(())
}

impl Mesh {
    pub fn new(name: &str) -> Mesh {
        Mesh {
            name: name.to_string(),
            object_flags: 0,
            color: 0,
            matrix: Mat4::IDENTITY,
            vertices: Vec::new(),
            texcos: Vec::new(),
            vflags: Vec::new(),
            faces: Vec::new(),
            box_map: BoxMap::default(),
            map_data: MapData::default(),
        }
    }

    /// Returns `(min, max)`. An empty mesh gives an inverted box.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let mut bmin = Vec3::splat(f32::MAX);
        let mut bmax = Vec3::splat(-f32::MAX);
        for &v in &self.vertices {
            extend_bounds(&mut bmin, &mut bmax, v);
        }
        (bmin, bmax)
    }

    fn vertex(&self, index: u16) -> Vec3 {
        self.vertices
            .get(usize::from(index))
            .copied()
            .unwrap_or(Vec3::ZERO)
    }

    pub fn calculate_face_normals(&self) -> Vec<Vec3> {
        self.faces
            .iter()
            .map(|f| {
                face_normal(
                    self.vertex(f.index[0]),
                    self.vertex(f.index[1]),
                    self.vertex(f.index[2]),
                )
            })
            .collect()
    }

    /// Per corner normals, `normals[3 * i + j]` belongs to corner `j` of face `i`. A corner
    /// averages the normals of the faces around its vertex that share a smoothing group with
    /// the face, each distinct normal counted once. Faces without a smoothing group are flat.
    pub fn calculate_normals(&self) -> Vec<Vec3> {
        let face_normals = self.calculate_face_normals();

        let mut vertex_faces = vec![Vec::new(); self.vertices.len()];
        for (i, face) in self.faces.iter().enumerate() {
            for &index in &face.index {
                if let Some(list) = vertex_faces.get_mut(usize::from(index)) {
                    list.push(i);
                }
            }
        }

        let mut normals = Vec::with_capacity(3 * self.faces.len());
        let mut seen: Vec<Vec3> = Vec::new();
        for (i, face) in self.faces.iter().enumerate() {
            for &index in &face.index {
                let n = if face.smoothing_group != 0 {
                    let mut n = Vec3::ZERO;
                    seen.clear();
                    let around = vertex_faces
                        .get(usize::from(index))
                        .map(|list| list.as_slice())
                        .unwrap_or(&[]);
                    for &p in around.iter().rev() {
                        let fnormal = face_normals[p];
                        if seen.iter().any(|s| (s.dot(fnormal) - 1.0).abs() < 1e-5) {
                            continue;
                        }
                        if face.smoothing_group & self.faces[p].smoothing_group != 0 {
                            n += fnormal;
                            seen.push(fnormal);
                        }
                    }
                    n
                } else {
                    face_normals[i]
                };
                normals.push(vector_normalize(n));
            }
        }
        normals
    }

    /// Reads an `N_TRI_OBJECT` chunk starting at its header. Material groups are resolved
    /// against `materials`.
    pub(crate) fn read(
        reader: &mut ChunkReader,
        name: &str,
        materials: &[Material],
    ) -> Result<Mesh, ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::N_TRI_OBJECT))?;
        let mut mesh = Mesh::new(name);

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::MESH_MATRIX => mesh.matrix = read_matrix(reader)?,
                ids::MESH_COLOR => mesh.color = reader.read::<u8>()?,
                ids::POINT_ARRAY => {
                    let n = reader.read::<u16>()?;
                    mesh.vertices = (0..n)
                        .map(|_| reader.read_vector())
                        .collect::<Result<_, _>>()?;
                }
                ids::POINT_FLAG_ARRAY => {
                    let n = mesh.capped_count(reader.read::<u16>()?, "vertex flags");
                    mesh.vflags = (0..n)
                        .map(|_| reader.read::<u16>())
                        .collect::<Result<_, _>>()?;
                }
                ids::TEX_VERTS => {
                    let n = mesh.capped_count(reader.read::<u16>()?, "texture coordinates");
                    mesh.texcos = (0..n)
                        .map(|_| -> Result<[f32; 2], ChunkParseError> {
                            Ok([reader.read::<f32>()?, reader.read::<f32>()?])
                        })
                        .collect::<Result<_, _>>()?;
                }
                ids::MESH_TEXTURE_INFO => {
                    let map = &mut mesh.map_data;
                    map.projection = reader.read::<u16>()?;
                    map.tile = [reader.read::<f32>()?, reader.read::<f32>()?];
                    map.pos = reader.read_vector()?;
                    map.scale = reader.read::<f32>()?;
                    map.matrix = read_matrix(reader)?;
                    map.planar_size = [reader.read::<f32>()?, reader.read::<f32>()?];
                    map.cylinder_height = reader.read::<f32>()?;
                }
                ids::FACE_ARRAY => {
                    reader.reset_to_header();
                    mesh.read_faces(reader, materials)?;
                }
                _ => reader.unknown(id),
            }
        }

        if let Some(m) = mirror(&mesh.matrix) {
            for v in mesh.vertices.iter_mut() {
                *v = m.transform_point3(*v);
            }
        }

        debug!(
            "mesh: {} ({} vertices, {} faces)",
            mesh.name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        reader.end_read(&chunk);
        Ok(mesh)
    }

    /// Per vertex arrays can't be longer than the point array they belong to.
    fn capped_count(&self, n: u16, what: &str) -> u16 {
        let nvertices = self.vertices.len();
        if nvertices > 0 && usize::from(n) > nvertices {
            warn!(
                "mesh {}: {} {} for {} vertices, ignoring the excess",
                self.name, n, what, nvertices
            );
            nvertices as u16
        } else {
            n
        }
    }

    fn read_faces(
        &mut self,
        reader: &mut ChunkReader,
        materials: &[Material],
    ) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::FACE_ARRAY))?;

        let n = reader.read::<u16>()?;
        self.faces = Vec::with_capacity(usize::from(n));
        for _ in 0..n {
            let a = reader.read::<u16>()?;
            let b = reader.read::<u16>()?;
            let c = reader.read::<u16>()?;
            let mut face = Face::new(a, b, c);
            face.flags = reader.read::<u16>()?;
            self.faces.push(face);
        }

        if n == 0 {
            reader.end_read(&chunk);
            return Ok(());
        }
        reader.read_tell(&mut chunk);

        while let Some((id, size)) = reader.next_child(&mut chunk)? {
            match id {
                ids::MSH_MAT_GROUP => {
                    let name = reader.read_name()?;
                    let material = match materials.iter().position(|m| m.name == name) {
                        Some(index) => index as i32,
                        None => {
                            warn!("mesh {}: unknown material {:?}", self.name, name);
                            -1
                        }
                    };

                    let count = reader.read::<u16>()?;
                    for _ in 0..count {
                        let index = usize::from(reader.read::<u16>()?);
                        match self.faces.get_mut(index) {
                            Some(face) => face.material = material,
                            None => warn!(
                                "mesh {}: material group {:?} names face {} of {}",
                                self.name,
                                name,
                                index,
                                self.faces.len()
                            ),
                        }
                    }
                }
                ids::SMOOTH_GROUP => {
                    let stored = ((size - 6) / 4) as usize;
                    if stored < self.faces.len() {
                        warn!(
                            "mesh {}: {} smoothing groups for {} faces",
                            self.name,
                            stored,
                            self.faces.len()
                        );
                    }
                    let n = stored.min(self.faces.len());
                    for face in self.faces.iter_mut().take(n) {
                        face.smoothing_group = reader.read::<u32>()?;
                    }
                }
                ids::MSH_BOXMAP => {
                    let map = &mut self.box_map;
                    for name in [
                        &mut map.front,
                        &mut map.back,
                        &mut map.left,
                        &mut map.right,
                        &mut map.top,
                        &mut map.bottom,
                    ]
                    .iter_mut()
                    {
                        **name = reader.read_string(usize::MAX)?;
                    }
                }
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(())
    }

    /// Writes the `N_TRI_OBJECT` chunk. Faces whose material is not an index into `materials`
    /// are left out of every material group.
    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
        materials: &[Material],
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::N_TRI_OBJECT)?;

        let points = writer.begin_write(ids::POINT_ARRAY)?;
        writer.write_count(self.vertices.len())?;
        let m = mirror(&self.matrix);
        for &v in &self.vertices {
            match m {
                Some(m) => writer.write_vector(m.transform_point3(v))?,
                None => writer.write_vector(v)?,
            }
        }
        writer.end_write(points)?;

        if !self.texcos.is_empty() {
            let texcos = writer.begin_write(ids::TEX_VERTS)?;
            writer.write_count(self.texcos.len())?;
            for uv in &self.texcos {
                writer.write(uv[0])?;
                writer.write(uv[1])?;
            }
            writer.end_write(texcos)?;
        }

        if self.map_data.projection != projection::NONE {
            let map = &self.map_data;
            writer.write_header(ids::MESH_TEXTURE_INFO, 92)?;
            writer.write(map.projection)?;
            writer.write(map.tile[0])?;
            writer.write(map.tile[1])?;
            writer.write_vector(map.pos)?;
            writer.write(map.scale)?;
            write_matrix(&map.matrix, writer)?;
            writer.write(map.planar_size[0])?;
            writer.write(map.planar_size[1])?;
            writer.write(map.cylinder_height)?;
        }

        if !self.vflags.is_empty() {
            let flags = writer.begin_write(ids::POINT_FLAG_ARRAY)?;
            writer.write_count(self.vflags.len())?;
            for &f in &self.vflags {
                writer.write(f)?;
            }
            writer.end_write(flags)?;
        }

        writer.write_header(ids::MESH_MATRIX, 54)?;
        write_matrix(&self.matrix, writer)?;

        if self.color != 0 {
            writer.write_header(ids::MESH_COLOR, 7)?;
            writer.write(self.color)?;
        }

        self.write_faces(writer, materials)?;

        writer.end_write(mark)
    }

    fn write_faces<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
        materials: &[Material],
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::FACE_ARRAY)?;
        writer.write_count(self.faces.len())?;
        for face in &self.faces {
            for &index in &face.index {
                writer.write(index)?;
            }
            writer.write(face.flags)?;
        }

        // Groups come out in order of first use.
        let mut groups: LinkedHashMap<i32, Vec<u16>> = LinkedHashMap::new();
        for (i, face) in self.faces.iter().enumerate() {
            if face.material >= 0 && (face.material as usize) < materials.len() {
                groups.entry(face.material).or_insert_with(Vec::new).push(i as u16);
            }
        }
        for (material, faces) in groups.iter() {
            let group = writer.begin_write(ids::MSH_MAT_GROUP)?;
            writer.write_name(&materials[*material as usize].name)?;
            writer.write_count(faces.len())?;
            for &index in faces {
                writer.write(index)?;
            }
            writer.end_write(group)?;
        }

        writer.write_header(ids::SMOOTH_GROUP, 6 + 4 * self.faces.len() as u32)?;
        for face in &self.faces {
            writer.write(face.smoothing_group)?;
        }

        if !self.box_map.is_empty() {
            let boxmap = writer.begin_write(ids::MSH_BOXMAP)?;
            for name in self.box_map.names().iter() {
                writer.write_string(name)?;
            }
            writer.end_write(boxmap)?;
        }

        writer.end_write(mark)
    }
}
