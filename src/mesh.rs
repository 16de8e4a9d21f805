//! Triangle-mesh adapter: a [`Sink`] specialization that recognizes the
//! common vertex/face schema, fan-triangulates polygon rows, and presents
//! positions/normals/UVs/faces to the caller as `on_vertex`/`on_face` events.

use num_traits::{Float, NumCast, PrimInt};

use crate::error::{Error, MeshError};
use crate::reader::Sink;
use crate::types::{DataType, Header, PropertyKind, Value};

const U_ALIASES: [&str; 4] = ["u", "s", "texture_u", "texture_s"];
const V_ALIASES: [&str; 4] = ["v", "t", "texture_v", "texture_t"];

fn is_float_kind(kind: DataType) -> bool {
    matches!(kind, DataType::F32 | DataType::F64)
}

struct VertexSlots {
    x: usize,
    y: usize,
    z: usize,
    normals: Option<(usize, usize, usize)>,
    uv: Option<(usize, usize)>,
    completion_trigger: usize,
}

struct FaceSlots {
    vertex_indices: usize,
}

/// A [`Sink`] generic over the caller's chosen numeric representations for
/// vertex positions (`Loc`), normals (`Nrm`), texture coordinates (`UV`) and
/// face indices (`FaceIdx`).
pub struct TriangleMeshAdapter<'a, Loc, Nrm, UV, FaceIdx> {
    on_vertex: Box<dyn FnMut([Loc; 3], Option<[Nrm; 3]>, Option<[UV; 2]>) + 'a>,
    on_face: Box<dyn FnMut(FaceIdx, FaceIdx, FaceIdx) -> Result<(), Error> + 'a>,
    vertex_slots: Option<VertexSlots>,
    face_slots: Option<FaceSlots>,
    vertex_count: u64,
    xyz: [f64; 3],
    nrm: [f64; 3],
    uv: [f64; 2],
}

impl<'a, Loc, Nrm, UV, FaceIdx> TriangleMeshAdapter<'a, Loc, Nrm, UV, FaceIdx>
where
    Loc: Float,
    Nrm: Float,
    UV: Float,
    FaceIdx: PrimInt + NumCast,
{
    pub fn new(
        on_vertex: impl FnMut([Loc; 3], Option<[Nrm; 3]>, Option<[UV; 2]>) + 'a,
        on_face: impl FnMut(FaceIdx, FaceIdx, FaceIdx) -> Result<(), Error> + 'a,
    ) -> Self {
        TriangleMeshAdapter {
            on_vertex: Box::new(on_vertex),
            on_face: Box::new(on_face),
            vertex_slots: None,
            face_slots: None,
            vertex_count: 0,
            xyz: [0.0; 3],
            nrm: [0.0; 3],
            uv: [0.0; 2],
        }
    }

    fn emit_vertex(&mut self) {
        let slots = self.vertex_slots.as_ref().expect("vertex element registered in start");
        let xyz = [
            Loc::from(self.xyz[0]).unwrap_or(Loc::zero()),
            Loc::from(self.xyz[1]).unwrap_or(Loc::zero()),
            Loc::from(self.xyz[2]).unwrap_or(Loc::zero()),
        ];
        let nrm = slots.normals.map(|_| {
            [
                Nrm::from(self.nrm[0]).unwrap_or(Nrm::zero()),
                Nrm::from(self.nrm[1]).unwrap_or(Nrm::zero()),
                Nrm::from(self.nrm[2]).unwrap_or(Nrm::zero()),
            ]
        });
        let uv = slots.uv.map(|_| {
            [
                UV::from(self.uv[0]).unwrap_or(UV::zero()),
                UV::from(self.uv[1]).unwrap_or(UV::zero()),
            ]
        });
        (self.on_vertex)(xyz, nrm, uv);
    }

    fn triangulate(&mut self, indices: &[i64]) -> Result<(), Error> {
        let n = indices.len();
        if n < 3 {
            return Ok(());
        }
        let to_face_idx = |raw: i64| -> Result<FaceIdx, Error> {
            if raw < 0 || raw as u64 >= self.vertex_count {
                return Err(Error::Mesh(MeshError::VertexIndexOutOfRange));
            }
            FaceIdx::from(raw).ok_or(Error::Mesh(MeshError::VertexIndexOutOfRange))
        };
        let v0 = to_face_idx(indices[0])?;
        for i in 0..n - 2 {
            let v1 = to_face_idx(indices[i + 1])?;
            let v2 = to_face_idx(indices[i + 2])?;
            (self.on_face)(v0, v1, v2)?;
        }
        Ok(())
    }
}

impl<'a, Loc, Nrm, UV, FaceIdx> Sink for TriangleMeshAdapter<'a, Loc, Nrm, UV, FaceIdx>
where
    Loc: Float,
    Nrm: Float,
    UV: Float,
    FaceIdx: PrimInt + NumCast,
{
    fn start(&mut self, header: &Header) -> Result<(), Error> {
        let (_, vertex) = header.element("vertex").ok_or(Error::Mesh(MeshError::MissingXYZ))?;
        let scalar_kind = |name: &str| -> Option<(usize, DataType)> {
            vertex.property(name).and_then(|(ordinal, decl)| match decl.kind {
                PropertyKind::Scalar(kind) => Some((ordinal, kind)),
                PropertyKind::List { .. } => None,
            })
        };

        let (x_ord, x_kind) = scalar_kind("x").ok_or(Error::Mesh(MeshError::MissingXYZ))?;
        let (y_ord, y_kind) = scalar_kind("y").ok_or(Error::Mesh(MeshError::MissingXYZ))?;
        let (z_ord, z_kind) = scalar_kind("z").ok_or(Error::Mesh(MeshError::MissingXYZ))?;
        if !is_float_kind(x_kind) || !is_float_kind(y_kind) || !is_float_kind(z_kind) {
            return Err(Error::Mesh(MeshError::XYZWrongType));
        }

        let normals = match (scalar_kind("nx"), scalar_kind("ny"), scalar_kind("nz")) {
            (Some((nx, nxk)), Some((ny, nyk)), Some((nz, nzk))) => {
                if !is_float_kind(nxk) || !is_float_kind(nyk) || !is_float_kind(nzk) {
                    return Err(Error::Mesh(MeshError::NormalWrongType));
                }
                Some((nx, ny, nz))
            }
            _ => None,
        };

        let find_alias = |aliases: &[&str]| -> Option<(usize, DataType)> {
            aliases.iter().find_map(|name| scalar_kind(name))
        };
        let u = find_alias(&U_ALIASES);
        let v = find_alias(&V_ALIASES);
        let uv = match (u, v) {
            (Some((uo, uk)), Some((vo, vk))) => {
                if !is_float_kind(uk) || !is_float_kind(vk) {
                    return Err(Error::Mesh(MeshError::UVWrongType));
                }
                Some((uo, vo))
            }
            _ => None,
        };

        let completion_trigger = vertex.properties.len().saturating_sub(1);

        self.vertex_slots = Some(VertexSlots {
            x: x_ord,
            y: y_ord,
            z: z_ord,
            normals,
            uv,
            completion_trigger,
        });
        self.vertex_count = vertex.count;

        let (_, face) = header.element("face").ok_or(Error::Mesh(MeshError::MissingFaceIndices))?;
        let (vi_ord, vi_decl) = face
            .property("vertex_indices")
            .ok_or(Error::Mesh(MeshError::MissingFaceIndices))?;
        match vi_decl.kind {
            PropertyKind::List { element_kind, .. } if element_kind.is_integral() => {}
            _ => return Err(Error::Mesh(MeshError::FaceIndicesWrongType)),
        }
        self.face_slots = Some(FaceSlots { vertex_indices: vi_ord });

        Ok(())
    }

    fn handle(&mut self, element_name: &str, _property_name: &str, property_ordinal: usize, value: &Value) -> Result<(), Error> {
        if element_name == "vertex" {
            if let Some(slots) = &self.vertex_slots {
                let scalar = value.as_f64_scalar();
                if property_ordinal == slots.x {
                    self.xyz[0] = scalar.unwrap_or(0.0);
                } else if property_ordinal == slots.y {
                    self.xyz[1] = scalar.unwrap_or(0.0);
                } else if property_ordinal == slots.z {
                    self.xyz[2] = scalar.unwrap_or(0.0);
                } else if let Some((nx, ny, nz)) = slots.normals {
                    if property_ordinal == nx {
                        self.nrm[0] = scalar.unwrap_or(0.0);
                    } else if property_ordinal == ny {
                        self.nrm[1] = scalar.unwrap_or(0.0);
                    } else if property_ordinal == nz {
                        self.nrm[2] = scalar.unwrap_or(0.0);
                    }
                }
                if let Some((uo, vo)) = slots.uv {
                    if property_ordinal == uo {
                        self.uv[0] = scalar.unwrap_or(0.0);
                    } else if property_ordinal == vo {
                        self.uv[1] = scalar.unwrap_or(0.0);
                    }
                }
                if property_ordinal == slots.completion_trigger {
                    self.emit_vertex();
                }
            }
        } else if element_name == "face" {
            if let Some(slots) = &self.face_slots {
                if property_ordinal == slots.vertex_indices {
                    if let Some(indices) = value.as_i64_list() {
                        self.triangulate(&indices)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::RecordReader;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn s3_quad_triangulates_to_two_faces() {
        let bytes = b"ply\rformat ascii 1.0\r\
element vertex 4\rproperty float x\rproperty float y\rproperty float z\r\
element face 1\rproperty list uchar int vertex_indices\r\
end_header\r\
0 0 0\r1 0 0\r1 1 0\r0 1 0\r\
4 0 1 2 3\r";

        let vertices: Rc<RefCell<Vec<[f32; 3]>>> = Rc::new(RefCell::new(Vec::new()));
        let faces: Rc<RefCell<Vec<(u32, u32, u32)>>> = Rc::new(RefCell::new(Vec::new()));
        let v2 = vertices.clone();
        let f2 = faces.clone();

        let mut adapter = TriangleMeshAdapter::<f32, f32, f32, u32>::new(
            move |xyz, _nrm, _uv| v2.borrow_mut().push(xyz),
            move |a, b, c| {
                f2.borrow_mut().push((a, b, c));
                Ok(())
            },
        );

        RecordReader::read_all_from_slice(bytes, &mut adapter).expect("streams");

        assert_eq!(vertices.borrow().len(), 4);
        assert_eq!(*faces.borrow(), vec![(0, 1, 2), (0, 2, 3)]);
    }

    #[test]
    fn triangle_row_emits_one_face() {
        let bytes = b"ply\rformat ascii 1.0\r\
element vertex 3\rproperty float x\rproperty float y\rproperty float z\r\
element face 1\rproperty list uchar int vertex_indices\r\
end_header\r\
0 0 0\r1 0 0\r0 1 0\r\
3 0 1 2\r";

        let faces: Rc<RefCell<Vec<(u32, u32, u32)>>> = Rc::new(RefCell::new(Vec::new()));
        let f2 = faces.clone();
        let mut adapter = TriangleMeshAdapter::<f32, f32, f32, u32>::new(
            |_xyz, _nrm, _uv| {},
            move |a, b, c| {
                f2.borrow_mut().push((a, b, c));
                Ok(())
            },
        );
        RecordReader::read_all_from_slice(bytes, &mut adapter).expect("streams");
        assert_eq!(*faces.borrow(), vec![(0, 1, 2)]);
    }

    #[test]
    fn degenerate_row_emits_no_faces() {
        let bytes = b"ply\rformat ascii 1.0\r\
element vertex 2\rproperty float x\rproperty float y\rproperty float z\r\
element face 1\rproperty list uchar int vertex_indices\r\
end_header\r\
0 0 0\r1 0 0\r\
2 0 1\r";

        let faces: Rc<RefCell<Vec<(u32, u32, u32)>>> = Rc::new(RefCell::new(Vec::new()));
        let f2 = faces.clone();
        let mut adapter = TriangleMeshAdapter::<f32, f32, f32, u32>::new(
            |_xyz, _nrm, _uv| {},
            move |a, b, c| {
                f2.borrow_mut().push((a, b, c));
                Ok(())
            },
        );
        RecordReader::read_all_from_slice(bytes, &mut adapter).expect("streams");
        assert!(faces.borrow().is_empty());
    }

    #[test]
    fn missing_vertex_element_rejected() {
        let bytes = b"ply\rformat ascii 1.0\relement face 0\rproperty list uchar int vertex_indices\rend_header\r";
        let mut adapter =
            TriangleMeshAdapter::<f32, f32, f32, u32>::new(|_xyz, _nrm, _uv| {}, |_a, _b, _c| Ok(()));
        let err = RecordReader::read_all_from_slice(bytes, &mut adapter).unwrap_err();
        assert!(matches!(err, Error::Mesh(MeshError::MissingXYZ)));
    }
}
