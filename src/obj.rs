//! Wavefront OBJ loading into a [`Model`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use crate::model::{Mesh, Model, Vertex};
use crate::point2d::Point2D;
use crate::point3d::{Point3D, cross3, normalize};

/// One `v/vt/vn` corner of a face, as zero-based indices into the file's pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Corner {
    v: usize,
    vt: Option<usize>,
    vn: Option<usize>,
}

/// Mesh under construction; corners are de-duplicated so shared vertices stay shared.
#[derive(Default)]
struct MeshBuilder {
    name: String,
    vertices: Vec<Vertex>,
    /// Position index each vertex came from, for normal smoothing.
    sources: Vec<usize>,
    indices: Vec<u32>,
    lookup: HashMap<Corner, u32>,
    missing_normals: bool,
}

impl MeshBuilder {
    fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    fn vertex(&mut self, corner: Corner, positions: &[Point3D], texcoords: &[Point2D], normals: &[Point3D]) -> u32 {
        if let Some(&i) = self.lookup.get(&corner) {
            return i;
        }
        let normal = match corner.vn {
            Some(vn) => normals[vn],
            None => {
                self.missing_normals = true;
                Point3D::ZERO
            }
        };
        let tex_coord = corner.vt.map(|vt| texcoords[vt]).unwrap_or_default();
        let i = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(positions[corner.v], normal, tex_coord));
        self.sources.push(corner.v);
        self.lookup.insert(corner, i);
        i
    }

    /// Area-weighted normals shared by every vertex cut from the same position, filled in
    /// only when no corner of the mesh carried one.
    fn smooth_normals(&mut self) {
        if !self.missing_normals || self.vertices.iter().any(|v| v.normal != Point3D::ZERO) {
            return;
        }
        let mut accum: HashMap<usize, Point3D> = HashMap::new();
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize].position);
            let face = cross3(b - a, c - a);
            for &i in tri {
                *accum.entry(self.sources[i as usize]).or_default() += face;
            }
        }
        for (vertex, source) in self.vertices.iter_mut().zip(&self.sources) {
            vertex.normal = normalize(accum.get(source).copied().unwrap_or_default());
        }
    }

    fn build(mut self) -> Option<Mesh> {
        if self.indices.is_empty() {
            return None;
        }
        self.smooth_normals();
        tracing::debug!(mesh = %self.name, vertices = self.vertices.len(), triangles = self.indices.len() / 3, "mesh loaded");
        Some(Mesh::new(self.vertices, self.indices))
    }
}

/// Resolves a 1-based (or negative, relative) OBJ index against a pool of `len` items.
fn resolve_index(token: &str, len: usize) -> Result<usize> {
    let raw: i64 = token.parse().with_context(|| format!("bad index {token:?}"))?;
    let resolved = match raw {
        0 => bail!("index 0 is not valid in OBJ"),
        r if r > 0 => r - 1,
        r => len as i64 + r,
    };
    if resolved < 0 || resolved as usize >= len {
        bail!("index {raw} out of range for {len} elements");
    }
    Ok(resolved as usize)
}

fn parse_face_vertex(s: &str, pools: (usize, usize, usize)) -> Result<Corner> {
    let parts: Vec<&str> = s.split('/').collect();
    let v = resolve_index(parts.first().ok_or_else(|| anyhow!("Missing vertex index"))?, pools.0)?;
    let vt = match parts.get(1) {
        Some(&"") | None => None,
        Some(s) => Some(resolve_index(s, pools.1)?),
    };
    let vn = match parts.get(2) {
        None => None,
        Some(&"") => None,
        Some(s) => Some(resolve_index(s, pools.2)?),
    };
    Ok(Corner { v, vt, vn })
}

fn parse_floats<const N: usize>(tokens: &[&str]) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens.get(i).ok_or_else(|| anyhow!("expected {N} numbers"))?;
        *slot = token.parse().with_context(|| format!("bad number {token:?}"))?;
    }
    Ok(out)
}

/// Parses OBJ text. Each `o`/`g` statement starts a new mesh; polygons are fan
/// triangulated.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Model> {
    let mut positions: Vec<Point3D> = Vec::new();
    let mut texcoords: Vec<Point2D> = Vec::new();
    let mut normals: Vec<Point3D> = Vec::new();
    let mut meshes: Vec<Mesh> = Vec::new();
    let mut current = MeshBuilder::named("default");

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() || tokens[0].starts_with('#') {
            continue
        }
        let context = || format!("line {}: {}", line_no + 1, line.trim());

        match tokens[0] {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&tokens[1..]).with_context(context)?;
                positions.push(Point3D { x, y, z })
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&tokens[1..]).with_context(context)?;
                texcoords.push(Point2D { x: u, y: v })
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&tokens[1..]).with_context(context)?;
                normals.push(Point3D { x, y, z })
            }
            "o" | "g" => {
                let name = tokens.get(1).copied().unwrap_or("unnamed");
                let finished = std::mem::replace(&mut current, MeshBuilder::named(name));
                meshes.extend(finished.build());
            }
            "f" => {
                let pools = (positions.len(), texcoords.len(), normals.len());
                let corners = tokens[1..]
                    .iter()
                    .map(|part| parse_face_vertex(part, pools))
                    .collect::<Result<Vec<Corner>>>()
                    .with_context(context)?;
                if corners.len() < 3 {
                    bail!("{}: face needs at least 3 vertices", context());
                }
                let ids: Vec<u32> = corners
                    .iter()
                    .map(|&c| current.vertex(c, &positions, &texcoords, &normals))
                    .collect();
                for i in 1..ids.len() - 1 {
                    current.indices.extend([ids[0], ids[i], ids[i + 1]]);
                }
            }
            _ => {}
        }
    }
    meshes.extend(current.build());

    Ok(Model::new(meshes)?)
}

pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let model = parse_obj(BufReader::new(file)).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        meshes = model.meshes().len(),
        vertices = model.vertex_count(),
        triangles = model.triangles().len(),
        "model loaded"
    );
    Ok(model)
}
