//! STL export of scene meshes.
//!
//! STL keeps only raw triangles with normals. Groups, names and materials
//! are lost.

use crate::geom::triangles::TriangleIndex;
use crate::{HasMesh, Mesh, Point, Vector};
use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    /// Human-readable text
    Ascii,
    /// Compact little-endian binary
    Binary,
}

/// Writes a mesh to an STL file.
pub fn write_stl(path: &Path, mesh: &Mesh, name: &str, format: StlFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        StlFormat::Ascii => write_stl_ascii(&mut writer, mesh, name),
        StlFormat::Binary => write_stl_binary(&mut writer, mesh, name),
    }
    .with_context(|| format!("Failed to write STL: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Meshes `obj` and writes it to an STL file.
pub fn write_stl_from<T: HasMesh>(
    path: &Path,
    obj: &T,
    name: &str,
    format: StlFormat,
) -> Result<()> {
    write_stl(path, &obj.copy_mesh(), name, format)
}

fn triangle(mesh: &Mesh, tri: &TriangleIndex) -> Result<[Point; 3]> {
    let get = |i: usize| {
        mesh.vertices
            .get(i)
            .copied()
            .ok_or_else(|| anyhow!("Face refers to missing vertex {}", i))
    };
    Ok([get(tri.0)?, get(tri.1)?, get(tri.2)?])
}

fn facet_normal(pts: &[Point; 3]) -> Vector {
    Vector::normal(pts[0], pts[1], pts[2]).unwrap_or(Vector::unit_z())
}

fn write_stl_ascii<W: Write>(writer: &mut W, mesh: &Mesh, name: &str) -> Result<()> {
    writeln!(writer, "solid {}", name)?;
    for tri in &mesh.faces {
        let pts = triangle(mesh, tri)?;
        let n = facet_normal(&pts);
        writeln!(writer, "  facet normal {} {} {}", n.dx, n.dy, n.dz)?;
        writeln!(writer, "    outer loop")?;
        for p in pts {
            writeln!(writer, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    Ok(())
}

fn write_f32s<W: Write>(writer: &mut W, values: [f64; 3]) -> Result<()> {
    for v in values {
        writer.write_all(&(v as f32).to_le_bytes())?;
    }
    Ok(())
}

fn write_stl_binary<W: Write>(writer: &mut W, mesh: &Mesh, name: &str) -> Result<()> {
    // 80-byte header, must not start with "solid"
    let mut header = [0u8; 80];
    let text = format!("binary STL - {}", name);
    let len = text.len().min(80);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.faces.len()).context("Too many triangles for binary STL")?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in &mesh.faces {
        let pts = triangle(mesh, tri)?;
        let n = facet_normal(&pts);
        write_f32s(writer, [n.dx, n.dy, n.dz])?;
        for p in pts {
            write_f32s(writer, [p.x, p.y, p.z])?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Reads an ASCII or binary STL file into a mesh with shared vertices.
pub fn read_stl(path: &Path) -> Result<Mesh> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    // Binary headers may also start with "solid", so look for facets too
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let mesh = if head.trim_start().starts_with("solid") && head.contains("facet") {
        read_stl_ascii(BufReader::new(bytes.as_slice()))
    } else {
        read_stl_binary(bytes.as_slice())
    };
    mesh.with_context(|| format!("Failed to read STL: {}", path.display()))
}

fn read_stl_ascii<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut builder = MeshBuilder::default();
    let mut current: Vec<Point> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("vertex") {
            let coords: Vec<f64> = rest
                .split_whitespace()
                .map(|s| {
                    s.parse::<f64>()
                        .with_context(|| format!("Invalid vertex coordinate: {}", s))
                })
                .collect::<Result<_>>()?;
            if coords.len() != 3 {
                return Err(anyhow!("Vertex needs 3 coordinates: {}", trimmed));
            }
            current.push(Point::new(coords[0], coords[1], coords[2]));
        } else if trimmed.starts_with("endloop") {
            if current.len() != 3 {
                return Err(anyhow!("Facet with {} vertices", current.len()));
            }
            builder.add_triangle([current[0], current[1], current[2]]);
            current.clear();
        }
    }
    Ok(builder.build())
}

fn read_f32s<R: Read>(reader: &mut R) -> Result<[f64; 3]> {
    let mut buf = [0u8; 12];
    reader.read_exact(&mut buf)?;
    let mut out = [0.; 3];
    for (i, chunk) in buf.chunks_exact(4).enumerate() {
        out[i] = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64;
    }
    Ok(out)
}

fn read_stl_binary<R: Read>(mut reader: R) -> Result<Mesh> {
    let mut header = [0u8; 80];
    reader.read_exact(&mut header).context("Truncated STL header")?;
    let mut count = [0u8; 4];
    reader.read_exact(&mut count)?;
    let num_triangles = u32::from_le_bytes(count) as usize;

    let mut builder = MeshBuilder::default();
    for _ in 0..num_triangles {
        // Normal is recomputed from the vertices
        read_f32s(&mut reader)?;
        let mut pts = [Point::origin(); 3];
        for p in pts.iter_mut() {
            let [x, y, z] = read_f32s(&mut reader)?;
            *p = Point::new(x, y, z);
        }
        let mut attr = [0u8; 2];
        reader.read_exact(&mut attr)?;
        builder.add_triangle(pts);
    }
    Ok(builder.build())
}

/// Flat triangle soup, shared vertices merged.
#[derive(Default)]
struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    fn add_triangle(&mut self, pts: [Point; 3]) {
        let i = self.mesh.vertices.len();
        self.mesh.vertices.extend(pts);
        self.mesh.faces.push(TriangleIndex(i, i + 1, i + 2));
    }

    fn build(self) -> Mesh {
        self.mesh.deduplicate_vertices()
    }
}
