use std::io::Write;

use crate::error::PixmeshResult;
use crate::mesh::QuadMesh;

/// Writes `mesh` as ASCII PLY: float positions, uchar per-vertex RGBA, quad
/// faces as 4-index lists. Readable by common mesh viewers.
pub fn write_ply<W: Write>(mesh: &QuadMesh, mut out: W) -> PixmeshResult<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format ascii 1.0")?;
    writeln!(out, "comment generated by pixmesh")?;
    writeln!(out, "element vertex {}", mesh.vertex_count())?;
    writeln!(out, "property float x")?;
    writeln!(out, "property float y")?;
    writeln!(out, "property float z")?;
    writeln!(out, "property uchar red")?;
    writeln!(out, "property uchar green")?;
    writeln!(out, "property uchar blue")?;
    writeln!(out, "property uchar alpha")?;
    writeln!(out, "element face {}", mesh.quad_count())?;
    writeln!(out, "property list uchar uint vertex_indices")?;
    writeln!(out, "end_header")?;

    for (p, c) in mesh.positions().iter().zip(mesh.colors()) {
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            p.x,
            p.y,
            p.z,
            channel(c[0]),
            channel(c[1]),
            channel(c[2]),
            channel(c[3])
        )?;
    }
    for f in mesh.faces() {
        writeln!(out, "4 {} {} {} {}", f[0], f[1], f[2], f[3])?;
    }
    out.flush()?;
    Ok(())
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
