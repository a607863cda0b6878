/// Wavefront OBJ export with one normal per face
use std::io;

use crate::geometry::Mesh;

/// Render a mesh as OBJ text
pub fn to_obj(mesh: &Mesh, name: &str) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_obj(mesh, name, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write a mesh as OBJ.
///
/// Faces reference vertices and their face normal with 1-based
/// `v//vn` pairs.
pub fn write_obj<W: io::Write>(mesh: &Mesh, name: &str, mut writer: W) -> io::Result<()> {
    writeln!(writer, "# {} OBJ file", name)?;
    writeln!(writer, "o {}", name)?;

    writeln!(writer, "# Vertices: {}", mesh.vertex_count())?;
    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    writeln!(writer, "# Normals: {}", mesh.triangle_count())?;
    for n in mesh.face_normals() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    writeln!(writer, "# Faces: {}", mesh.triangle_count())?;
    for (i, [a, b, c]) in mesh.triangles().iter().enumerate() {
        let k = i + 1;
        writeln!(writer, "f {}//{k} {}//{k} {}//{k}", a + 1, b + 1, c + 1)?;
    }

    writer.flush()
}
