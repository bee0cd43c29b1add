//! ASCII STL vertex extraction
//!
//! Only the `vertex x y z` records of an ASCII STL are read; facet normals,
//! loop markers and solid names are ignored. Some exporters add `color`
//! records that most STL readers reject; those lines are skipped.
//!
//! Vertices shared between facets appear once in the output, sorted
//! lexicographically by `(x, y, z)`. For a rectangle lying in an
//! axis-aligned plane this puts a right-angled corner triangle first, which is
//! what [`crate::patch::measure`] expects.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::MeshSource;
use crate::errors::{io_err, AreaSourceError, Result};
use crate::vector::Vec3;

/// True for a `color` record; the header line (index 0) never is one
fn is_color_record(idx: usize, line: &str) -> bool {
    idx > 0 && line.trim_start().starts_with("color")
}

/// Drops every `color` record after the header line
///
/// The first line (`solid <name>`) is kept verbatim even if it happens to
/// start with `color`.
pub fn strip_color_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.lines().enumerate() {
        if !is_color_record(idx, line) {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn parse_vertex(fields: &[&str], line_no: usize) -> Result<Vec3> {
    if fields.len() != 3 {
        return Err(AreaSourceError::MeshFormat {
            line: line_no,
            message: format!("expected 3 coordinates, found {}", fields.len()),
        });
    }

    let mut coords = [0.0; 3];
    for (slot, field) in coords.iter_mut().zip(fields) {
        let value = field
            .parse::<f64>()
            .map_err(|e| AreaSourceError::MeshFormat {
                line: line_no,
                message: format!("bad coordinate {field:?}: {e}"),
            })?;
        // -0.0 + 0.0 is +0.0, so signed zeros deduplicate together
        *slot = value + 0.0;
    }
    Ok(Vec3::from(coords))
}

fn lexicographic(a: &Vec3, b: &Vec3) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

/// Parses the unique vertices of an ASCII STL document
///
/// `color` records are skipped in place, so line numbers in
/// [`AreaSourceError::MeshFormat`] are 1-based lines of `text` itself. A
/// document without any `vertex` record yields an empty list.
pub fn parse_ascii_stl(text: &str) -> Result<Vec<Vec3>> {
    let mut vertices = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if is_color_record(idx, line) {
            continue;
        }
        let mut fields = line.split_whitespace();
        if fields.next() != Some("vertex") {
            continue;
        }
        let coords: Vec<&str> = fields.collect();
        vertices.push(parse_vertex(&coords, idx + 1)?);
    }

    let total = vertices.len();
    vertices.sort_by(lexicographic);
    vertices.dedup_by(|a, b| lexicographic(a, b) == Ordering::Equal);
    debug!("Parsed {} vertex records, {} unique", total, vertices.len());

    Ok(vertices)
}

/// Reads the unique vertices of an ASCII STL file
pub fn read_ascii_stl<P: AsRef<Path>>(path: P) -> Result<Vec<Vec3>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    debug!("Reading mesh {}", path.display());
    parse_ascii_stl(&text)
}

/// An ASCII STL file on disk
#[derive(Debug, Clone)]
pub struct StlFile {
    path: PathBuf,
}

impl StlFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        StlFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MeshSource for StlFile {
    fn vertices(&self) -> Result<Vec<Vec3>> {
        read_ascii_stl(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const QUAD_STL: &str = "solid inlet
  facet normal 0 0 1
    outer loop
      vertex 2 1 0
      vertex 0 0 0
      vertex 2 0 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 2 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid inlet
";

    #[test]
    fn test_strip_color_lines() {
        let text = "solid colored\n  color 1 0 0\nfacet normal 0 0 1\ncolor 0 1 0\nendsolid\n";
        assert_eq!(
            strip_color_lines(text),
            "solid colored\nfacet normal 0 0 1\nendsolid\n"
        );

        // Header is never filtered
        assert_eq!(strip_color_lines("color header\ncolor 1"), "color header\n");
        assert_eq!(strip_color_lines(""), "");
    }

    #[test]
    fn test_parse_dedups_and_sorts() {
        let vertices = parse_ascii_stl(QUAD_STL).unwrap();
        assert_eq!(
            vertices,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_color_records() {
        let colored = QUAD_STL.replace("    outer loop\n", "    color 0.5 0.5 0.5\n    outer loop\n");
        assert_eq!(
            parse_ascii_stl(&colored).unwrap(),
            parse_ascii_stl(QUAD_STL).unwrap()
        );
    }

    #[test]
    fn test_parse_scientific_notation() {
        let text = "solid s\nvertex 1.5e+01 -2E-3 0\nendsolid s\n";
        assert_eq!(
            parse_ascii_stl(text).unwrap(),
            vec![Vec3::new(15.0, -0.002, 0.0)]
        );
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let text = "solid s\nfacet normal 0 0 1\nvertex 1 2\nendsolid s\n";
        match parse_ascii_stl(text) {
            Err(AreaSourceError::MeshFormat { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected mesh format error, got {:?}", other),
        }

        let text = "solid s\nvertex 1 two 3\n";
        assert!(matches!(
            parse_ascii_stl(text),
            Err(AreaSourceError::MeshFormat { line: 2, .. })
        ));
    }

    #[test]
    fn test_bad_line_counts_color_records() {
        // Reported line numbers match the file as written, color records included
        let text = "solid s
  color 1 0 0
facet normal 0 0 1
  color 0 1 0
vertex 1 2
";
        assert!(matches!(
            parse_ascii_stl(text),
            Err(AreaSourceError::MeshFormat { line: 5, .. })
        ));

        let text = "solid s
color 1 0 0
vertex 0 0 0
vertex 1 nan? 0
";
        match parse_ascii_stl(text) {
            Err(AreaSourceError::MeshFormat { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("nan?"), "{}", message);
            }
            other => panic!("expected mesh format error, got {:?}", other),
        }
    }

    #[test]
    fn test_signed_zero_is_one_vertex() {
        let text = "solid s\nvertex 0 1 -0\nvertex 0.0 1 0\nendsolid s\n";
        assert_eq!(
            parse_ascii_stl(text).unwrap(),
            vec![Vec3::new(0.0, 1.0, 0.0)]
        );
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_ascii_stl("solid empty\nendsolid empty\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(QUAD_STL.as_bytes()).unwrap();

        let source = StlFile::new(file.path());
        assert_eq!(source.vertices().unwrap().len(), 4);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.stl");
        match read_ascii_stl(&missing) {
            Err(AreaSourceError::FileError { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected file error, got {:?}", other),
        }
    }
}
