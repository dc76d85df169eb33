//! Line grammar shared by both passes of the reader.
//!
//! Each non-blank line holds one statement: a directive keyword followed by
//! whitespace-separated arguments. A `#` starts a comment that runs to the end
//! of the line.

use nalgebra::{Point2, Point3, Vector3};

use crate::io::lex::{floats, split_line};

/// Statements that carry no data this crate keeps. They are skipped silently.
const SKIPPED: &[&str] = &["o", "s", "l", "p", "mg", "lod"];

/// One parsed line of a Wavefront file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement<'a> {
    /// `v x y z [w]`
    Vertex(Point3<f32>),
    /// `vn x y z`
    Normal(Vector3<f32>),
    /// `vt u v [w]`
    Texcoord(Point2<f32>),
    /// `f ref ref ref ...`; the references are written to the caller's buffer.
    Face,
    /// `g name`; the name is the rest of the line, spaces included.
    Group(&'a str),
    /// `usemtl name`
    UseMaterial(&'a str),
    /// `mtllib name...`
    MaterialLibrary(Vec<&'a str>),
    /// A recognized statement without meaning here, e.g. `s 1`.
    Skipped(&'a str),
}

/// One corner of a face as written: raw indices, possibly negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FaceRef {
    pub v: i64,
    pub t: Option<i64>,
    pub n: Option<i64>,
}

impl FaceRef {
    /// Parse one of `v`, `v/t`, `v/t/n`, `v//n`.
    pub fn parse(token: &str) -> Result<Self, String> {
        let bad = || format!("malformed face reference `{}`", token);
        let int = |s: &str| s.parse::<i64>().map_err(|_| bad());

        let mut parts = token.split('/');
        let v = int(parts.next().ok_or_else(bad)?)?;
        let (t, n) = match (parts.next(), parts.next(), parts.next()) {
            (None, None, None) => (None, None),
            (Some(t), None, None) => (Some(int(t)?), None),
            (Some(""), Some(n), None) => (None, Some(int(n)?)),
            (Some(t), Some(n), None) => (Some(int(t)?), Some(int(n)?)),
            _ => return Err(bad()),
        };
        Ok(Self { v, t, n })
    }
}

/// Resolve a raw face index to a 1-based element index.
///
/// Negative values are relative to `running`, the number of elements of that
/// kind read so far: `-1` is the most recent one. Positive values may point
/// forward in the file, so they are only checked when `total` is known.
pub(crate) fn resolve(
    raw: i64,
    running: usize,
    total: Option<usize>,
    kind: &str,
) -> Result<usize, String> {
    if raw == 0 {
        return Err(format!("{} index 0 is not valid", kind));
    }
    if raw < 0 {
        let resolved = running as i64 + raw + 1;
        if resolved < 1 {
            return Err(format!(
                "relative {} index {} reaches before the first {} ({} read so far)",
                kind, raw, kind, running
            ));
        }
        return Ok(resolved as usize);
    }
    let resolved = raw as usize;
    if let Some(total) = total {
        if resolved > total {
            return Err(format!(
                "{} index {} out of range (file has {})",
                kind, resolved, total
            ));
        }
    }
    Ok(resolved)
}

/// Parse a line. Blank and comment-only lines yield `Ok(None)`.
///
/// Face references are parsed into `refs`, which is cleared first.
pub(crate) fn parse_line<'a>(
    line: &'a str,
    refs: &mut Vec<FaceRef>,
) -> Result<Option<Statement<'a>>, String> {
    let Some((keyword, args)) = split_line(line) else {
        return Ok(None);
    };

    let statement = match keyword {
        "v" => {
            let [x, y, z] = floats::<3>(args, 1, "vertex")?;
            Statement::Vertex(Point3::new(x, y, z))
        }
        "vn" => {
            let [x, y, z] = floats::<3>(args, 0, "normal")?;
            Statement::Normal(Vector3::new(x, y, z))
        }
        "vt" => {
            let [u, v] = floats::<2>(args, 1, "texture coordinate")?;
            Statement::Texcoord(Point2::new(u, v))
        }
        "f" => {
            refs.clear();
            for token in args.split_whitespace() {
                refs.push(FaceRef::parse(token)?);
            }
            if refs.len() < 3 {
                return Err(format!("face needs at least 3 corners, found {}", refs.len()));
            }
            Statement::Face
        }
        "g" => Statement::Group(args),
        "usemtl" => {
            if args.is_empty() {
                return Err("usemtl without a material name".to_string());
            }
            Statement::UseMaterial(args)
        }
        "mtllib" => {
            let names: Vec<&str> = args.split_whitespace().collect();
            if names.is_empty() {
                return Err("mtllib without a file name".to_string());
            }
            Statement::MaterialLibrary(names)
        }
        k if SKIPPED.contains(&k) => Statement::Skipped(k),
        k => return Err(format!("unknown directive `{}`", k)),
    };
    Ok(Some(statement))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Statement<'_>>, String> {
        parse_line(line, &mut Vec::new())
    }

    #[test]
    fn test_face_ref_forms() {
        let r = |v, t, n| FaceRef { v, t, n };
        assert_eq!(FaceRef::parse("3").unwrap(), r(3, None, None));
        assert_eq!(FaceRef::parse("3/4").unwrap(), r(3, Some(4), None));
        assert_eq!(FaceRef::parse("3/4/5").unwrap(), r(3, Some(4), Some(5)));
        assert_eq!(FaceRef::parse("3//5").unwrap(), r(3, None, Some(5)));
        assert_eq!(FaceRef::parse("-1//-2").unwrap(), r(-1, None, Some(-2)));
    }

    #[test]
    fn test_face_ref_rejects_garbage() {
        assert!(FaceRef::parse("a").is_err());
        assert!(FaceRef::parse("1/2/3/4").is_err());
        assert!(FaceRef::parse("1/").is_err());
        assert!(FaceRef::parse("").is_err());
    }

    #[test]
    fn test_resolve_relative() {
        // three vertices read so far: -1 is the third, -3 the first
        assert_eq!(resolve(-1, 3, None, "vertex"), Ok(3));
        assert_eq!(resolve(-3, 3, None, "vertex"), Ok(1));
        assert!(resolve(-4, 3, None, "vertex").is_err());
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve(7, 2, None, "vertex"), Ok(7));
        assert_eq!(resolve(7, 2, Some(8), "vertex"), Ok(7));
        assert!(resolve(9, 2, Some(8), "vertex").is_err());
        assert!(resolve(0, 2, Some(8), "vertex").is_err());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# just a comment").unwrap(), None);
        assert_eq!(
            parse("v 1 2 3 # trailing").unwrap(),
            Some(Statement::Vertex(Point3::new(1.0, 2.0, 3.0)))
        );
    }

    #[test]
    fn test_vertex_arity() {
        assert!(parse("v 1 2").is_err());
        assert!(parse("v 1 2 3 1").is_ok());
        assert!(parse("v 1 2 3 1 0").is_err());
        assert!(parse("vn 0 0 1 0").is_err());
        assert_eq!(
            parse("vt 0.5 0.25").unwrap(),
            Some(Statement::Texcoord(Point2::new(0.5, 0.25)))
        );
    }

    #[test]
    fn test_face_statement() {
        let mut refs = Vec::new();
        let s = parse_line("f 1/1/1 2/2/2 3/3/3 4/4/4", &mut refs).unwrap();
        assert_eq!(s, Some(Statement::Face));
        assert_eq!(refs.len(), 4);
        assert!(parse("f 1 2").is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(parse("g left arm").unwrap(), Some(Statement::Group("left arm")));
        assert_eq!(parse("usemtl Brass").unwrap(), Some(Statement::UseMaterial("Brass")));
        assert_eq!(
            parse("mtllib a.mtl b.mtl").unwrap(),
            Some(Statement::MaterialLibrary(vec!["a.mtl", "b.mtl"]))
        );
        assert!(parse("usemtl").is_err());
    }

    #[test]
    fn test_unknown_and_skipped() {
        assert_eq!(parse("s off").unwrap(), Some(Statement::Skipped("s")));
        assert_eq!(parse("o body").unwrap(), Some(Statement::Skipped("o")));
        assert!(parse("vp 0.1 0.2").is_err());
        assert!(parse("bogus").is_err());
    }
}
