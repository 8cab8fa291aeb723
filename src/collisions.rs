use std::path::Path;

use crate::error::{Error, Result, Stage};
use crate::text;

/// One binary collision point in the transverse plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionPoint {
    pub x: f64,
    pub y: f64,
}

/// Read the collision points of one event. Lines starting with `#` are comments.
///
/// Only the first two columns are used; anything after them is ignored.
pub fn load(path: &Path) -> Result<Vec<CollisionPoint>> {
    let reader = text::open(Stage::Collisions, path)?;

    let mut points = Vec::new();
    for line in text::numbered_lines(reader, Stage::Collisions, path) {
        let (line_no, line) = line?;
        if line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
            return Err(Error::Parse {
                stage: Stage::Collisions,
                path: path.to_path_buf(),
                line: line_no,
                reason: "expected two coordinates".into(),
            });
        };
        points.push(CollisionPoint {
            x: text::parse_value(Stage::Collisions, path, line_no, x)?,
            y: text::parse_value(Stage::Collisions, path, line_no, y)?,
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn skips_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bcp1.dat");
        fs::write(
            &path,
            "# binary collision points\n# x y\n-1.25 0.5\n\n2.0   -3e-1 17\n",
        )
        .unwrap();

        let points = load(&path).unwrap();
        assert_eq!(
            points,
            vec![
                CollisionPoint { x: -1.25, y: 0.5 },
                CollisionPoint { x: 2.0, y: -0.3 },
            ]
        );
    }

    #[test]
    fn comment_only_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bcp2.dat");
        fs::write(&path, "# nothing collided\n").unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn single_column_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bcp3.dat");
        fs::write(&path, "1.0 2.0\n4.0\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
        assert_eq!(err.exit_code(), -5);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("bcp4.dat")).unwrap_err();
        assert!(matches!(err, Error::Io { stage: Stage::Collisions, .. }));
        assert_eq!(err.exit_code(), -5);
    }
}
