//! JSON state documents: the piece list after a command, plus how it was reached.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::process::Command;
use symcut::api::{ContourKind, Move, Puzzle, Shape, TransformDef, Vec2Def};

/// One piece: contours in home coordinates and the home → world transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDoc {
    pub outers: Vec<Vec<Vec2Def>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<Vec2Def>>,
    pub transform: TransformDef,
    pub area: f64,
}

impl From<&Shape> for ShapeDoc {
    fn from(s: &Shape) -> Self {
        let mut outers = Vec::new();
        let mut holes = Vec::new();
        for c in s.polygon.contours() {
            let pts: Vec<Vec2Def> = c.points().iter().map(|&p| p.into()).collect();
            match c.kind() {
                ContourKind::Outer => outers.push(pts),
                ContourKind::Hole => holes.push(pts),
            }
        }
        Self {
            outers,
            holes,
            transform: (&s.transform).into(),
            area: s.polygon.area(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDoc {
    pub name: String,
    pub code_rev: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub moves: Vec<Move>,
    pub solved: bool,
    pub total_area: f64,
    pub shapes: Vec<ShapeDoc>,
}

impl StateDoc {
    pub fn capture(name: &str, puzzle: &Puzzle, seed: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            code_rev: current_git_rev(),
            seed,
            moves: puzzle.moves(),
            solved: puzzle.is_solved(),
            total_area: puzzle.total_area(),
            shapes: puzzle.shapes().iter().map(ShapeDoc::from).collect(),
        }
    }

    /// Pieces whose transform is not the identity.
    pub fn displaced(&self, eps: f64) -> usize {
        self.shapes
            .iter()
            .filter(|s| !symcut::Affine2::from(&s.transform).is_identity_eps(eps))
            .count()
    }
}

/// Write `doc` as pretty JSON, creating parent directories.
pub fn write_state<P: AsRef<Path>>(path: P, doc: &StateDoc) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn read_state<P: AsRef<Path>>(path: P) -> Result<StateDoc> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing state {}", path.display()))
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcut::api::Cutter;
    use symcut::Point2;
    use tempfile::tempdir;

    fn puzzle() -> Puzzle {
        Puzzle::new(vec![
            Cutter::regular(4, Point2::new(-0.5, 0.0), 1.0, 0.0),
            Cutter::regular(4, Point2::new(0.5, 0.0), 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn write_creates_parent_dirs_and_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/state.json");
        let mut p = puzzle();
        p.apply_cut(0, 2).unwrap();
        let doc = StateDoc::capture("diamonds", &p, Some(9));
        write_state(&path, &doc).unwrap();
        assert!(path.exists());
        let back = read_state(&path).unwrap();
        assert_eq!(back.moves, vec![Move { cutter: 0, symmetry: 2 }]);
        assert_eq!(back.seed, Some(9));
        assert_eq!(back.shapes.len(), p.shapes().len());
        assert!(!back.solved);
        assert!(back.displaced(1e-7) > 0);
    }

    #[test]
    fn solved_state_has_no_displaced_pieces() {
        let doc = StateDoc::capture("diamonds", &puzzle(), None);
        assert!(doc.solved);
        assert_eq!(doc.displaced(1e-7), 0);
        assert!(doc.moves.is_empty());
        let area: f64 = doc.shapes.iter().map(|s| s.area).sum();
        assert!((area - doc.total_area).abs() < 1e-12);
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_state(dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
