use serde::{Serialize, Deserialize};

use crate::engine::grid::Grid;
use crate::engine::types::Symbol;

/// Read-only view of the bounding box, for renderers and JSON dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

/// Printable form of a symbol; anything non-printable shows as a space.
pub fn display_char(symbol: Symbol) -> char {
    if symbol.is_ascii_graphic() { symbol as char } else { ' ' }
}

impl Snapshot {
    pub fn capture(grid: &Grid, generation: u64) -> Self {
        let bbox = grid.bbox();
        Snapshot {
            generation,
            width: bbox.width(),
            height: bbox.height(),
            rows: grid
                .rows()
                .map(|row| row.iter().copied().map(display_char).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_masks_control_bytes() {
        let grid = Grid::from_rows(8, 4, &["a\tb", "=="]);
        let snap = Snapshot::capture(&grid, 3);
        assert_eq!(snap.generation, 3);
        assert_eq!((snap.width, snap.height), (3, 2));
        assert_eq!(snap.rows, vec!["a b".to_string(), "== ".to_string()]);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let grid = Grid::from_rows(4, 4, &["0", "="]);
        let json = serde_json::to_string(&Snapshot::capture(&grid, 0)).unwrap();
        assert_eq!(json, r#"{"generation":0,"width":1,"height":2,"rows":["0","="]}"#);
    }
}
