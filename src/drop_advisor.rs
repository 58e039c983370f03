// Client-side approximation of drop legality, used only to highlight candidate squares. The
// server re-validates every drop and may still reject a square listed here (e.g. a pawn drop
// that gives mate, or a drop leaving own king in check).

use std::collections::BTreeSet;

use crate::coord::{Col, Coord, SubjectiveRow};
use crate::grid::Grid;
use crate::piece::{PieceCode, PieceKind};
use crate::side::Side;


pub fn drop_targets(grid: &Grid, side: Side, kind: PieceKind) -> BTreeSet<Coord> {
    Coord::all()
        .filter(|&coord| grid.is_empty_at(coord))
        .filter(|&coord| !(kind == PieceKind::Fu && has_own_pawn(grid, side, coord.col)))
        .filter(|&coord| {
            let rows_to_edge = SubjectiveRow::from_row(coord.row, side).to_zero_based();
            rows_to_edge >= min_rows_to_edge(kind)
        })
        .collect()
}

// Nifu: a second unpromoted pawn of the same side in one column is illegal.
fn has_own_pawn(grid: &Grid, side: Side, col: Col) -> bool {
    let own_pawn = PieceCode::new(PieceKind::Fu, side);
    grid.column(col).any(|piece| piece == Some(own_pawn))
}

// A dropped piece must keep at least one legal move.
fn min_rows_to_edge(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Fu | PieceKind::Ky => 1,
        PieceKind::Ke => 2,
        _ => 0,
    }
}
