use std::{fmt, ops};

use itertools::Itertools;
use ndarray::{Array, Array2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::piece::{PieceCode, PieceKind};
use crate::side::Side;


// Wire token for a cell without a piece.
pub const EMPTY: &str = "EMPTY";

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    data: Array2<Option<PieceCode>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    // Layout shown before the first server snapshot arrives.
    pub fn starting_position() -> Self {
        use PieceKind::*;
        let back_rank = [Ky, Ke, Gi, Ki, Ou, Ki, Gi, Ke, Ky];
        let mut grid = Grid::new();
        for side in [Side::Upper, Side::Lower] {
            let (back_row, rook_bishop_row, pawn_row, rook_col, bishop_col) = match side {
                Side::Upper => (8, 7, 6, 7, 1),
                Side::Lower => (0, 1, 2, 1, 7),
            };
            for (col, &kind) in back_rank.iter().enumerate() {
                grid[Coord::from_zero_based(back_row, col as u8)] = Some(PieceCode::new(kind, side));
            }
            for col in Col::all() {
                grid[Coord::new(Row::from_zero_based(pawn_row), col)] =
                    Some(PieceCode::new(Fu, side));
            }
            grid[Coord::from_zero_based(rook_bishop_row, rook_col)] = Some(PieceCode::new(Hi, side));
            grid[Coord::from_zero_based(rook_bishop_row, bishop_col)] =
                Some(PieceCode::new(Ka, side));
        }
        grid
    }

    pub fn is_empty_at(&self, pos: Coord) -> bool { self[pos].is_none() }

    pub fn column(&self, col: Col) -> impl Iterator<Item = Option<PieceCode>> + '_ {
        Row::all().map(move |row| self[Coord::new(row, col)])
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceCode)> + '_ {
        Coord::all().filter_map(|coord| self[coord].map(|piece| (coord, piece)))
    }

    fn to_wire_rows(&self) -> Vec<Vec<String>> {
        Row::all()
            .map(|row| {
                Col::all()
                    .map(|col| match self[Coord::new(row, col)] {
                        Some(piece) => piece.to_code(),
                        None => EMPTY.to_owned(),
                    })
                    .collect()
            })
            .collect()
    }

    fn from_wire_rows(rows: Vec<Vec<String>>) -> Result<Self, String> {
        if rows.len() != NUM_ROWS as usize {
            return Err(format!("board must have {} rows, got {}", NUM_ROWS, rows.len()));
        }
        let mut grid = Grid::new();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != NUM_COLS as usize {
                return Err(format!(
                    "board row {} must have {} cells, got {}",
                    row_idx,
                    NUM_COLS,
                    row.len()
                ));
            }
            for (col_idx, cell) in row.into_iter().enumerate() {
                if cell == EMPTY {
                    continue;
                }
                let piece = PieceCode::parse(&cell).map_err(|err| err.to_string())?;
                grid[Coord::from_zero_based(row_idx as u8, col_idx as u8)] = Some(piece);
            }
        }
        Ok(grid)
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceCode>;
    fn index(&self, pos: Coord) -> &Self::Output { &self.data[coord_to_index(pos)] }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output { &mut self.data[coord_to_index(pos)] }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [pos.row.to_zero_based() as usize, pos.col.to_zero_based() as usize]
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        Grid::from_wire_rows(rows).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(coord, piece)| (coord, piece.to_code())))
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.to_wire_rows().into_iter().map(|row| {
            row.into_iter().map(|cell| if cell == EMPTY { ".".to_owned() } else { cell }).join(" ")
        });
        write!(f, "{}", rows.format("\n"))
    }
}
