use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::{NUM_ROWS, Row};


// Upper pieces are written in uppercase and start at the bottom of the board (rows 6-8).
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    // The rank closest to the opponent's camp, where some pieces would have no legal moves.
    pub fn farthest_row(self) -> Row {
        match self {
            Side::Upper => Row::from_zero_based(0),
            Side::Lower => Row::from_zero_based(NUM_ROWS - 1),
        }
    }

    pub fn to_wire(self) -> &'static str {
        match self {
            Side::Upper => "upper",
            Side::Lower => "lower",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.to_wire()) }
}
