use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::side::Side;


pub const NUM_ROWS: u8 = 9;
pub const NUM_COLS: u8 = 9;


// Row counted from a side's point of view: 0 is the side's farthest rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SubjectiveRow {
    idx: u8, // 0-based
}

impl SubjectiveRow {
    pub fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn to_zero_based(self) -> u8 { self.idx }
    pub fn from_row(row: Row, side: Side) -> Self {
        match side {
            Side::Upper => Self::from_zero_based(row.idx),
            Side::Lower => Self::from_zero_based(NUM_ROWS - row.idx - 1),
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i64) -> Option<Self> {
        (0..NUM_ROWS as i64).contains(&idx).then(|| Self { idx: idx as u8 })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_ROWS).map(Self::from_zero_based) }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i64) -> Option<Self> {
        (0..NUM_COLS as i64).contains(&idx).then(|| Self { idx: idx as u8 })
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub fn all() -> impl Iterator<Item = Self> + Clone { (0..NUM_COLS).map(Self::from_zero_based) }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    // Panics if out of bounds. Intended for constants and tests.
    pub const fn from_zero_based(row: u8, col: u8) -> Self {
        Self::new(Row::from_zero_based(row), Col::from_zero_based(col))
    }

    pub fn try_from_zero_based(row: i64, col: i64) -> Option<Self> {
        Some(Self::new(Row::try_from_zero_based(row)?, Col::try_from_zero_based(col)?))
    }

    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }

    pub fn to_pair(self) -> [u8; 2] { [self.row.to_zero_based(), self.col.to_zero_based()] }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({},{})", self.row.to_zero_based(), self.col.to_zero_based())
    }
}

// On the wire coordinates are `[row, col]` pairs.
impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_pair().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [row, col] = <[i64; 2]>::deserialize(deserializer)?;
        Coord::try_from_zero_based(row, col).ok_or_else(|| {
            serde::de::Error::custom(format!("coord ({row}, {col}) is out of board"))
        })
    }
}
