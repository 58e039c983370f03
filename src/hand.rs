use std::ops;

use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::piece::PieceCode;
use crate::side::Side;


// Captured pieces available for dropping. Order follows the server; duplicates are meaningful.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<PieceCode>);

impl Hand {
    pub fn new(pieces: Vec<PieceCode>) -> Self { Hand(pieces) }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn contains(&self, piece: PieceCode) -> bool { self.0.contains(&piece) }
    pub fn iter(&self) -> impl Iterator<Item = PieceCode> + '_ { self.0.iter().copied() }

    // Groups identical codes. Groups are listed in order of first appearance so that chips do
    // not jump around when a new piece is captured.
    pub fn counts(&self) -> Vec<(PieceCode, usize)> {
        let mut counts: Vec<(PieceCode, usize)> = Vec::new();
        for piece in self.iter() {
            match counts.iter_mut().find(|(p, _)| *p == piece) {
                Some((_, count)) => *count += 1,
                None => counts.push((piece, 1)),
            }
        }
        counts
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "HandsWire", into = "HandsWire")]
pub struct Hands(EnumMap<Side, Hand>);

#[derive(Clone, Default, Serialize, Deserialize)]
struct HandsWire {
    #[serde(default)]
    upper: Hand,
    #[serde(default)]
    lower: Hand,
}

impl Hands {
    pub fn new() -> Self { Hands(enum_map! { _ => Hand::default() }) }
}

impl ops::Index<Side> for Hands {
    type Output = Hand;
    fn index(&self, side: Side) -> &Hand { &self.0[side] }
}

impl ops::IndexMut<Side> for Hands {
    fn index_mut(&mut self, side: Side) -> &mut Hand { &mut self.0[side] }
}

impl From<HandsWire> for Hands {
    fn from(wire: HandsWire) -> Self {
        Hands(enum_map! {
            Side::Upper => wire.upper.clone(),
            Side::Lower => wire.lower.clone(),
        })
    }
}

impl From<Hands> for HandsWire {
    fn from(hands: Hands) -> Self {
        let [upper, lower] = hands.0.into_array();
        HandsWire { upper, lower }
    }
}
