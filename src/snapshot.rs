use std::ops;

use enum_map::{EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::hand::Hands;
use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[default]
    Ongoing,
    Ended,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct GameStatus {
    pub state: GameState,
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl GameStatus {
    pub fn is_ended(&self) -> bool { self.state == GameState::Ended }
}

// Per-side booleans, e.g. "is in check". Sent as `{"upper": bool, "lower": bool}`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "SideFlagsWire", into = "SideFlagsWire")]
pub struct SideFlags(EnumMap<Side, bool>);

#[derive(Clone, Copy, Default, Serialize, Deserialize)]
struct SideFlagsWire {
    #[serde(default)]
    upper: bool,
    #[serde(default)]
    lower: bool,
}

impl SideFlags {
    pub fn none() -> Self { SideFlags(enum_map! { _ => false }) }
    pub fn iter(&self) -> impl Iterator<Item = (Side, bool)> + '_ {
        self.0.iter().map(|(side, &flag)| (side, flag))
    }
}

impl Default for SideFlags {
    fn default() -> Self { Self::none() }
}

impl ops::Index<Side> for SideFlags {
    type Output = bool;
    fn index(&self, side: Side) -> &bool { &self.0[side] }
}

impl ops::IndexMut<Side> for SideFlags {
    fn index_mut(&mut self, side: Side) -> &mut bool { &mut self.0[side] }
}

impl From<SideFlagsWire> for SideFlags {
    fn from(wire: SideFlagsWire) -> Self {
        SideFlags(enum_map! { Side::Upper => wire.upper, Side::Lower => wire.lower })
    }
}

impl From<SideFlags> for SideFlagsWire {
    fn from(flags: SideFlags) -> Self {
        SideFlagsWire { upper: flags[Side::Upper], lower: flags[Side::Lower] }
    }
}


// The most recent authoritative state received from the server.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameSnapshot {
    pub board: Grid,
    pub side_to_move: Side,
    pub hands: Hands,
    pub check_status: SideFlags,
    pub checkmate_status: SideFlags,
    pub game_status: GameStatus,
}

impl GameSnapshot {
    // What the client shows until the first server reply arrives.
    pub fn initial() -> Self {
        GameSnapshot {
            board: Grid::starting_position(),
            side_to_move: Side::Upper,
            hands: Hands::new(),
            check_status: SideFlags::none(),
            checkmate_status: SideFlags::none(),
            game_status: GameStatus::default(),
        }
    }
}

// Server replies may omit any field. Absent fields keep their local value.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Grid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_to_move: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hands: Option<Hands>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_status: Option<SideFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkmate_status: Option<SideFlags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_status: Option<GameStatus>,
}

impl SnapshotPatch {
    pub fn is_empty(&self) -> bool { *self == SnapshotPatch::default() }

    pub fn apply(self, snapshot: &mut GameSnapshot) {
        let SnapshotPatch {
            board,
            side_to_move,
            hands,
            check_status,
            checkmate_status,
            game_status,
        } = self;
        if let Some(board) = board {
            snapshot.board = board;
        }
        if let Some(side_to_move) = side_to_move {
            snapshot.side_to_move = side_to_move;
        }
        if let Some(hands) = hands {
            snapshot.hands = hands;
        }
        if let Some(check_status) = check_status {
            snapshot.check_status = check_status;
        }
        if let Some(checkmate_status) = checkmate_status {
            snapshot.checkmate_status = checkmate_status;
        }
        if let Some(game_status) = game_status {
            snapshot.game_status = game_status;
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_fields_are_kept() {
        let mut snapshot = GameSnapshot::initial();
        let patch: SnapshotPatch =
            serde_json::from_str(r#"{"side_to_move": "lower", "check_status": {"upper": true}}"#)
                .unwrap();
        patch.apply(&mut snapshot);
        assert_eq!(snapshot.side_to_move, Side::Lower);
        assert!(snapshot.check_status[Side::Upper]);
        assert!(!snapshot.check_status[Side::Lower]);
        assert_eq!(snapshot.board, Grid::starting_position());
        assert_eq!(snapshot.game_status, GameStatus::default());
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut snapshot = GameSnapshot::initial();
        let patch: SnapshotPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        patch.apply(&mut snapshot);
        assert_eq!(snapshot, GameSnapshot::initial());
    }

    #[test]
    fn game_status_wire_format() {
        let status: GameStatus =
            serde_json::from_str(r#"{"state": "ended", "winner": "lower", "reason": "checkmate"}"#)
                .unwrap();
        assert!(status.is_ended());
        assert_eq!(status.winner, Some(Side::Lower));
        let status: GameStatus =
            serde_json::from_str(r#"{"state": "ongoing", "winner": null, "reason": null}"#).unwrap();
        assert_eq!(status, GameStatus::default());
    }
}
