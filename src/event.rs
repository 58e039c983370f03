// Wire protocol between the client and the game service. The service exposes four JSON endpoints;
// the client never talks to it directly: `ClientState` emits `OutgoingRequest`s and a frontend
// performs the HTTP call and feeds the reply back as a `RemoteResponse`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::grid::Grid;
use crate::piece::PieceCode;
use crate::snapshot::{GameStatus, SnapshotPatch};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Move,
    Capture,
    Drop,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "LegalMoveWire", into = "LegalMoveWire")]
pub struct LegalMove {
    pub to: Coord,
    pub move_type: MoveType,
    pub promote: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct LegalMoveWire {
    row: i64,
    col: i64,
    #[serde(rename = "type")]
    move_type: MoveType,
    #[serde(default)]
    promote: bool,
}

impl TryFrom<LegalMoveWire> for LegalMove {
    type Error = String;
    fn try_from(wire: LegalMoveWire) -> Result<Self, Self::Error> {
        let to = Coord::try_from_zero_based(wire.row, wire.col)
            .ok_or_else(|| format!("legal move to ({}, {}) is out of board", wire.row, wire.col))?;
        Ok(LegalMove {
            to,
            move_type: wire.move_type,
            promote: wire.promote,
        })
    }
}

impl From<LegalMove> for LegalMoveWire {
    fn from(m: LegalMove) -> Self {
        LegalMoveWire {
            row: m.to.row.to_zero_based().into(),
            col: m.to.col.to_zero_based().into(),
            move_type: m.move_type,
            promote: m.promote,
        }
    }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct LegalMovesRequest {
    pub board: Grid,
    pub row: u8,
    pub col: u8,
    pub piece: PieceCode,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct MoveRequest {
    pub board: Grid,
    #[serde(flatten)]
    pub action: MoveAction,
}

// `move_type` doubles as a discriminator: "move"/"capture" relocate a board piece, "drop" places
// a piece from hand.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(untagged)]
pub enum MoveAction {
    Relocate {
        from_pos: Coord,
        to_pos: Coord,
        move_type: MoveType,
        piece: PieceCode,
        promote: bool,
    },
    Drop {
        move_type: MoveType,
        drop_piece: PieceCode,
        to_pos: Coord,
    },
}

impl MoveRequest {
    pub fn relocate(board: Grid, from: Coord, piece: PieceCode, chosen: LegalMove) -> Self {
        MoveRequest {
            board,
            action: MoveAction::Relocate {
                from_pos: from,
                to_pos: chosen.to,
                move_type: chosen.move_type,
                piece,
                promote: chosen.promote,
            },
        }
    }

    pub fn drop(board: Grid, drop_piece: PieceCode, to: Coord) -> Self {
        MoveRequest {
            board,
            action: MoveAction::Drop {
                move_type: MoveType::Drop,
                drop_piece,
                to_pos: to,
            },
        }
    }

    pub fn is_drop(&self) -> bool { matches!(self.action, MoveAction::Drop { .. }) }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RemoteRequest {
    FetchState,
    FetchLegalMoves(LegalMovesRequest),
    SubmitMove(MoveRequest),
    Reset,
}

impl RemoteRequest {
    pub fn method(&self) -> HttpMethod {
        match self {
            RemoteRequest::FetchState => HttpMethod::Get,
            RemoteRequest::FetchLegalMoves(_)
            | RemoteRequest::SubmitMove(_)
            | RemoteRequest::Reset => HttpMethod::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            RemoteRequest::FetchState => "/api/state",
            RemoteRequest::FetchLegalMoves(_) => "/api/legal_moves",
            RemoteRequest::SubmitMove(_) => "/api/move",
            RemoteRequest::Reset => "/api/reset",
        }
    }

    // JSON body, if the endpoint takes one.
    pub fn body(&self) -> Option<String> {
        let body = match self {
            RemoteRequest::FetchState | RemoteRequest::Reset => return None,
            RemoteRequest::FetchLegalMoves(req) => serde_json::to_string(req),
            RemoteRequest::SubmitMove(req) => serde_json::to_string(req),
        };
        // Serializing these types cannot fail: all map keys are strings.
        Some(body.unwrap_or_else(|err| panic!("{}", crate::internal_error_message!("{}", err))))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OutgoingRequest {
    pub id: RequestId,
    pub request: RemoteRequest,
}

// What the transport observed. An unparsable body should be passed as an empty JSON object.
#[derive(Clone, PartialEq, Debug)]
pub struct HttpReply {
    pub ok: bool,
    pub status: u16,
    pub body: serde_json::Value,
}

impl HttpReply {
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
        HttpReply { ok: (200..300).contains(&status), status, body }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct RemoteResponse {
    pub id: RequestId,
    pub outcome: Result<HttpReply, String>,
}


#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub patch: SnapshotPatch,
    #[serde(default)]
    pub captured_piece: Option<PieceCode>,
    #[serde(default)]
    pub promoted: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct LegalMovesResponse {
    #[serde(default)]
    pub legal_moves: Vec<LegalMove>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub game_status: Option<GameStatus>,
}
