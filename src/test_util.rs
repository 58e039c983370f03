// Test utilities shared by unit tests, integration tests and frontends' tests.

use std::sync::mpsc;

use itertools::Itertools;

use crate::coord::Coord;
use crate::event::{HttpReply, OutgoingRequest, RemoteResponse, RequestId};
use crate::grid::Grid;
use crate::piece::PieceCode;


// Parses a board written as 9 lines of 9 whitespace-separated cells, `.` for empty:
//   . . . . ou . . . .
//   . . . . . . . . .
//   ...
pub fn grid_from_diagram(diagram: &str) -> Grid {
    let rows = diagram.lines().map(str::trim).filter(|line| !line.is_empty()).collect_vec();
    assert_eq!(rows.len(), 9, "{diagram}");
    let mut grid = Grid::new();
    for (row, line) in rows.into_iter().enumerate() {
        let cells = line.split_whitespace().collect_vec();
        assert_eq!(cells.len(), 9, "{line}");
        for (col, cell) in cells.into_iter().enumerate() {
            if cell != "." {
                grid[Coord::from_zero_based(row as u8, col as u8)] =
                    Some(PieceCode::parse(cell).unwrap());
            }
        }
    }
    grid
}

pub fn drain_requests(rx: &mpsc::Receiver<OutgoingRequest>) -> Vec<OutgoingRequest> {
    rx.try_iter().collect()
}

pub fn ok_response(id: RequestId, body: serde_json::Value) -> RemoteResponse {
    RemoteResponse {
        id,
        outcome: Ok(HttpReply { ok: true, status: 200, body }),
    }
}

pub fn rejected_response(id: RequestId, status: u16, body: serde_json::Value) -> RemoteResponse {
    RemoteResponse {
        id,
        outcome: Ok(HttpReply { ok: false, status, body }),
    }
}

pub fn transport_failure(id: RequestId) -> RemoteResponse {
    RemoteResponse { id, outcome: Err("connection refused".to_owned()) }
}
