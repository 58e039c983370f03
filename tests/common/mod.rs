// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use serde_json::json;

use shogi_client::test_util::{drain_requests, ok_response};
use shogi_client::{ClientState, Coord, OutgoingRequest, RemoteRequest, RequestId};


#[allow(dead_code)]
pub struct TestClient {
    pub state: ClientState,
    pub rx: mpsc::Receiver<OutgoingRequest>,
}

impl TestClient {
    // A client that has already received the given server state.
    #[allow(dead_code)]
    pub fn with_state(state_json: serde_json::Value) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut client = TestClient { state: ClientState::new(tx), rx };
        client.state.load();
        let id = client.single_request().id;
        client.state.process_response(ok_response(id, state_json)).unwrap();
        client
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<OutgoingRequest> { drain_requests(&self.rx) }

    #[allow(dead_code)]
    #[track_caller]
    pub fn single_request(&self) -> OutgoingRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "{requests:?}");
        requests.pop().unwrap()
    }

    // Clicks a piece and answers the legal moves query.
    #[allow(dead_code)]
    pub fn select_with_moves(&mut self, from: Coord, legal_moves: serde_json::Value) {
        self.state.click_cell(from);
        let request = self.single_request();
        assert!(matches!(request.request, RemoteRequest::FetchLegalMoves(_)));
        self.respond(request.id, json!({ "legal_moves": legal_moves }));
    }

    #[allow(dead_code)]
    pub fn respond(&mut self, id: RequestId, body: serde_json::Value) {
        self.state.process_response(ok_response(id, body)).unwrap();
    }
}

#[allow(dead_code)]
pub fn coord(row: u8, col: u8) -> Coord { Coord::from_zero_based(row, col) }

#[allow(dead_code)]
pub fn empty_board_json() -> serde_json::Value { json!(vec![vec!["EMPTY"; 9]; 9]) }

// Renders a board diagram (see `grid_from_diagram`) into the wire format.
#[allow(dead_code)]
pub fn board_json(diagram: &str) -> serde_json::Value {
    serde_json::to_value(shogi_client::test_util::grid_from_diagram(diagram)).unwrap()
}
