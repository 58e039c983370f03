mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{TestClient, board_json, coord, empty_board_json};
use shogi_client::test_util::{rejected_response, transport_failure};
use shogi_client::*;


const BOARD: &str = "
    .  .  .  .  ou .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  FU .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  .  .  .  .  .
    .  .  .  .  OU .  .  .  .
";

fn ongoing_client() -> TestClient {
    TestClient::with_state(json!({
        "board": board_json(BOARD),
        "side_to_move": "upper",
        "hands": { "upper": ["FU", "GI", "FU"], "lower": ["fu"] },
        "check_status": { "upper": false, "lower": false },
        "checkmate_status": { "upper": false, "lower": false },
        "game_status": { "state": "ongoing" },
    }))
}

fn promotion_moves() -> serde_json::Value {
    json!([
        { "row": 2, "col": 4, "type": "move", "promote": true },
        { "row": 2, "col": 4, "type": "move", "promote": false },
    ])
}

fn piece(code: &str) -> PieceCode { PieceCode::parse(code).unwrap() }

#[track_caller]
fn submitted_move(request: OutgoingRequest) -> serde_json::Value {
    match request.request {
        RemoteRequest::SubmitMove(move_request) => serde_json::to_value(move_request).unwrap(),
        other => panic!("expected a move, got {:?}", other),
    }
}

#[test]
fn initial_load_applies_state() {
    let client = ongoing_client();
    assert_eq!(client.state.snapshot().board[coord(3, 4)], Some(piece("FU")));
    assert_eq!(client.state.snapshot().hands[Side::Upper].counts(), vec![
        (piece("FU"), 2),
        (piece("GI"), 1)
    ]);
    assert_eq!(client.state.num_requests_in_flight(), 0);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn click_opponent_piece_does_nothing() {
    let mut client = ongoing_client();
    client.state.click_cell(coord(0, 4));
    client.state.click_cell(coord(5, 5));
    assert_eq!(client.requests(), vec![]);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn select_piece_highlights_destinations() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    assert_eq!(client.state.cell_highlight(coord(2, 4)), CellHighlight {
        legal_destination: true,
        drop_target: false,
        selected: false,
    });
    assert!(client.state.cell_highlight(coord(3, 4)).selected);
    assert_eq!(client.state.cell_highlight(coord(4, 4)), CellHighlight::default());
}

#[test]
fn click_non_candidate_clears_selection() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    client.state.click_cell(coord(7, 7));
    assert_eq!(client.requests(), vec![]);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn single_candidate_submits_immediately() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    client.state.click_cell(coord(2, 4));
    assert!(client.state.pending_promotion().is_none());
    let body = submitted_move(client.single_request());
    assert_eq!(body["from_pos"], json!([3, 4]));
    assert_eq!(body["to_pos"], json!([2, 4]));
    assert_eq!(body["move_type"], json!("move"));
    assert_eq!(body["piece"], json!("FU"));
    assert_eq!(body["promote"], json!(false));
}

#[test]
fn promotion_yes() {
    let mut client = ongoing_client();
    client.select_with_moves(coord(3, 4), promotion_moves());
    client.state.click_cell(coord(2, 4));
    assert_eq!(client.requests(), vec![]);
    let pending = client.state.pending_promotion().unwrap();
    assert_eq!(pending.to, coord(2, 4));
    assert_eq!(pending.candidates.len(), 2);

    client.state.choose_promotion(true);
    assert_eq!(submitted_move(client.single_request())["promote"], json!(true));
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn promotion_no() {
    let mut client = ongoing_client();
    client.select_with_moves(coord(3, 4), promotion_moves());
    client.state.click_cell(coord(2, 4));
    client.state.choose_promotion(false);
    assert_eq!(submitted_move(client.single_request())["promote"], json!(false));
}

#[test]
fn promotion_falls_back_to_first_candidate() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([
            { "row": 2, "col": 4, "type": "move", "promote": true },
            { "row": 2, "col": 4, "type": "capture", "promote": true },
        ]),
    );
    client.state.click_cell(coord(2, 4));
    client.state.choose_promotion(false);
    let body = submitted_move(client.single_request());
    assert_eq!(body["promote"], json!(true));
    assert_eq!(body["move_type"], json!("move"));
}

#[test]
fn board_clicks_ignored_while_promotion_pending() {
    let mut client = ongoing_client();
    client.select_with_moves(coord(3, 4), promotion_moves());
    client.state.click_cell(coord(2, 4));
    client.state.click_cell(coord(8, 4));
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    assert_eq!(client.requests(), vec![]);
    assert!(client.state.pending_promotion().is_some());
}

#[test]
fn successful_move_replaces_state() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    client.state.click_cell(coord(2, 4));
    let id = client.single_request().id;
    client.respond(
        id,
        json!({
            "board": empty_board_json(),
            "side_to_move": "lower",
            "check_status": { "lower": true },
            "promoted": false,
        }),
    );
    let snapshot = client.state.snapshot();
    assert_eq!(snapshot.side_to_move, Side::Lower);
    assert_eq!(snapshot.board, Grid::new());
    assert!(snapshot.check_status[Side::Lower]);
    // Absent fields keep their previous value.
    assert_eq!(snapshot.hands[Side::Lower].len(), 1);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert_eq!(client.state.error_message(), None);
}

#[test]
fn hand_chip_toggle_issues_no_request() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    assert_eq!(client.state.selected_hand_piece(), Some(piece("GI")));
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert_eq!(client.requests(), vec![]);
}

#[test]
fn switching_hand_chip_recomputes_targets() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    assert!(client.state.cell_highlight(coord(0, 0)).drop_target);
    assert!(client.state.cell_highlight(coord(5, 4)).drop_target);
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    assert_eq!(client.state.selected_hand_piece(), Some(piece("FU")));
    assert!(!client.state.cell_highlight(coord(0, 0)).drop_target);
    // Column 4 already holds an upper pawn.
    assert!(!client.state.cell_highlight(coord(5, 4)).drop_target);
    assert!(client.state.cell_highlight(coord(5, 3)).drop_target);
}

#[test]
fn opponent_hand_is_disabled() {
    let mut client = ongoing_client();
    assert!(!client.state.hand_enabled(Side::Lower));
    client.state.click_hand_piece(Side::Lower, piece("fu"));
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn drop_on_target_submits() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    client.state.click_cell(coord(4, 4));
    let body = submitted_move(client.single_request());
    assert_eq!(body["move_type"], json!("drop"));
    assert_eq!(body["drop_piece"], json!("GI"));
    assert_eq!(body["to_pos"], json!([4, 4]));
    assert_eq!(body.get("from_pos"), None);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn drop_outside_targets_clears_selection() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    client.state.click_cell(coord(0, 0));
    assert_eq!(client.requests(), vec![]);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn click_outside_board_clears_hand_selection() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    client.state.click_outside_board();
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn piece_missing_from_hand_cannot_be_selected() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("KI"));
    assert_eq!(client.state.selected_hand_piece(), None);
    client.state.click_cell(coord(4, 4));
    // The click selects nothing either: the square is empty.
    assert_eq!(client.requests(), vec![]);
    assert_eq!(client.state.interaction(), &Interaction::Idle);
}

#[test]
fn drop_on_target_occupied_since_selection_is_ignored() {
    let mut client = ongoing_client();
    client.state.load();
    let load_id = client.single_request().id;
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    client.respond(
        load_id,
        json!({
            "board": board_json("
                .  .  .  .  ou .  .  .  .
                .  .  .  .  .  .  .  .  .
                .  .  .  .  .  .  .  .  .
                .  .  .  .  FU .  .  .  .
                .  .  .  .  ki .  .  .  .
                .  .  .  .  .  .  .  .  .
                .  .  .  .  .  .  .  .  .
                .  .  .  .  .  .  .  .  .
                .  .  .  .  OU .  .  .  .
            "),
        }),
    );
    client.state.click_cell(coord(4, 4));
    assert_eq!(client.requests(), vec![]);
    assert_eq!(client.state.selected_hand_piece(), Some(piece("GI")));
}

#[test]
fn rejected_drop_shows_server_error() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    client.state.click_cell(coord(1, 3));
    let id = client.single_request().id;
    let board_before = client.state.snapshot().board.clone();
    client
        .state
        .process_response(rejected_response(id, 400, json!({ "error": "打ち歩詰めです" })))
        .unwrap();
    assert_eq!(client.state.error_message(), Some("打ち歩詰めです"));
    assert_eq!(client.state.snapshot().board, board_before);
    assert!(!client.state.is_game_over());
}

#[test]
fn rejection_with_ended_game_status() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    client.state.click_cell(coord(2, 4));
    let id = client.single_request().id;
    let before = client.state.snapshot().clone();
    client
        .state
        .process_response(rejected_response(
            id,
            400,
            json!({
                "error": "千日手",
                "game_status": { "state": "ended", "winner": "lower", "reason": "repetition" },
            }),
        ))
        .unwrap();

    assert_eq!(client.state.error_message(), Some("千日手"));
    assert!(client.state.is_game_over());
    assert_eq!(client.state.interaction(), &Interaction::GameEnded);
    let snapshot = client.state.snapshot();
    assert_eq!(snapshot.game_status.winner, Some(Side::Lower));
    assert_eq!(snapshot.board, before.board);
    assert_eq!(snapshot.hands, before.hands);
    assert_eq!(snapshot.side_to_move, before.side_to_move);

    // Further clicks are disabled.
    client.state.click_cell(coord(2, 4));
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    assert_eq!(client.requests(), vec![]);
    assert!(!client.state.hand_enabled(Side::Upper));
}

#[test]
fn move_transport_failure_uses_fallback_text() {
    let mut client = ongoing_client();
    client.select_with_moves(
        coord(3, 4),
        json!([{ "row": 2, "col": 4, "type": "move", "promote": false }]),
    );
    client.state.click_cell(coord(2, 4));
    let id = client.single_request().id;
    client.state.process_response(transport_failure(id)).unwrap();
    assert_eq!(client.state.error_message(), Some(display::MOVE_FAILED));
}

#[test]
fn drop_rejection_without_message_uses_drop_fallback() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("GI"));
    client.state.click_cell(coord(4, 4));
    let id = client.single_request().id;
    client.state.process_response(rejected_response(id, 500, json!({}))).unwrap();
    assert_eq!(client.state.error_message(), Some(display::DROP_FAILED));
}

#[test]
fn legal_moves_failure_rolls_back_selection() {
    let mut client = ongoing_client();
    client.state.click_cell(coord(3, 4));
    let id = client.single_request().id;
    client.state.process_response(transport_failure(id)).unwrap();
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert_eq!(client.state.error_message(), Some(display::LEGAL_MOVES_FAILED));
}

#[test]
fn stale_legal_moves_are_dropped() {
    let mut client = ongoing_client();
    client.state.click_cell(coord(3, 4));
    let id = client.single_request().id;
    client.state.click_cell(coord(7, 7)); // no candidates yet: clears selection
    client.state.click_cell(coord(8, 4));
    let second = client.single_request().id;
    client.respond(id, json!({ "legal_moves": [{ "row": 2, "col": 4, "type": "move" }] }));
    assert!(!client.state.cell_highlight(coord(2, 4)).legal_destination);
    client.respond(second, json!({ "legal_moves": [{ "row": 7, "col": 4, "type": "move" }] }));
    assert!(client.state.cell_highlight(coord(7, 4)).legal_destination);
}

#[test]
fn unknown_response_is_reported() {
    let mut client = ongoing_client();
    let id = RequestId(42);
    assert_eq!(
        client.state.process_response(transport_failure(id)),
        Err(EventError::UnknownRequest(id))
    );
}

#[test]
fn reset_clears_everything() {
    let mut client = ongoing_client();
    client.select_with_moves(coord(3, 4), promotion_moves());
    client.state.click_cell(coord(2, 4));
    client.state.choose_promotion(true);
    let id = client.single_request().id;
    client
        .state
        .process_response(rejected_response(
            id,
            400,
            json!({ "error": "no", "game_status": { "state": "ended", "winner": "upper" } }),
        ))
        .unwrap();
    assert!(client.state.is_game_over());

    client.state.reset();
    let request = client.single_request();
    assert_eq!(request.request, RemoteRequest::Reset);
    assert_eq!(client.state.error_message(), None);
    client.respond(
        request.id,
        json!({
            "board": serde_json::to_value(Grid::starting_position()).unwrap(),
            "side_to_move": "upper",
            "hands": { "upper": [], "lower": [] },
            "check_status": { "upper": false, "lower": false },
            "checkmate_status": { "upper": false, "lower": false },
            "game_status": { "state": "ongoing" },
        }),
    );
    assert_eq!(client.state.snapshot(), &GameSnapshot::initial());
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert_eq!(client.state.error_message(), None);
    assert!(client.state.hand_enabled(Side::Upper));
}

#[test]
fn reset_clears_hand_selection() {
    let mut client = ongoing_client();
    client.state.click_hand_piece(Side::Upper, piece("FU"));
    client.state.reset();
    let id = client.single_request().id;
    client.respond(id, json!({}));
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert_eq!(client.state.selected_hand_piece(), None);
    assert_eq!(client.state.snapshot().hands[Side::Upper].len(), 3);
}

#[test]
fn reset_clears_pending_promotion_and_error() {
    let mut client = ongoing_client();
    client.state.click_cell(coord(3, 4));
    let id = client.single_request().id;
    client.state.process_response(transport_failure(id)).unwrap();
    client.select_with_moves(coord(3, 4), promotion_moves());
    client.state.click_cell(coord(2, 4));
    assert!(client.state.pending_promotion().is_some());
    assert_eq!(client.state.error_message(), Some(display::LEGAL_MOVES_FAILED));

    client.state.reset();
    assert_eq!(client.state.error_message(), None);
    let id = client.single_request().id;
    client.respond(id, json!({ "board": empty_board_json() }));
    assert_eq!(client.state.interaction(), &Interaction::Idle);
    assert!(client.state.pending_promotion().is_none());
    assert_eq!(client.state.snapshot().board[coord(3, 4)], None);
}

#[test]
fn reset_failure_keeps_state() {
    let mut client = ongoing_client();
    client.state.reset();
    let id = client.single_request().id;
    client.state.process_response(transport_failure(id)).unwrap();
    assert_eq!(client.state.error_message(), Some(display::RESET_FAILED));
    assert_eq!(client.state.snapshot().board[coord(3, 4)], Some(piece("FU")));
}

#[test]
fn status_lines_follow_state() {
    let mut client = ongoing_client();
    let lines = display::status_lines(&client.state);
    assert_eq!(lines[0].kind, display::StatusKind::Turn);

    client.state.reset();
    let id = client.single_request().id;
    client.respond(
        id,
        json!({
            "checkmate_status": { "upper": true },
            "game_status": { "state": "ended", "winner": "lower", "reason": "checkmate" },
        }),
    );
    let kinds = display::status_lines(&client.state).into_iter().map(|l| l.kind).collect::<Vec<_>>();
    assert!(kinds.contains(&display::StatusKind::GameOver));
    assert!(kinds.contains(&display::StatusKind::Checkmate));
}
