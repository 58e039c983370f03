use std::collections::{BTreeSet, HashMap};
use std::sync::mpsc;

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;

use crate::coord::Coord;
use crate::display;
use crate::drop_advisor::drop_targets;
use crate::event::{
    ErrorResponse, HttpReply, LegalMove, LegalMovesRequest, LegalMovesResponse, MoveRequest,
    OutgoingRequest, RemoteRequest, RemoteResponse, RequestId, StateResponse,
};
use crate::piece::PieceCode;
use crate::side::Side;
use crate::snapshot::{GameSnapshot, GameStatus};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardSelection {
    pub from: Coord,
    pub piece: PieceCode,
    // Empty until the server answers the legal moves query.
    pub legal_moves: Vec<LegalMove>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HandSelection {
    pub piece: PieceCode,
    pub drop_targets: BTreeSet<Coord>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PendingPromotion {
    pub selection: BoardSelection,
    pub to: Coord,
    // Moves to `to` that differ only by the promotion flag, in server order.
    pub candidates: Vec<LegalMove>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Interaction {
    Idle,
    BoardSelected(BoardSelection),
    HandSelected(HandSelection),
    PromotionPending(PendingPromotion),
    GameEnded,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CellHighlight {
    pub legal_destination: bool,
    pub drop_target: bool,
    pub selected: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    UnknownRequest(RequestId),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RequestContext {
    FetchState,
    LegalMoves { from: Coord },
    Move { is_drop: bool },
    Reset,
}

// Why a remote call did not produce the expected payload.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
struct CallFailure {
    message: Option<String>,
    game_status: Option<GameStatus>,
}

pub struct ClientState {
    requests_tx: mpsc::Sender<OutgoingRequest>,
    next_request_id: u64,
    in_flight: HashMap<RequestId, RequestContext>,
    snapshot: GameSnapshot,
    interaction: Interaction,
    error_message: Option<String>,
}

impl ClientState {
    pub fn new(requests_tx: mpsc::Sender<OutgoingRequest>) -> Self {
        ClientState {
            requests_tx,
            next_request_id: 1,
            in_flight: HashMap::new(),
            snapshot: GameSnapshot::initial(),
            interaction: Interaction::Idle,
            error_message: None,
        }
    }

    pub fn snapshot(&self) -> &GameSnapshot { &self.snapshot }
    pub fn interaction(&self) -> &Interaction { &self.interaction }
    pub fn error_message(&self) -> Option<&str> { self.error_message.as_deref() }
    pub fn is_game_over(&self) -> bool { self.snapshot.game_status.is_ended() }
    pub fn num_requests_in_flight(&self) -> usize { self.in_flight.len() }

    pub fn selected_hand_piece(&self) -> Option<PieceCode> {
        match &self.interaction {
            Interaction::HandSelected(selection) => Some(selection.piece),
            _ => None,
        }
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        match &self.interaction {
            Interaction::PromotionPending(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn cell_highlight(&self, coord: Coord) -> CellHighlight {
        let board_selection = match &self.interaction {
            Interaction::BoardSelected(selection) => Some(selection),
            Interaction::PromotionPending(pending) => Some(&pending.selection),
            _ => None,
        };
        CellHighlight {
            legal_destination: board_selection
                .is_some_and(|s| s.legal_moves.iter().any(|m| m.to == coord)),
            drop_target: matches!(
                &self.interaction,
                Interaction::HandSelected(s) if s.drop_targets.contains(&coord)
            ),
            selected: board_selection.is_some_and(|s| s.from == coord),
        }
    }

    // Chips are only usable by the side to move, and not at all after the game ends.
    pub fn hand_enabled(&self, owner: Side) -> bool {
        !self.is_game_over() && owner == self.snapshot.side_to_move
    }

    pub fn load(&mut self) { self.send(RemoteRequest::FetchState, RequestContext::FetchState); }

    pub fn reset(&mut self) {
        self.error_message = None;
        self.send(RemoteRequest::Reset, RequestContext::Reset);
    }

    pub fn click_cell(&mut self, coord: Coord) {
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            interaction @ (Interaction::GameEnded | Interaction::PromotionPending(_)) => {
                self.interaction = interaction;
            }
            Interaction::HandSelected(selection) => {
                if !selection.drop_targets.contains(&coord) {
                    return;
                }
                if !self.snapshot.board.is_empty_at(coord) {
                    self.interaction = Interaction::HandSelected(selection);
                    return;
                }
                let request = MoveRequest::drop(self.snapshot.board.clone(), selection.piece, coord);
                self.submit_move(request);
            }
            Interaction::Idle => {
                let Some(piece) = self.snapshot.board[coord] else {
                    return;
                };
                if piece.side != self.snapshot.side_to_move {
                    return;
                }
                self.interaction = Interaction::BoardSelected(BoardSelection {
                    from: coord,
                    piece,
                    legal_moves: Vec::new(),
                });
                let request = LegalMovesRequest {
                    board: self.snapshot.board.clone(),
                    row: coord.row.to_zero_based(),
                    col: coord.col.to_zero_based(),
                    piece,
                };
                self.send(
                    RemoteRequest::FetchLegalMoves(request),
                    RequestContext::LegalMoves { from: coord },
                );
            }
            Interaction::BoardSelected(selection) => {
                let candidates = selection
                    .legal_moves
                    .iter()
                    .filter(|m| m.to == coord)
                    .copied()
                    .collect::<Vec<_>>();
                match candidates.len() {
                    0 => {}
                    1 => {
                        self.submit_relocation(&selection, candidates[0]);
                    }
                    _ => {
                        self.interaction = Interaction::PromotionPending(PendingPromotion {
                            selection,
                            to: coord,
                            candidates,
                        });
                    }
                }
            }
        }
    }

    pub fn choose_promotion(&mut self, promote: bool) {
        let Interaction::PromotionPending(pending) = &self.interaction else {
            return;
        };
        // If nothing matches the requested flag, fall back to the first candidate rather than
        // refusing: the server has the final word anyway.
        let Some(chosen) = pending
            .candidates
            .iter()
            .find(|m| m.promote == promote)
            .or_else(|| pending.candidates.first())
            .copied()
        else {
            return;
        };
        let selection = pending.selection.clone();
        self.submit_relocation(&selection, chosen);
    }

    pub fn click_hand_piece(&mut self, owner: Side, piece: PieceCode) {
        if !self.hand_enabled(owner)
            || self.pending_promotion().is_some()
            || !self.snapshot.hands[owner].contains(piece)
        {
            return;
        }
        if self.selected_hand_piece() == Some(piece) {
            self.interaction = Interaction::Idle;
            return;
        }
        let side = self.snapshot.side_to_move;
        self.interaction = Interaction::HandSelected(HandSelection {
            piece,
            drop_targets: drop_targets(&self.snapshot.board, side, piece.kind),
        });
    }

    // Pointer went down somewhere that is neither the board nor a hand chip.
    pub fn click_outside_board(&mut self) {
        if let Interaction::HandSelected(_) = self.interaction {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn process_response(&mut self, response: RemoteResponse) -> Result<(), EventError> {
        let RemoteResponse { id, outcome } = response;
        let context = self.in_flight.remove(&id).ok_or(EventError::UnknownRequest(id))?;
        match context {
            RequestContext::FetchState => match parse_outcome::<StateResponse>(id, outcome) {
                Ok(state) => {
                    if state.patch.is_empty() {
                        warn!("Game state {} has no fields, keeping the local one", id);
                    }
                    state.patch.apply(&mut self.snapshot);
                }
                Err(failure) => {
                    warn!("Cannot load game state {}: {:?}", id, failure.message);
                }
            },
            RequestContext::LegalMoves { from } => {
                match parse_outcome::<LegalMovesResponse>(id, outcome) {
                    Ok(reply) => match &mut self.interaction {
                        Interaction::BoardSelected(selection) if selection.from == from => {
                            selection.legal_moves = reply.legal_moves;
                        }
                        _ => debug!("Dropping legal moves {} for stale selection", id),
                    },
                    Err(failure) => {
                        self.error_message = Some(
                            failure.message.unwrap_or_else(|| display::LEGAL_MOVES_FAILED.to_owned()),
                        );
                        if matches!(
                            &self.interaction,
                            Interaction::BoardSelected(selection) if selection.from == from
                        ) {
                            self.interaction = Interaction::Idle;
                        }
                    }
                }
            }
            RequestContext::Move { is_drop } => {
                match parse_outcome::<StateResponse>(id, outcome) {
                    Ok(state) => {
                        if let Some(captured) = state.captured_piece {
                            info!("Captured {}", captured);
                        }
                        if state.promoted == Some(true) {
                            info!("Piece promoted");
                        }
                        state.patch.apply(&mut self.snapshot);
                    }
                    Err(failure) => {
                        let fallback =
                            if is_drop { display::DROP_FAILED } else { display::MOVE_FAILED };
                        self.error_message =
                            Some(failure.message.unwrap_or_else(|| fallback.to_owned()));
                        if let Some(game_status) = failure.game_status {
                            self.snapshot.game_status = game_status;
                        }
                    }
                }
                self.interaction = Interaction::Idle;
            }
            RequestContext::Reset => match parse_outcome::<StateResponse>(id, outcome) {
                Ok(state) => {
                    state.patch.apply(&mut self.snapshot);
                    self.error_message = None;
                    self.interaction = Interaction::Idle;
                }
                Err(failure) => {
                    self.error_message = Some(
                        failure.message.unwrap_or_else(|| display::RESET_FAILED.to_owned()),
                    );
                }
            },
        }
        self.sync_game_over();
        Ok(())
    }

    fn submit_relocation(&mut self, selection: &BoardSelection, chosen: LegalMove) {
        let request = MoveRequest::relocate(
            self.snapshot.board.clone(),
            selection.from,
            selection.piece,
            chosen,
        );
        self.submit_move(request);
    }

    fn submit_move(&mut self, request: MoveRequest) {
        self.error_message = None;
        self.interaction = Interaction::Idle;
        let is_drop = request.is_drop();
        self.send(RemoteRequest::SubmitMove(request), RequestContext::Move { is_drop });
    }

    fn send(&mut self, request: RemoteRequest, context: RequestContext) {
        let id = RequestId(self.next_request_id);
        self.next_request_id += 1;
        debug!("Sending {} {} {}", id, request.method().as_str(), request.path());
        if self.requests_tx.send(OutgoingRequest { id, request }).is_err() {
            error!("Cannot send request {}: transport is gone", id);
            return;
        }
        self.in_flight.insert(id, context);
    }

    fn sync_game_over(&mut self) {
        if self.is_game_over() {
            self.interaction = Interaction::GameEnded;
        } else if self.interaction == Interaction::GameEnded {
            self.interaction = Interaction::Idle;
        }
    }
}

fn parse_outcome<T: DeserializeOwned>(
    id: RequestId, outcome: Result<HttpReply, String>,
) -> Result<T, CallFailure> {
    let reply = outcome.map_err(|err| {
        warn!("Request {} failed: {}", id, err);
        CallFailure::default()
    })?;
    if reply.ok {
        serde_json::from_value(reply.body).map_err(|err| {
            warn!("Malformed reply to {}: {}", id, err);
            CallFailure::default()
        })
    } else {
        let rejection: ErrorResponse = serde_json::from_value(reply.body).unwrap_or_default();
        info!("Request {} rejected with status {}: {:?}", id, reply.status, rejection.error);
        Err(CallFailure {
            message: rejection.error,
            game_status: rejection.game_status,
        })
    }
}
