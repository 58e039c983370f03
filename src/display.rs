// Text and CSS classes shared by all frontends, so that the browser and the terminal show the
// same thing for the same client state.

use crate::client::{CellHighlight, ClientState};
use crate::side::Side;


pub const MOVE_FAILED: &str = "着手に失敗しました。";
pub const DROP_FAILED: &str = "駒打ちに失敗しました。";
pub const LEGAL_MOVES_FAILED: &str = "合法手の取得に失敗しました。";
pub const RESET_FAILED: &str = "リセットに失敗しました。";
pub const INTERNAL_ERROR: &str = "内部エラーが発生しました。ページを再読み込みしてください。";

pub const TITLE: &str = "将棋";
pub const RESET_BUTTON: &str = "リセット";
pub const PROMOTION_QUESTION: &str = "成りますか？";
pub const PROMOTION_YES: &str = "はい";
pub const PROMOTION_NO: &str = "いいえ";
pub const EMPTY_HAND: &str = "なし";

pub fn side_label(side: Option<Side>) -> &'static str {
    match side {
        Some(Side::Upper) => "先手",
        Some(Side::Lower) => "後手",
        None => "なし",
    }
}

pub fn hand_label(side: Side) -> String { format!("{}持ち駒", side_label(Some(side))) }

pub fn chip_caption(count: usize) -> String { format!("x{}", count) }

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusKind {
    Turn,
    GameOver,
    Check,
    Checkmate,
    Error,
}

impl StatusKind {
    pub fn css_classes(self) -> &'static [&'static str] {
        match self {
            StatusKind::Turn => &["status-line"],
            StatusKind::GameOver => &["game-end-text"],
            StatusKind::Check => &["status-line", "event-line"],
            StatusKind::Checkmate => &["status-line", "event-line", "checkmate-line"],
            StatusKind::Error => &["error-text"],
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

pub fn status_lines(state: &ClientState) -> Vec<StatusLine> {
    let snapshot = state.snapshot();
    let mut lines = vec![StatusLine {
        kind: StatusKind::Turn,
        text: format!("手番: {}", side_label(Some(snapshot.side_to_move))),
    }];
    if snapshot.game_status.is_ended() {
        lines.push(StatusLine {
            kind: StatusKind::GameOver,
            text: format!("対局終了: 勝者 {}", side_label(snapshot.game_status.winner)),
        });
    }
    for (side, in_check) in snapshot.check_status.iter() {
        if in_check {
            lines.push(StatusLine {
                kind: StatusKind::Check,
                text: format!("{}が王手されています", side_label(Some(side))),
            });
        }
    }
    for (side, mated) in snapshot.checkmate_status.iter() {
        if mated {
            lines.push(StatusLine {
                kind: StatusKind::Checkmate,
                text: format!("{}が詰みです", side_label(Some(side))),
            });
        }
    }
    if let Some(error) = state.error_message() {
        lines.push(StatusLine { kind: StatusKind::Error, text: error.to_owned() });
    }
    lines
}

pub fn cell_classes(highlight: CellHighlight) -> Vec<&'static str> {
    let mut classes = vec!["cell"];
    if highlight.legal_destination {
        classes.push("highlight");
    }
    if highlight.selected {
        classes.push("selected");
    }
    if highlight.drop_target {
        classes.push("drop-target");
    }
    classes
}

pub fn board_classes(game_over: bool) -> Vec<&'static str> {
    let mut classes = vec!["board"];
    if game_over {
        classes.push("board-ended");
    }
    classes
}

pub fn chip_classes(active: bool) -> Vec<&'static str> {
    let mut classes = vec!["hand-piece-chip"];
    if active {
        classes.push("active-hand-piece");
    }
    classes
}
