// Improvement potential. Kanji are double-width in most terminals; alignment relies on that.

use console::Style;
use itertools::Itertools;

use crate::client::{CellHighlight, ClientState};
use crate::coord::{Col, Coord, Row};
use crate::display;
use crate::hand::Hand;
use crate::piece::piece_to_kanji;
use crate::side::Side;


pub fn render_client(state: &ClientState) -> String {
    let snapshot = state.snapshot();
    let mut ret = String::new();
    ret.push_str(&render_hand(state, Side::Lower, &snapshot.hands[Side::Lower]));
    ret.push('\n');
    ret.push_str(&render_grid(state));
    ret.push_str(&render_hand(state, Side::Upper, &snapshot.hands[Side::Upper]));
    ret.push('\n');
    if state.pending_promotion().is_some() {
        ret.push_str(&format!(
            "{} [promote yes: {} / promote no: {}]\n",
            display::PROMOTION_QUESTION,
            display::PROMOTION_YES,
            display::PROMOTION_NO
        ));
    }
    for line in display::status_lines(state) {
        let style = match line.kind {
            display::StatusKind::Turn => Style::new(),
            display::StatusKind::GameOver => Style::new().magenta().bold(),
            display::StatusKind::Check => Style::new().yellow(),
            display::StatusKind::Checkmate => Style::new().yellow().bold(),
            display::StatusKind::Error => Style::new().red(),
        };
        ret.push_str(&format!("{}\n", style.apply_to(line.text)));
    }
    ret
}

pub fn render_grid(state: &ClientState) -> String {
    let grid = &state.snapshot().board;
    let mut col_names = String::from("   ");
    for col in Col::all() {
        col_names.push_str(&format!(" {} ", col.to_zero_based()));
    }
    col_names.push('\n');

    let mut ret = col_names.clone();
    for row in Row::all() {
        ret.push_str(&format!(" {} ", row.to_zero_based()));
        for col in Col::all() {
            let coord = Coord::new(row, col);
            let style = square_style(state.cell_highlight(coord));
            let square = match grid[coord] {
                Some(piece) => {
                    let piece_style = match piece.side {
                        Side::Upper => style.clone().color256(233),
                        Side::Lower => style.clone().color256(124),
                    };
                    // `v` marks pieces facing down the board.
                    let marker = if piece.side == Side::Lower { 'v' } else { ' ' };
                    piece_style.apply_to(format!("{}{}", marker, piece_to_kanji(piece))).to_string()
                }
                None => style.apply_to("   ").to_string(),
            };
            ret.push_str(&square);
        }
        ret.push('\n');
    }
    ret
}

fn square_style(highlight: CellHighlight) -> Style {
    if highlight.selected {
        Style::new().on_color256(214)
    } else if highlight.legal_destination {
        Style::new().on_color256(150)
    } else if highlight.drop_target {
        Style::new().on_color256(153)
    } else {
        Style::new().on_color256(222)
    }
}

fn render_hand(state: &ClientState, side: Side, hand: &Hand) -> String {
    let counts = hand.counts();
    let content = if counts.is_empty() {
        display::EMPTY_HAND.to_owned()
    } else {
        counts
            .into_iter()
            .map(|(piece, count)| {
                let chip = format!(
                    "{}({}) {}",
                    piece_to_kanji(piece),
                    piece.to_code(),
                    display::chip_caption(count)
                );
                if state.selected_hand_piece() == Some(piece) {
                    Style::new().reverse().apply_to(chip).to_string()
                } else if !state.hand_enabled(side) {
                    Style::new().dim().apply_to(chip).to_string()
                } else {
                    chip
                }
            })
            .join("  ")
    };
    format!("{}: {}", display::hand_label(side), content)
}
