#![cfg_attr(feature = "strict", deny(warnings))]

pub mod fetch;
pub mod outside_click;
pub mod web_document;
pub mod web_element_ext;
pub mod web_error_handling;
pub mod web_logger;

mod shogi_prelude;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use itertools::Itertools;
use log::{info, warn};
use shogi_prelude::*;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_document::web_document;
use web_element_ext::WebElementExt;
use web_error_handling::{JsResult, report_js_error};

use crate::outside_click::OutsideClickGuard;


const ROOT_ID: &str = "shogi-root";
const BOARD_ID: &str = "board";
const TURN_LINE_ID: &str = "turn-line";
pub(crate) const STATUS_LINES_ID: &str = "status-lines";
const PROMOTION_AREA_ID: &str = "promotion-area";

// Hands are listed top to bottom, matching the board orientation.
const HAND_ORDER: [Side; 2] = [Side::Lower, Side::Upper];

struct App {
    state: ClientState,
    requests_rx: mpsc::Receiver<OutgoingRequest>,
    api_base: String,
    outside_click: Option<OutsideClickGuard>,
}

type AppRef = Rc<RefCell<App>>;

#[wasm_bindgen]
pub struct WebClient {
    app: AppRef,
}

#[wasm_bindgen]
impl WebClient {
    // `api_base` is prepended to endpoint paths; empty means same origin.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: &str) -> WebClient {
        let (requests_tx, requests_rx) = mpsc::channel();
        let app = App {
            state: ClientState::new(requests_tx),
            requests_rx,
            api_base: api_base.to_owned(),
            outside_click: None,
        };
        WebClient { app: Rc::new(RefCell::new(app)) }
    }

    // Builds the page under `#shogi-root` and loads the game. Call once.
    pub fn init_page(&self) -> JsResult<()> {
        info!("Starting shogi client, API base: {:?}", self.app.borrow().api_base);
        render_skeleton(&self.app)?;
        dispatch(&self.app, |state| state.load())
    }

    pub fn reset(&self) -> JsResult<()> { dispatch(&self.app, |state| state.reset()) }

    pub fn num_requests_in_flight(&self) -> usize {
        self.app.borrow().state.num_requests_in_flight()
    }
}

// Applies a controller action, starts the requests it produced and redraws the page.
fn dispatch(app: &AppRef, action: impl FnOnce(&mut ClientState)) -> JsResult<()> {
    let (requests, api_base) = {
        let mut app = app.borrow_mut();
        action(&mut app.state);
        (app.requests_rx.try_iter().collect_vec(), app.api_base.clone())
    };
    for OutgoingRequest { id, request } in requests {
        let app = Rc::clone(app);
        let api_base = api_base.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = fetch::perform(&api_base, &request).await;
            let action: Box<dyn FnOnce(&mut ClientState)> = Box::new(|state| {
                if let Err(err) = state.process_response(RemoteResponse { id, outcome }) {
                    warn!("Unexpected response: {:?}", err);
                }
            });
            let result = dispatch(&app, action);
            if let Err(err) = result {
                report_js_error("Cannot apply response", err);
            }
        });
    }
    render(app)?;
    sync_outside_click(app)
}

// The outside click listener exists exactly while a hand piece is selected.
fn sync_outside_click(app: &AppRef) -> JsResult<()> {
    let mut app_mut = app.borrow_mut();
    let hand_selected = app_mut.state.selected_hand_piece().is_some();
    match (hand_selected, app_mut.outside_click.is_some()) {
        (true, false) => {
            let app = Rc::clone(app);
            app_mut.outside_click = Some(OutsideClickGuard::new(move || {
                dispatch(&app, |state| state.click_outside_board())
            })?);
        }
        (false, true) => {
            app_mut.outside_click = None;
        }
        _ => {}
    }
    Ok(())
}

// Static part of the page. Dynamic containers get one delegated listener each, so that
// re-rendering their content does not create new closures.
fn render_skeleton(app: &AppRef) -> JsResult<()> {
    let document = web_document()?;
    let root = document.ensure_node("div", ROOT_ID, &document.body()?.into())?;
    root.remove_all_children();
    let page = root.append_new_element("div")?.with_classes(["App"])?;
    page.append_new_element("h1")?.set_text_content(Some(display::TITLE));

    let strip = page.append_new_element("div")?.with_classes(["status-strip"])?;
    strip.append_new_element("p")?.with_id(TURN_LINE_ID).with_classes(["status-line"])?;
    let reset_button = strip
        .append_new_element("button")?
        .with_attribute("type", "button")?
        .with_classes(["reset-btn"])?
        .with_text_content(display::RESET_BUTTON);
    let app_clone = Rc::clone(app);
    reset_button.add_event_listener_and_forget("click", move |_: web_sys::Event| {
        dispatch(&app_clone, |state| state.reset())
    })?;

    page.append_new_element("div")?.with_id(STATUS_LINES_ID);

    let promotion_area = page.append_new_element("div")?.with_id(PROMOTION_AREA_ID);
    let app_clone = Rc::clone(app);
    promotion_area.add_event_listener_and_forget("click", move |event: web_sys::Event| {
        let Some(promote) = closest_attribute(&event, "button[data-promote]", "data-promote")
        else {
            return Ok(());
        };
        let promote = promote == "true";
        dispatch(&app_clone, |state| state.choose_promotion(promote))
    })?;

    let board_area = page.append_new_element("div")?.with_classes(["board-area"])?;
    for side in HAND_ORDER {
        if side == Side::Upper {
            let board = board_area.append_new_element("div")?.with_id(BOARD_ID);
            let app_clone = Rc::clone(app);
            board.add_event_listener_and_forget("click", move |event: web_sys::Event| {
                let Some(coord) = event_coord(&event) else {
                    return Ok(());
                };
                dispatch(&app_clone, |state| state.click_cell(coord))
            })?;
        }
        let side_class = format!("hands-{}", side.to_wire());
        let hands_row =
            board_area.append_new_element("div")?.with_classes(["hands-row", side_class.as_str()])?;
        hands_row.append_text_span(&display::hand_label(side), ["hands-label"])?;
        let hand_content = hands_row
            .append_new_element("div")?
            .with_id(&hand_node_id(side))
            .with_classes(["hands-content"])?;
        let app_clone = Rc::clone(app);
        hand_content.add_event_listener_and_forget("click", move |event: web_sys::Event| {
            let Some(code) = closest_attribute(&event, ".hand-piece-chip", "data-piece") else {
                return Ok(());
            };
            let piece = PieceCode::parse(&code).map_err(|err| rust_error!("{}", err))?;
            dispatch(&app_clone, |state| state.click_hand_piece(side, piece))
        })?;
    }
    Ok(())
}

fn render(app: &AppRef) -> JsResult<()> {
    let app = app.borrow();
    let state = &app.state;
    render_status(state)?;
    render_promotion(state)?;
    render_board(state)?;
    for side in Side::iter() {
        render_hand(state, side)?;
    }
    Ok(())
}

fn render_status(state: &ClientState) -> JsResult<()> {
    let document = web_document()?;
    let turn_line = document.existing_element(TURN_LINE_ID)?;
    let lines_node = document.existing_element(STATUS_LINES_ID)?;
    lines_node.remove_all_children();
    for line in display::status_lines(state) {
        if line.kind == display::StatusKind::Turn {
            turn_line.set_text_content(Some(&line.text));
        } else {
            lines_node
                .append_new_element("p")?
                .with_classes(line.kind.css_classes().iter().copied())?
                .set_text_content(Some(&line.text));
        }
    }
    Ok(())
}

fn render_promotion(state: &ClientState) -> JsResult<()> {
    let area = web_document()?.existing_element(PROMOTION_AREA_ID)?;
    area.remove_all_children();
    if state.pending_promotion().is_none() {
        return Ok(());
    }
    let choice = area
        .append_new_element("div")?
        .with_classes(["promotion-overlay"])?
        .append_new_element("div")?
        .with_classes(["promotion-choice"])?;
    choice.append_text_span(display::PROMOTION_QUESTION, ["promotion-question"])?;
    for (promote, caption) in [(true, display::PROMOTION_YES), (false, display::PROMOTION_NO)] {
        choice
            .append_new_element("button")?
            .with_attribute("type", "button")?
            .with_attribute("data-promote", &promote.to_string())?
            .with_disabled(state.is_game_over())?
            .set_text_content(Some(caption));
    }
    Ok(())
}

fn render_board(state: &ClientState) -> JsResult<()> {
    let board_node = web_document()?.existing_element(BOARD_ID)?;
    board_node.set_attribute("class", &display::board_classes(state.is_game_over()).join(" "))?;
    board_node.remove_all_children();
    let grid = &state.snapshot().board;
    for row in Row::all() {
        let row_node = board_node.append_new_element("div")?.with_classes(["row"])?;
        for col in Col::all() {
            let coord = Coord::new(row, col);
            let cell = row_node
                .append_new_element("div")?
                .with_classes(display::cell_classes(state.cell_highlight(coord)))?
                .with_attribute("data-row", &row.to_zero_based().to_string())?
                .with_attribute("data-col", &col.to_zero_based().to_string())?;
            if let Some(piece) = grid[coord] {
                append_piece_image(&cell, piece)?;
            }
        }
    }
    Ok(())
}

fn render_hand(state: &ClientState, side: Side) -> JsResult<()> {
    let hand_node = web_document()?.existing_element(&hand_node_id(side))?;
    hand_node.remove_all_children();
    let counts = state.snapshot().hands[side].counts();
    if counts.is_empty() {
        hand_node.set_text_content(Some(display::EMPTY_HAND));
        return Ok(());
    }
    let selected = state.selected_hand_piece();
    for (piece, count) in counts {
        let chip = hand_node
            .append_new_element("button")?
            .with_attribute("type", "button")?
            .with_attribute("data-piece", &piece.to_code())?
            .with_classes(display::chip_classes(selected == Some(piece)))?
            .with_disabled(!state.hand_enabled(side))?;
        append_piece_image(&chip, piece)?;
        chip.append_text(&format!(" {}", display::chip_caption(count)))?;
    }
    Ok(())
}

fn append_piece_image(parent: &web_sys::Element, piece: PieceCode) -> JsResult<()> {
    let mut classes = vec!["piece-image"];
    if piece.side == Side::Lower {
        classes.push("piece-lower");
    }
    parent
        .append_new_element("img")?
        .with_classes(classes)?
        .with_attribute("src", &piece_image_path(piece))?
        .with_attribute("alt", &piece.to_code())?;
    Ok(())
}

fn hand_node_id(side: Side) -> String { format!("hands-{}-content", side.to_wire()) }

fn closest_attribute(event: &web_sys::Event, selectors: &str, attribute: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    target.closest(selectors).ok()??.get_attribute(attribute)
}

fn event_coord(event: &web_sys::Event) -> Option<Coord> {
    let row = closest_attribute(event, ".cell", "data-row")?.parse().ok()?;
    let col = closest_attribute(event, ".cell", "data-col")?.parse().ok()?;
    Coord::try_from_zero_based(row, col)
}
