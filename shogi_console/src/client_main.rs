use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use log::{info, warn};
use scopeguard::defer;

use crate::command::{self, UserCommand, parse_command};
use crate::network::{self, HttpTransport};
use crate::shogi_prelude::*;


pub struct ClientConfig {
    pub server_url: String,
}

enum IncomingEvent {
    Network(RemoteResponse),
    Terminal(term_event::Event),
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1)
        )?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, client_state: &ClientState, keyboard_input: &str,
    command_error: &Option<String>,
) -> io::Result<()> {
    // Note. Don't clear the whole screen to avoid blinking.
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, tui::render_client(client_state))?;
    if client_state.num_requests_in_flight() > 0 {
        writeln_raw(stdout, "...".with(style::Color::DarkGrey))?;
    } else {
        writeln_raw(stdout, "")?;
    }
    let input_style =
        if client_state.is_game_over() { style::Color::DarkGrey } else { style::Color::White };
    writeln_raw(stdout, format!("> {}▂", keyboard_input).with(input_style))?;
    match command_error {
        Some(err) => writeln_raw(stdout, err.clone().with(style::Color::Red))?,
        None => writeln_raw(stdout, command::HELP.with(style::Color::DarkGrey))?,
    }
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

// Returns `false` when the user wants to quit.
fn execute_command(client_state: &mut ClientState, cmd: UserCommand) -> bool {
    match cmd {
        UserCommand::Cell(coord) => client_state.click_cell(coord),
        UserCommand::Hand(piece) => client_state.click_hand_piece(piece.side, piece),
        UserCommand::Promote(promote) => client_state.choose_promotion(promote),
        UserCommand::Outside => client_state.click_outside_board(),
        UserCommand::Reset => client_state.reset(),
        UserCommand::Quit => return false,
    }
    true
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&config.server_url)?;
    info!("Connecting to {}", config.server_url);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_local = tx.clone();
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                break;
            }
        }
    });
    let (requests_tx, requests_rx) = mpsc::channel();
    network::spawn_transport_thread(transport, requests_rx, tx, IncomingEvent::Network);

    let mut client_state = ClientState::new(requests_tx);
    let mut keyboard_input = String::new();
    let mut command_error = None;
    client_state.load();
    render(&mut stdout, &client_state, &keyboard_input, &command_error)?;
    for event in rx {
        match event {
            IncomingEvent::Network(response) => {
                if let Err(err) = client_state.process_response(response) {
                    warn!("Unexpected response: {:?}", err);
                }
            }
            IncomingEvent::Terminal(term_event::Event::Key(event))
                if event.kind == term_event::KeyEventKind::Press =>
            {
                match event.code {
                    term_event::KeyCode::Char('c')
                        if event.modifiers.contains(term_event::KeyModifiers::CONTROL) =>
                    {
                        return Ok(());
                    }
                    term_event::KeyCode::Char(ch) => {
                        keyboard_input.push(ch);
                    }
                    term_event::KeyCode::Backspace => {
                        keyboard_input.pop();
                    }
                    term_event::KeyCode::Esc => {
                        keyboard_input.clear();
                    }
                    term_event::KeyCode::Enter => {
                        command_error = None;
                        match parse_command(&keyboard_input) {
                            Ok(cmd) => {
                                if !execute_command(&mut client_state, cmd) {
                                    return Ok(());
                                }
                            }
                            Err(err) => command_error = Some(err.to_string()),
                        }
                        keyboard_input.clear();
                    }
                    _ => {}
                }
            }
            IncomingEvent::Terminal(_) => {
                // Any event triggers repaint, so no additional action is required.
            }
        }
        render(&mut stdout, &client_state, &keyboard_input, &command_error)?;
    }
    anyhow::bail!("Unexpected end of events stream");
}
