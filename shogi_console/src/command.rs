use std::fmt;

use shogi_client::{Coord, PieceCode};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UserCommand {
    Cell(Coord),
    Hand(PieceCode),
    Promote(bool),
    Outside,
    Reset,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandError(String);

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

pub const HELP: &str = "<row><col> | hand <CODE> | promote yes|no | out | reset | quit";

pub fn parse_command(input: &str) -> Result<UserCommand, CommandError> {
    let words = input.split_whitespace().collect::<Vec<_>>();
    match words.as_slice() {
        ["quit"] => Ok(UserCommand::Quit),
        ["reset"] => Ok(UserCommand::Reset),
        ["out"] => Ok(UserCommand::Outside),
        ["promote", "yes"] => Ok(UserCommand::Promote(true)),
        ["promote", "no"] => Ok(UserCommand::Promote(false)),
        ["hand", code] => PieceCode::parse(code)
            .map(UserCommand::Hand)
            .map_err(|err| CommandError(err.to_string())),
        [square] => parse_square(square).map(UserCommand::Cell),
        [] => Err(CommandError("Empty command".to_owned())),
        _ => Err(CommandError(format!("Unknown command '{}'. Usage: {}", input.trim(), HELP))),
    }
}

// Two digits: row then column, both zero-based.
fn parse_square(s: &str) -> Result<Coord, CommandError> {
    let err = || CommandError(format!("Invalid square '{}'. Usage: {}", s, HELP));
    let digits = s.chars().map(|ch| ch.to_digit(10)).collect::<Option<Vec<_>>>().ok_or_else(err)?;
    let [row, col] = digits.as_slice() else {
        return Err(err());
    };
    Coord::try_from_zero_based(*row as i64, *col as i64).ok_or_else(err)
}
