#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod client;
pub mod coord;
pub mod display;
pub mod drop_advisor;
pub mod error;
pub mod event;
pub mod grid;
pub mod hand;
pub mod piece;
pub mod side;
pub mod snapshot;
pub mod test_util;
pub mod tui;

pub use client::*;
pub use coord::*;
pub use drop_advisor::*;
pub use event::*;
pub use grid::*;
pub use hand::*;
pub use piece::*;
pub use side::*;
pub use snapshot::*;
