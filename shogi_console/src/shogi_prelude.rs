// Note. There is also `shogi_wasm/src/shogi_prelude.rs`.

pub use shogi_client::*;
pub use shogi_client::{display, tui};
