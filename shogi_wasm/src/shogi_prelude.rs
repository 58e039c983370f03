// Note. There is also `shogi_console/src/shogi_prelude.rs`.
//
// Frontends only need the public surface of the client library, so they import it wholesale.

pub use shogi_client::display;
pub use shogi_client::*;
