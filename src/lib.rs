// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) loads the configuration, opens a session and hands it to the
// menu loop.
//
// Module responsibilities:
// - `config`: environment / `.env` loading into a typed `Config`.
// - `api`: the group model, the `GroupApi` seam and the blocking Okta client
//   with its private-key token flow.
// - `ui`: the terminal protocol, main menu and the create/list/delete flows.
// - `error`: error taxonomy shared by the above.
pub mod api;
pub mod config;
pub mod error;
pub mod ui;

pub use error::{AppError, Result};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random source for group names: fixed when a seed is configured,
/// otherwise drawn from OS entropy once per session.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
