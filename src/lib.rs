// Library root
// -----------
// The `veo` binary is a thin shell over these modules.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the Veo API (auth, pagination,
//   decoding, error translation).
// - `models`: lenient data shapes for recordings, match details and
//   periods.
// - `error`: the client's error type.
// - `config`: token / club / endpoint resolution.
// - `cli`: command-line argument definitions.
// - `ui`: command flows and terminal rendering.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;

pub use api::{ApiClient, ListOptions};
pub use error::{ApiError, Result};
