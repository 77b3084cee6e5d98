// Library root
// -----------
// This crate exposes a small library surface for the two binaries: the
// interactive terminal (`main.rs`) and the connectivity probe
// (`bin/probe.rs`).
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the coffee-shop backend
//   (menu, shop info, order placement and lookup).
// - `session`: Terminal session state (the scroll-back history, the
//   single current-order slot, the busy flag) and command dispatch.
// - `ui`: Implements the interactive prompt loop and rendering, and
//   delegates submitted lines to `session`.
// - `probe`: The sequential connectivity checks behind the `probe`
//   binary.
// - `log`: File-based logging setup.
//
// Keeping `session` separate from `ui` keeps the dispatch logic testable
// without a terminal.
pub mod api;
pub mod log;
pub mod probe;
pub mod session;
pub mod ui;
