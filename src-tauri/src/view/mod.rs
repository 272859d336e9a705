//! Capture window view — state and the controller that drives it.

mod controller;
mod state;

pub use controller::{ViewController, ViewError};
pub use state::{Ticket, ViewSnapshot, ViewState, CAPTURE_FAILED_MESSAGE, COPIED_NOTICE, EMPTY_URL_MESSAGE};
