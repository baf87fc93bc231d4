//! Terminal UI: event loop, application state, input handling and
//! rendering.

mod app;
mod event;
mod input;
mod render;
mod state;
mod widgets;

pub use app::App;
pub use event::{Event, EventHandler};
pub use input::{Effect, handle_key};
pub use state::*;
