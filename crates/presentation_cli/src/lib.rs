//! PWS widget command-line front end
//!
//! Argument parsing, wiring of the refresh pipeline from configuration,
//! and a console renderer standing in for the home-screen widget.

pub mod app;
pub mod cli;
pub mod renderer;

pub use app::App;
pub use cli::{Cli, Commands, EXIT_RETRY, log_filter_from_verbosity};
pub use renderer::{ConsoleRenderer, format_view};
