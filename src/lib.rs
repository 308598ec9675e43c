// Library surface for headless/integration tests and reuse.
// The binary in main.rs only owns CLI parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod context;
pub mod draft;
pub mod feed;
pub mod logging;
pub mod route;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;
pub mod views;

pub use app::App;
