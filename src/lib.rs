// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod achievements;
pub mod app_dirs;
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod games;
pub mod leaderboard;
pub mod logging;
pub mod navigation;
pub mod profile;
pub mod round;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod util;
