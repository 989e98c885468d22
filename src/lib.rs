pub mod cards;
pub mod clipboard;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod logging;
pub mod mailto;
pub mod motion;
pub mod nav;
pub mod perf;
pub mod schedule;
pub mod toast;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(target_arch = "wasm32")]
pub use frontend::run;
