pub mod config;
pub mod counter;
pub mod form;
pub mod log;
pub mod navigation;
pub mod notification;
pub mod scroll;
pub mod scroll_spy;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
