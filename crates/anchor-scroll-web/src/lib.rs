#![forbid(unsafe_code)]

//! `anchor-scroll-web` binds `anchor-scroll-core` to a browser page.
//!
//! Design goals:
//! - **Host-driven**: the DOM is only read and written through
//!   [`ScrollHost`](anchor_scroll_core::ScrollHost); the core never sees it.
//! - **Explicit context**: every page owns its own `AnchorScroll` object
//!   instead of a process-wide list.
//! - **Rate-limited scroll**: scroll events pass through a [`throttle::Throttle`]
//!   driven by the page clock.
//!
//! The configuration and throttle modules are platform-independent and tested
//! natively; the DOM host and the exported JS class exist only on `wasm32`.

pub mod config;
pub mod throttle;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{AnchorScrollConfig, ConfigError};
pub use throttle::Throttle;
#[cfg(target_arch = "wasm32")]
pub use wasm::AnchorScroll;

/// Custom window event fired by pages whose layout changed without a scroll.
pub const LAYOUT_CHANGE_EVENT: &str = "afterLayoutChange";
