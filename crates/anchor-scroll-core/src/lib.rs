#![forbid(unsafe_code)]

//! Core: section/bullet pairing, current-section selection, and scroll targets.
//!
//! # Role in anchor-scroll
//! `anchor-scroll-core` is the decision layer. It never touches a DOM: the
//! embedding environment implements [`host::ScrollHost`] to report geometry and
//! to apply the visual effects the core decides on.
//!
//! # Primary responsibilities
//! - **Geometry**: pure distance and scroll-target computations.
//! - **Pairing**: 1:1 binding of sections to bullets by anchor id.
//! - **AnchorSet**: picks the current section and walks next/prev.
//! - **AnchorScrollContext**: host-owned registry fanning out page events.
//!
//! # How it fits in the system
//! `anchor-scroll-web` wraps this crate with a `web-sys` host and wires the
//! window events; native hosts and tests use [`host::StaticPage`].

pub mod anchor_set;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod pairing;
pub mod registry;

pub use anchor_set::{AnchorSet, Bullet, OnScroll, Section};
pub use config::{AnchorSetConfig, BulletSource, SelectionPolicy};
pub use error::AnchorError;
pub use geometry::{DistanceDirection, RegionMetrics, SectionDistance, ViewportMetrics};
pub use host::{HostEffect, ScrollHost, StaticPage};
pub use pairing::AnchorId;
pub use registry::{AnchorScrollContext, AnchorSetId};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
