#![forbid(unsafe_code)]

//! Core: geometry and logging bootstrap shared by the SplitGrid crates.
//!
//! # Role in SplitGrid
//! `splitgrid-core` holds the host-agnostic pieces that the layout crate and
//! its rendering collaborators agree on:
//! - **Geometry**: floating-point [`geometry::Point`] and [`geometry::Rect`]
//!   used for leaf bounds, splitter bars, and pointer hit testing.
//! - **Logging**: a one-call subscriber installer for hosts
//!   (`tracing-json` feature). Library crates only emit events.

pub mod geometry;
pub mod logging;

pub use geometry::{Point, Rect};
