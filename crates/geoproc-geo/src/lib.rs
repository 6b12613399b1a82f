//! geoproc geo - the bundled geometry engine
//!
//! Implements [`geoproc_core::GeometryEngine`] on top of `geo`, `spade` and
//! `geo-buf`.

pub mod convert;
pub mod engine;
pub mod extrude;
pub mod offset;
pub mod shape;
pub mod skeleton;
pub mod triangulate;
pub mod validation;

pub use engine::GeoEngine;
pub use shape::{Elevation, Shape};
