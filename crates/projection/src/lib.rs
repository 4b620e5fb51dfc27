//! Coordinate reference system transformations.
//!
//! Only spherical Web Mercator is implemented; every other output
//! spatial reference is a pass-through at the query layer.

pub mod mercator;

pub use mercator::{project, WebMercator, EARTH_RADIUS, MAX_LATITUDE};
