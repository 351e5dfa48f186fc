//! Spatial layout of the battlefield

pub mod grid;

pub use grid::{Grid, MovementResult};
