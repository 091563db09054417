//! Core data structures for the Tilefall board engine.
//!
//! This crate provides the fundamental, presentation-agnostic types shared by
//! the board simulation and game orchestration crates:
//!
//! - [`tile`]: Type-safe tile colors and the [`Cell`] occupancy alias
//! - [`coord`]: Board coordinates with 4-directional neighbor iteration
//! - [`grid`]: A generic fixed-size 2D container addressable by [`Coord`]
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{Cell, Coord, Grid, TileColor};
//!
//! // An empty 4x3 board: every cell starts as `None`.
//! let mut grid: Grid<Cell> = Grid::new(4, 3);
//!
//! let coord = Coord::new(2, 1);
//! grid[coord] = Some(TileColor::C);
//!
//! assert_eq!(grid[coord], Some(TileColor::C));
//! assert!(grid.are_valid_coordinates(coord));
//! assert!(!grid.are_valid_coordinates(Coord::new(4, 0)));
//! ```

pub mod coord;
pub mod grid;
pub mod tile;

// Re-export commonly used types
pub use self::{
    coord::Coord,
    grid::Grid,
    tile::{Cell, TileColor},
};
