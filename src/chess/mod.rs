//! Implementation of the chess position core: packed board representation,
//! attack generation, check and pin analysis, legal move enumeration and
//! move application.

mod attacks;
pub mod bitboard;
pub mod core;
pub mod movegen;
pub mod position;
