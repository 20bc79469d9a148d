//! Laminate building blocks: materials, plies and ply stacks

mod laminate;
mod material;
mod ply;

pub use laminate::Laminate;
pub use material::{MaterialLibrary, MaterialProperties};
pub use ply::{Ply, ResistanceFactors};
