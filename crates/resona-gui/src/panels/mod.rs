//! GUI panels for the Resona explorer.

pub mod merit;
pub mod parameters;
pub mod spectrum;
