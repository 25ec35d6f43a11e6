//! Concrete strategies for simulated seats.
mod fish;

pub use fish::*;
