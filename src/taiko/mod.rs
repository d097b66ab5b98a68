//! osu!taiko difficulty and performance calculation.
//!
//! Difficulty is derived from a single strain skill that rewards changes in
//! color and rhythm between consecutive hits.

pub use self::{
    attributes::{TaikoDifficultyAttributes, TaikoPerformanceAttributes},
    difficulty::gradual::TaikoGradualDifficulty,
    performance::{gradual::TaikoGradualPerformance, TaikoPerformance},
    strains::TaikoStrains,
};

mod attributes;
pub(crate) mod difficulty;
mod object;
mod performance;
pub(crate) mod strains;
