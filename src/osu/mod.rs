//! osu!standard difficulty and performance calculation.
//!
//! Difficulty is derived from three strain skills: aim, aim without
//! sliders, and speed. Flashlight performance is derived from the aim
//! strain.

pub use self::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    difficulty::gradual::OsuGradualDifficulty,
    performance::{gradual::OsuGradualPerformance, OsuPerformance},
    strains::OsuStrains,
};

mod attributes;
pub(crate) mod difficulty;
mod object;
mod performance;
mod scaling_factor;
pub(crate) mod strains;
