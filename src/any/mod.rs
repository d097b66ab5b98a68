pub use self::{
    attributes::{DifficultyAttributes, PerformanceAttributes},
    difficulty::{gradual::GradualDifficulty, Difficulty, ModsDependent},
    error::CalculateError,
    performance::{gradual::GradualPerformance, HitResultPriority, Performance, PerformanceSettings},
    score_state::ScoreState,
    strains::Strains,
};

mod attributes;
pub(crate) mod difficulty;
mod error;
pub(crate) mod performance;
mod score_state;
mod strains;
