//! Library to calculate difficulty and performance attributes for [osu!]
//! standard and taiko maps.
//!
//! ## Description
//!
//! Each map is reduced to a series of strain peaks, one per 400ms section,
//! which are weighted into a star rating. The star rating together with a
//! score's hitresults is then evaluated into performance points.
//!
//! Maps are expected to be decoded already, e.g. through [`rosu_map`], and
//! handed over as [`Beatmap`].
//!
//! ## Usage
//!
//! ```
//! use strain_pp::{Beatmap, Difficulty, GameMods, Performance, PerformanceSettings};
//! use strain_pp::model::hit_object::{HitObject, Pos};
//!
//! let map = Beatmap {
//!     od: 8.0,
//!     ar: Some(9.0),
//!     hit_objects: (0..200)
//!         .map(|i| {
//!             let pos = Pos::new(64.0 + 96.0 * (i % 5) as f32, 96.0 + 64.0 * (i % 3) as f32);
//!
//!             HitObject::circle(pos, 1000.0 + 180.0 * f64::from(i))
//!         })
//!         .collect(),
//!     ..Default::default()
//! };
//!
//! // Calculate difficulty attributes
//! let difficulty = Difficulty::new().mods(GameMods::HD | GameMods::HR);
//! let diff_attrs = difficulty.calculate(&map).unwrap();
//!
//! let stars = diff_attrs.stars();
//!
//! // Calculate performance attributes
//! let settings = PerformanceSettings::new()
//!     .difficulty(difficulty)
//!     .combo(150)
//!     .accuracy(99.2)
//!     .misses(2);
//!
//! // To speed up the calculation significantly, re-use the previous
//! // attributes. **Note** that this should only be done if the map, mods,
//! // and amount of passed objects stay the same. Otherwise, the resulting
//! // attributes will be incorrect.
//! let perf_attrs = Performance::from_attributes(diff_attrs)
//!     .calculate(&settings)
//!     .unwrap();
//!
//! let pp = perf_attrs.pp();
//!
//! println!("Stars: {stars} | PP: {pp}");
//! ```
//!
//! ## Gradual calculation
//!
//! [`GradualDifficulty`] and [`GradualPerformance`] process a map object by
//! object, e.g. to display live values during a play. The attributes after
//! `n` objects equal those of a regular calculation with `n` passed objects.
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `serde` | Implement `serde::{Deserialize, Serialize}` for settings and attributes. | [`serde`]
//!
//! Diagnostics such as fallback estimates for degenerate values are emitted
//! through [`tracing`].
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`serde`]: https://docs.rs/serde
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    any::{
        CalculateError, Difficulty, DifficultyAttributes, GradualDifficulty, GradualPerformance,
        HitResultPriority, Performance, PerformanceAttributes, PerformanceSettings, ScoreState,
    },
    model::{beatmap::Beatmap, mods::GameMods},
};

/// Types for calculations of any mode.
pub mod any;

/// Types for osu!standard calculations.
pub mod osu;

/// Types for osu!taiko calculations.
pub mod taiko;

/// Types used in and around this crate.
pub mod model;

mod util;
