use crate::taiko::object::{HitType, TaikoObject};

/// A [`TaikoObject`] put into relation with its predecessor.
#[derive(Clone, Debug, PartialEq)]
pub struct TaikoDifficultyObject {
    /// Start time after applying the clock rate.
    pub start_time: f64,
    /// Time since the previous object after applying the clock rate.
    pub delta: f64,
    /// Whether both this and the previous object are hits.
    pub is_hit_pair: bool,
    /// Whether this object's hit type differs from the previous one's.
    pub has_type_change: bool,
}

impl TaikoDifficultyObject {
    pub fn new(curr: &TaikoObject, prev: &TaikoObject, clock_rate: f64) -> Self {
        let is_hit_pair = curr.is_hit() && prev.is_hit();

        Self {
            start_time: curr.start_time / clock_rate,
            delta: (curr.start_time - prev.start_time) / clock_rate,
            is_hit_pair,
            has_type_change: is_hit_pair && is_rim(curr.hit_type) != is_rim(prev.hit_type),
        }
    }

    /// Create a difficulty object for each object after the first.
    pub fn create(objects: &[TaikoObject], clock_rate: f64) -> Vec<Self> {
        objects
            .windows(2)
            .map(|pair| Self::new(&pair[1], &pair[0], clock_rate))
            .collect()
    }
}

const fn is_rim(hit_type: HitType) -> bool {
    matches!(hit_type, HitType::Rim)
}
