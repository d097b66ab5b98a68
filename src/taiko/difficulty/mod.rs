use crate::{
    any::{CalculateError, Difficulty},
    model::{beatmap::Beatmap, hit_object::HitObject},
    util::float_ext::FloatExt,
};

use self::{object::TaikoDifficultyObject, skills::strain::TaikoStrainSkill};

use super::{attributes::TaikoDifficultyAttributes, object::TaikoObject};

pub mod gradual;
pub mod object;
pub mod skills;

const STAR_SCALING_FACTOR: f64 = 0.04125;

/// Upper bound for star ratings.
pub const STAR_CAP: f64 = 100.0;

pub fn difficulty(
    difficulty: &Difficulty,
    map: &Beatmap,
) -> Result<TaikoDifficultyAttributes, CalculateError> {
    let setup = TaikoDifficultySetup::new(difficulty, map)?;
    let take = difficulty.get_passed_objects(map.hit_objects.len());

    let DifficultyValues {
        skill,
        mut attrs,
        objects,
    } = DifficultyValues::calculate(&setup, &map.hit_objects[..take]);

    DifficultyValues::eval(&mut attrs, &skill, &objects);

    tracing::trace!(stars = attrs.stars, n_objects = attrs.n_objects(), "taiko difficulty");

    Ok(attrs)
}

/// Settings shared by all objects of a calculation.
pub struct TaikoDifficultySetup {
    pub clock_rate: f64,
    /// Attributes without any object-dependent values.
    pub attrs: TaikoDifficultyAttributes,
}

impl TaikoDifficultySetup {
    pub fn new(difficulty: &Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let map_attrs = map.attributes().difficulty(difficulty).build()?;

        let attrs = TaikoDifficultyAttributes {
            od: map_attrs.od,
            hit_window: map_attrs.hit_windows.od,
            clock_rate: map_attrs.clock_rate,
            is_convert: map.is_convert,
            ..Default::default()
        };

        Ok(Self {
            clock_rate: map_attrs.clock_rate,
            attrs,
        })
    }

    pub fn convert_objects(hit_objects: &[HitObject]) -> Box<[TaikoObject]> {
        hit_objects.iter().map(TaikoObject::new).collect()
    }

    /// Start time of the first object after applying the clock rate.
    pub fn first_object_time(&self, objects: &[TaikoObject]) -> f64 {
        objects
            .first()
            .map_or(0.0, |h| h.start_time / self.clock_rate)
    }
}

pub struct DifficultyValues {
    pub skill: TaikoStrainSkill,
    pub attrs: TaikoDifficultyAttributes,
    pub objects: Box<[TaikoObject]>,
}

impl DifficultyValues {
    pub fn calculate(setup: &TaikoDifficultySetup, hit_objects: &[HitObject]) -> Self {
        let objects = TaikoDifficultySetup::convert_objects(hit_objects);
        let mut attrs = setup.attrs.clone();

        for h in objects.iter() {
            attrs.add_object(h.is_hit());
        }

        let mut skill = TaikoStrainSkill::new(setup.first_object_time(&objects));

        for h in TaikoDifficultyObject::create(&objects, setup.clock_rate).iter() {
            skill.process(h);
        }

        Self {
            skill,
            attrs,
            objects,
        }
    }

    /// Process the skill's strain into the final attributes.
    ///
    /// `objects` are the objects that were processed by the skill.
    pub fn eval(
        attrs: &mut TaikoDifficultyAttributes,
        skill: &TaikoStrainSkill,
        objects: &[TaikoObject],
    ) {
        let strain = skill.difficulty_value();
        let mut stars = strain * STAR_SCALING_FACTOR;

        if !stars.is_finite() {
            let fallback = fallback_stars(attrs, objects);
            tracing::warn!(stars, fallback, "non-finite star rating, using estimate");
            stars = fallback;
        }

        attrs.strain = strain.finite_or(0.0);
        attrs.stars = stars.clamp(0.0, STAR_CAP);
    }
}

/// Coarse star estimate from the map's overall difficulty and hit density.
fn fallback_stars(attrs: &TaikoDifficultyAttributes, objects: &[TaikoObject]) -> f64 {
    let density = match (objects.first(), objects.last()) {
        (Some(first), Some(last)) if objects.len() > 1 => {
            let span_secs = (last.start_time - first.start_time) / attrs.clock_rate / 1000.0;

            if span_secs > 0.0 {
                f64::from(attrs.n_circles) / span_secs
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    let estimate = 0.9 * density.finite_or(0.0).sqrt() + 1.5 * (attrs.od / 10.0).finite_or(0.0);

    estimate.clamp(0.0, STAR_CAP)
}
