use crate::{
    any::{CalculateError, Difficulty},
    model::{beatmap::Beatmap, hit_object::HitObject, mods::GameMods},
    util::float_ext::FloatExt,
};

use self::{object::OsuDifficultyObject, skills::OsuSkills};

use super::{attributes::OsuDifficultyAttributes, object::OsuObject, scaling_factor::ScalingFactor};

pub mod gradual;
pub mod object;
pub mod skills;

const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const STAR_RATING_POWER: f64 = 1.1;
const HR_STAR_MULTIPLIER: f64 = 1.06;
const EZ_STAR_MULTIPLIER: f64 = 0.5;

/// Upper bound for star ratings.
pub const STAR_CAP: f64 = 100.0;

pub fn difficulty(
    difficulty: &Difficulty,
    map: &Beatmap,
) -> Result<OsuDifficultyAttributes, CalculateError> {
    let setup = OsuDifficultySetup::new(difficulty, map)?;
    let take = difficulty.get_passed_objects(map.hit_objects.len());
    let DifficultyValues {
        skills,
        mut attrs,
        objects,
    } = DifficultyValues::calculate(&setup, &map.hit_objects[..take]);

    DifficultyValues::eval(&mut attrs, &skills, setup.mods, &objects);

    tracing::trace!(stars = attrs.stars, n_objects = attrs.n_objects(), "osu difficulty");

    Ok(attrs)
}

/// Settings shared by all objects of a calculation.
pub struct OsuDifficultySetup {
    pub scaling_factor: ScalingFactor,
    pub mods: GameMods,
    pub clock_rate: f64,
    pub slider_multiplier: f64,
    pub tick_rate: f64,
    /// Attributes without any object-dependent values.
    pub attrs: OsuDifficultyAttributes,
}

impl OsuDifficultySetup {
    pub fn new(difficulty: &Difficulty, map: &Beatmap) -> Result<Self, CalculateError> {
        let map_attrs = map.attributes().difficulty(difficulty).build()?;

        let attrs = OsuDifficultyAttributes {
            ar: map_attrs.ar,
            od: map_attrs.od,
            cs: map_attrs.cs,
            hp: map_attrs.hp,
            preempt: map_attrs.hit_windows.ar,
            great_hit_window: map_attrs.hit_windows.od,
            clock_rate: map_attrs.clock_rate,
            ..Default::default()
        };

        Ok(Self {
            scaling_factor: ScalingFactor::new(map_attrs.cs),
            mods: difficulty.mods,
            clock_rate: map_attrs.clock_rate,
            slider_multiplier: map.slider_multiplier,
            tick_rate: map.slider_tick_rate,
            attrs,
        })
    }

    pub fn convert_objects(&self, hit_objects: &[HitObject]) -> Box<[OsuObject]> {
        hit_objects
            .iter()
            .map(|h| {
                OsuObject::new(
                    h,
                    &self.scaling_factor,
                    self.slider_multiplier,
                    self.tick_rate,
                    self.mods.hr(),
                )
            })
            .collect()
    }

    /// Start time of the first object after applying the clock rate.
    pub fn first_object_time(&self, objects: &[OsuObject]) -> f64 {
        objects
            .first()
            .map_or(0.0, |h| h.start_time / self.clock_rate)
    }
}

pub struct DifficultyValues {
    pub skills: OsuSkills,
    pub attrs: OsuDifficultyAttributes,
    pub objects: Box<[OsuObject]>,
}

impl DifficultyValues {
    pub fn calculate(setup: &OsuDifficultySetup, hit_objects: &[HitObject]) -> Self {
        let objects = setup.convert_objects(hit_objects);
        let mut attrs = setup.attrs.clone();

        for h in objects.iter() {
            attrs.add_object(h);
        }

        let diff_objects =
            OsuDifficultyObject::create(&objects, setup.clock_rate, &setup.scaling_factor);

        let mut skills = OsuSkills::new(setup.first_object_time(&objects));

        for h in diff_objects.iter() {
            skills.process(h);
        }

        Self {
            skills,
            attrs,
            objects,
        }
    }

    /// Process the skills' strains into the final attributes.
    ///
    /// `objects` are the objects that were processed by the skills.
    pub fn eval(
        attrs: &mut OsuDifficultyAttributes,
        skills: &OsuSkills,
        mods: GameMods,
        objects: &[OsuObject],
    ) {
        let aim_rating = skills.aim.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        let aim_rating_no_sliders =
            skills.aim_no_sliders.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        let speed_rating = skills.speed.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        let speed_notes = skills.speed.relevant_note_count();

        let slider_factor = if aim_rating > 0.0 {
            aim_rating_no_sliders / aim_rating
        } else {
            1.0
        };

        let mut stars = (aim_rating.powf(STAR_RATING_POWER) + speed_rating.powf(STAR_RATING_POWER))
            .powf(STAR_RATING_POWER.recip());

        if mods.ez() {
            stars *= EZ_STAR_MULTIPLIER;
        } else if mods.hr() {
            stars *= HR_STAR_MULTIPLIER;
        }

        if !stars.is_finite() {
            let fallback = fallback_stars(attrs, objects);
            tracing::warn!(stars, fallback, "non-finite star rating, using estimate");
            stars = fallback;
        }

        attrs.aim = aim_rating.finite_or(0.0);
        attrs.speed = speed_rating.finite_or(0.0);
        attrs.slider_factor = slider_factor.finite_or(1.0);
        attrs.speed_note_count = speed_notes.finite_or(0.0);
        attrs.stars = stars.clamp(0.0, STAR_CAP);
    }
}

/// Coarse star estimate from the map's settings and object density.
fn fallback_stars(attrs: &OsuDifficultyAttributes, objects: &[OsuObject]) -> f64 {
    let density = match (objects.first(), objects.last()) {
        (Some(first), Some(last)) if objects.len() > 1 => {
            let span_secs = (last.start_time - first.start_time) / attrs.clock_rate / 1000.0;

            if span_secs > 0.0 {
                objects.len() as f64 / span_secs
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    let settings = (attrs.ar + attrs.od + attrs.cs) / 30.0;
    let estimate = 0.9 * density.finite_or(0.0).sqrt() + 1.5 * settings.finite_or(0.0);

    estimate.clamp(0.0, STAR_CAP)
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use super::*;

    fn jumps(n: usize, gap: f64) -> Beatmap {
        let hit_objects = (0..n)
            .map(|i| {
                let x = if i % 2 == 0 { 64.0 } else { 448.0 };

                HitObject::circle(Pos::new(x, 192.0), 1000.0 + i as f64 * gap)
            })
            .collect();

        Beatmap {
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn empty_and_single() {
        for n in [0, 1] {
            let attrs = difficulty(&Difficulty::new(), &jumps(n, 200.0)).unwrap();

            assert!(attrs.stars.abs() < f64::EPSILON);
            assert!((attrs.slider_factor - 1.0).abs() < f64::EPSILON);
            assert_eq!(attrs.max_combo, n as u32);
        }
    }

    #[test]
    fn faster_is_harder() {
        let map_slow = jumps(100, 300.0);
        let map_fast = jumps(100, 150.0);

        let slow = difficulty(&Difficulty::new(), &map_slow).unwrap();
        let fast = difficulty(&Difficulty::new(), &map_fast).unwrap();
        let dt = difficulty(&Difficulty::new().mods(GameMods::DT), &map_slow).unwrap();

        assert!(fast.stars > slow.stars);
        assert!(dt.stars > slow.stars);
        assert!(fast.aim > slow.aim);
        assert!(fast.speed > slow.speed);
    }

    #[test]
    fn easy_halves() {
        let map = jumps(50, 200.0);
        let nm = difficulty(&Difficulty::new(), &map).unwrap();

        // keep settings equal so only the star multiplier differs
        let ez = difficulty(
            &Difficulty::new()
                .mods(GameMods::EZ)
                .cs(map.cs, true)
                .ar(map.approach_rate(), true)
                .od(map.od, true)
                .hp(map.hp, true),
            &map,
        )
        .unwrap();

        assert!((ez.stars - nm.stars * 0.5).abs() < 1e-9);
    }

    #[test]
    fn passed_objects_limits_counts() {
        let map = jumps(100, 200.0);
        let attrs = difficulty(&Difficulty::new().passed_objects(40), &map).unwrap();

        assert_eq!(attrs.n_circles, 40);
        assert_eq!(attrs.max_combo, 40);
    }

    #[test]
    fn degenerate_positions_fall_back() {
        let mut map = jumps(20, 200.0);
        map.hit_objects[5].pos = Pos::new(f32::NAN, 0.0);

        let attrs = difficulty(&Difficulty::new(), &map).unwrap();

        assert!(attrs.stars.is_finite());
        assert!(attrs.stars >= 0.0);
        assert!(attrs.aim.is_finite());
    }
}
