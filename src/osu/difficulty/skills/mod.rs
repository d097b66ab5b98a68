use self::{kind::SkillKind, strain::StrainSkill};

use super::object::OsuDifficultyObject;

pub mod kind;
pub mod strain;

/// All osu!standard skills, processed in lockstep.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuSkills {
    pub aim: StrainSkill,
    pub aim_no_sliders: StrainSkill,
    pub speed: StrainSkill,
}

impl OsuSkills {
    /// `first_object_time` must already be divided by the clock rate.
    pub fn new(first_object_time: f64) -> Self {
        Self {
            aim: StrainSkill::new(SkillKind::Aim { with_sliders: true }, first_object_time),
            aim_no_sliders: StrainSkill::new(
                SkillKind::Aim {
                    with_sliders: false,
                },
                first_object_time,
            ),
            speed: StrainSkill::new(SkillKind::Speed, first_object_time),
        }
    }

    pub fn process(&mut self, h: &OsuDifficultyObject) {
        self.aim.process(h);
        self.aim_no_sliders.process(h);
        self.speed.process(h);
    }
}
