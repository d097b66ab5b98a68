use rosu_map::section::hit_objects::hit_samples::HitSoundType;

use crate::model::hit_object::HitObject;

#[derive(Clone, Debug, PartialEq)]
pub struct TaikoObject {
    pub start_time: f64,
    pub hit_type: HitType,
}

impl TaikoObject {
    pub const fn new(h: &HitObject) -> Self {
        Self {
            start_time: h.start_time,
            hit_type: HitType::new(h),
        }
    }

    pub const fn is_hit(&self) -> bool {
        self.hit_type.is_hit()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitType {
    Center,
    Rim,
    /// Drumrolls and swells
    NonHit,
}

impl HitType {
    const fn new(h: &HitObject) -> Self {
        if !h.is_circle() {
            Self::NonHit
        } else if h.sound.has_flag(HitSoundType::CLAP | HitSoundType::WHISTLE) {
            Self::Rim
        } else {
            Self::Center
        }
    }

    pub const fn is_hit(self) -> bool {
        !matches!(self, Self::NonHit)
    }
}

#[cfg(test)]
mod tests {
    use rosu_map::util::Pos;

    use super::*;

    #[test]
    fn hit_types() {
        let center = HitObject::circle(Pos::default(), 0.0);
        let rim = center.clone().with_sound("2".parse().unwrap());
        let clap = center.clone().with_sound("8".parse().unwrap());
        let drumroll = HitObject::hold(Pos::default(), 0.0, 500.0);

        assert_eq!(TaikoObject::new(&center).hit_type, HitType::Center);
        assert_eq!(TaikoObject::new(&rim).hit_type, HitType::Rim);
        assert_eq!(TaikoObject::new(&clap).hit_type, HitType::Rim);
        assert!(!TaikoObject::new(&drumroll).is_hit());
    }
}
