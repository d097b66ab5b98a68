#![allow(unused)]

use strain_pp::{
    model::{
        hit_object::{HitObject, HitSoundType, Pos, Slider},
        mode::GameMode,
    },
    Beatmap,
};

/// An osu!standard map with jumps, sliders, and a spinner.
pub fn osu_map(n_objects: u32) -> Beatmap {
    let hit_objects = (0..n_objects)
        .map(|i| {
            let start_time = 1500.0 + f64::from(i) * 190.0;
            let pos = Pos::new(40.0 + (i % 6) as f32 * 85.0, 50.0 + (i % 4) as f32 * 95.0);

            match i % 25 {
                24 => HitObject::spinner(Pos::new(256.0, 192.0), start_time, 150.0),
                n if n % 6 == 3 => HitObject::slider(
                    pos,
                    start_time,
                    Slider {
                        pixel_len: 130.0,
                        repeats: usize::from(n % 4 == 1),
                        end_pos: Pos::new(pos.x, pos.y + 130.0),
                        duration: 160.0,
                        velocity: 1.0,
                    },
                ),
                _ => HitObject::circle(pos, start_time),
            }
        })
        .collect();

    Beatmap {
        od: 8.0,
        ar: Some(9.0),
        cs: 4.0,
        hp: 6.0,
        hit_objects,
        ..Default::default()
    }
}

/// An osu!standard map consisting only of circles.
pub fn osu_circles(n_objects: u32) -> Beatmap {
    let hit_objects = (0..n_objects)
        .map(|i| {
            let pos = Pos::new(64.0 + (i % 5) as f32 * 96.0, 96.0 + (i % 3) as f32 * 96.0);

            HitObject::circle(pos, 1000.0 + f64::from(i) * 200.0)
        })
        .collect();

    Beatmap {
        hit_objects,
        ..Default::default()
    }
}

/// An osu!taiko map with centers, rims, and the occasional drumroll.
pub fn taiko_map(n_objects: u32) -> Beatmap {
    let hit_objects = (0..n_objects)
        .map(|i| {
            let start_time = 900.0 + f64::from(i) * 145.0;

            match i % 16 {
                15 => HitObject::hold(Pos::default(), start_time, 100.0),
                1 | 4 | 5 | 9 | 12 => HitObject::circle(Pos::default(), start_time)
                    .with_sound(rim()),
                _ => HitObject::circle(Pos::default(), start_time),
            }
        })
        .collect();

    Beatmap {
        mode: GameMode::Taiko,
        od: 6.0,
        hp: 5.0,
        hit_objects,
        ..Default::default()
    }
}

/// Hitsound marking an osu!taiko circle as rim.
pub fn rim() -> HitSoundType {
    "8".parse().unwrap()
}

#[track_caller]
pub fn assert_eq_float(a: f64, b: f64) {
    assert!((a - b).abs() < f64::EPSILON, "{a} != {b}")
}

#[track_caller]
pub fn assert_finite_non_negative(value: f64) {
    assert!(value.is_finite(), "{value} is not finite");
    assert!(value >= 0.0, "{value} is negative");
}
