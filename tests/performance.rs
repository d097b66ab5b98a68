use strain_pp::{
    model::{
        hit_object::{HitObject, Pos},
        mode::GameMode,
    },
    Beatmap, Difficulty, GameMods, HitResultPriority, Performance, PerformanceAttributes,
    PerformanceSettings,
};

use self::common::*;

mod common;

#[test]
fn five_hundred_objects_at_95() {
    let map = osu_circles(500);
    let settings = PerformanceSettings::new().accuracy(95.0).misses(0);

    let state = Performance::new(&map).generate_state(&settings).unwrap();

    assert_eq!(state.n300 + state.n100 + state.n50, 500);
    assert_eq!(state.misses, 0);
    assert!(state.accuracy(GameMode::Osu) >= 0.95 - 1e-9);

    // as many 300s as possible are turned into 100s without dropping below
    // the accuracy; 50s are only used once no 300s are left
    assert_eq!((state.n300, state.n100, state.n50), (463, 37, 0));

    let first = Performance::new(&map).calculate(&settings).unwrap();
    let second = Performance::new(&map).calculate(&settings).unwrap();

    assert!(first.pp() > 0.0);
    assert!(first.pp().is_finite());
    assert_eq!(first, second);
}

#[test]
fn single_object_hdhr() {
    let map = Beatmap {
        hit_objects: vec![HitObject::circle(Pos::new(256.0, 192.0), 1000.0)],
        ..Default::default()
    };

    let calculate = |mods: GameMods| {
        let settings = PerformanceSettings::new()
            .mods(mods)
            .combo(1)
            .accuracy(100.0);

        Performance::new(&map).calculate(&settings).unwrap()
    };

    let nm = calculate(GameMods::NM);
    let hdhr = calculate(GameMods::HD | GameMods::HR);

    for attrs in [&nm, &hdhr] {
        assert_finite_non_negative(attrs.stars());
        assert_finite_non_negative(attrs.pp());
    }

    assert!(hdhr.pp() > nm.pp());

    let (PerformanceAttributes::Osu(nm), PerformanceAttributes::Osu(hdhr)) = (nm, hdhr) else {
        panic!("expected osu attributes");
    };

    assert!(hdhr.pp_aim > nm.pp_aim);
    assert!(hdhr.pp_acc > nm.pp_acc);
}

#[test]
fn accuracy_monotonic() {
    for map in [osu_map(400), taiko_map(400)] {
        let mut prev = 0.0;

        for acc in [90.0, 92.5, 95.0, 97.5, 100.0] {
            let pp = Performance::new(&map)
                .calculate(&PerformanceSettings::new().accuracy(acc))
                .unwrap()
                .pp();

            assert!(pp >= prev, "mode={:?} acc={acc}", map.mode);
            prev = pp;
        }
    }
}

#[test]
fn accuracy_monotonic_fine_grained() {
    let map = osu_map(400);

    let mod_combinations = [
        GameMods::NM,
        GameMods::DT,
        GameMods::HD | GameMods::FL,
        GameMods::NF | GameMods::SO,
    ];

    for mods in mod_combinations {
        let attrs = Difficulty::new().mods(mods).calculate(&map).unwrap();
        let mut prev = 0.0;

        for step in 0..=200 {
            let acc = 90.0 + f64::from(step) * 0.05;

            let settings = PerformanceSettings::new()
                .mods(mods)
                .accuracy(acc)
                .misses(2);

            let pp = Performance::from_attributes(attrs.clone())
                .calculate(&settings)
                .unwrap()
                .pp();

            assert!(pp >= prev, "mods={mods:?} acc={acc}");
            prev = pp;
        }
    }
}

#[test]
fn misses_monotonic() {
    for map in [osu_map(400), taiko_map(400)] {
        let mut prev = f64::INFINITY;

        for misses in [0, 1, 3, 10, 40] {
            let pp = Performance::new(&map)
                .calculate(&PerformanceSettings::new().accuracy(98.0).misses(misses))
                .unwrap()
                .pp();

            assert!(pp <= prev, "mode={:?} misses={misses}", map.mode);
            prev = pp;
        }
    }
}

#[test]
fn combo_monotonic() {
    let map = osu_map(400);
    let max_combo = Difficulty::new().calculate(&map).unwrap().max_combo();

    let mut prev_aim = 0.0;
    let mut prev_speed = 0.0;

    for combo in [max_combo / 10, max_combo / 3, max_combo / 2, max_combo] {
        let attrs = Performance::new(&map)
            .calculate(&PerformanceSettings::new().combo(combo))
            .unwrap();

        let PerformanceAttributes::Osu(attrs) = attrs else {
            panic!("expected osu attributes");
        };

        assert!(attrs.pp_aim >= prev_aim, "combo={combo}");
        assert!(attrs.pp_speed >= prev_speed, "combo={combo}");

        prev_aim = attrs.pp_aim;
        prev_speed = attrs.pp_speed;
    }
}

#[test]
fn reused_attributes() {
    let map = taiko_map(200);
    let difficulty = Difficulty::new().mods(GameMods::HR);
    let attrs = difficulty.calculate(&map).unwrap();

    let settings = PerformanceSettings::new()
        .difficulty(difficulty)
        .accuracy(97.0)
        .misses(2);

    let from_map = Performance::new(&map).calculate(&settings).unwrap();
    let from_attrs = Performance::from_attributes(attrs.clone())
        .calculate(&settings)
        .unwrap();

    assert_eq!(from_map, from_attrs);
    assert_eq!(from_attrs.difficulty_attributes(), attrs);
}

#[test]
fn hitresult_priorities() {
    let map = osu_map(300);

    let generate = |priority| {
        let settings = PerformanceSettings::new()
            .accuracy(93.0)
            .hitresult_priority(priority);

        Performance::new(&map).generate_state(&settings).unwrap()
    };

    let best = generate(HitResultPriority::BestCase);
    let worst = generate(HitResultPriority::WorstCase);

    assert_eq!(best.total_hits(GameMode::Osu), worst.total_hits(GameMode::Osu));
    assert!(worst.n300 <= best.n300);

    for state in [best, worst] {
        assert!(state.accuracy(GameMode::Osu) >= 0.93 - 1e-9);
    }
}
