use strain_pp::{
    model::mode::GameMode, CalculateError, Difficulty, DifficultyAttributes, GameMods,
};

use self::common::*;

mod common;

#[test]
fn deterministic() {
    let map = osu_map(300);
    let difficulty = Difficulty::new().mods(GameMods::HD | GameMods::DT);

    let first = difficulty.calculate(&map).unwrap();
    let second = difficulty.calculate(&map).unwrap();

    assert_eq!(first, second);
}

#[test]
fn mods_affect_stars() {
    let map = osu_map(300);

    let stars = |mods: GameMods| Difficulty::new().mods(mods).calculate(&map).unwrap().stars();

    let nm = stars(GameMods::NM);

    assert!(stars(GameMods::DT) > nm);
    assert!(stars(GameMods::HT) < nm);
    assert!(stars(GameMods::HR) > nm);
    assert!(stars(GameMods::EZ) < nm);

    // hidden has no effect on difficulty
    assert_eq_float(stars(GameMods::HD), nm);
}

#[test]
fn clock_rate_override() {
    let map = osu_map(200);

    let dt = Difficulty::new().mods(GameMods::DT).calculate(&map).unwrap();
    let custom = Difficulty::new().clock_rate(1.5).calculate(&map).unwrap();

    assert_eq_float(dt.stars(), custom.stars());

    assert_eq!(
        Difficulty::new().clock_rate(-1.0).calculate(&map),
        Err(CalculateError::InvalidClockRate(-1.0))
    );
}

#[test]
fn passed_objects_prefix() {
    let map = osu_map(250);

    let partial = Difficulty::new().passed_objects(100).calculate(&map).unwrap();
    let full = Difficulty::new().calculate(&map).unwrap();

    assert_eq!(partial.n_objects(), 100);
    assert!(partial.max_combo() < full.max_combo());

    // passing more objects than the map has is the same as a full calculation
    let over = Difficulty::new().passed_objects(1000).calculate(&map).unwrap();
    assert_eq!(over, full);
}

#[test]
fn taiko_attributes() {
    let map = taiko_map(320);
    let attrs = Difficulty::new().calculate(&map).unwrap();

    let DifficultyAttributes::Taiko(attrs) = attrs else {
        panic!("expected taiko attributes");
    };

    assert_eq!(attrs.n_non_hits, 320 / 16);
    assert_eq!(attrs.max_combo, 320 - 320 / 16);
    assert!(attrs.stars > 0.0);
    assert!(!attrs.is_convert);
}

#[test]
fn mode_tag() {
    let osu = Difficulty::new().calculate(&osu_map(10)).unwrap();
    let taiko = Difficulty::new().calculate(&taiko_map(10)).unwrap();

    assert_eq!(osu.mode(), GameMode::Osu);
    assert_eq!(taiko.mode(), GameMode::Taiko);
}

#[test]
fn strains_plot_sections() {
    let map = osu_map(100);
    let strains = Difficulty::new().strains(&map).unwrap();

    assert_eq_float(strains.section_len(), 400.0);

    let taiko = Difficulty::new().strains(&taiko_map(100)).unwrap();
    assert_eq_float(taiko.section_len(), 400.0);
}
