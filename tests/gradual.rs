use strain_pp::{
    model::mode::GameMode, Beatmap, Difficulty, GameMods, GradualDifficulty, GradualPerformance,
    Performance, PerformanceSettings, ScoreState,
};

use self::common::*;

mod common;

#[test]
fn empty_map() {
    for mode in [GameMode::Osu, GameMode::Taiko] {
        let map = Beatmap {
            mode,
            ..Default::default()
        };

        let mut difficulty = GradualDifficulty::new(Difficulty::new(), &map).unwrap();
        let mut performance = GradualPerformance::new(Difficulty::new(), &map).unwrap();

        assert!(difficulty.next().is_none());
        assert!(performance.next(ScoreState::new()).is_none());
    }
}

#[test]
fn difficulty_prefixes() {
    for map in [osu_map(60), taiko_map(60)] {
        let settings = Difficulty::new().mods(GameMods::HR | GameMods::DT);
        let gradual = GradualDifficulty::new(settings.clone(), &map).unwrap();

        for (i, attrs) in gradual.enumerate() {
            let expected = settings
                .clone()
                .passed_objects(i as u32 + 1)
                .calculate(&map)
                .unwrap();

            assert_eq!(attrs, expected, "mode={:?} i={i}", map.mode);
        }
    }
}

#[test]
fn performance_end_eq_regular() {
    for map in [osu_map(80), taiko_map(80)] {
        let difficulty = Difficulty::new().mods(GameMods::HD);
        let attrs = difficulty.calculate(&map).unwrap();

        let state = ScoreState {
            max_combo: attrs.max_combo(),
            n300: attrs.n_objects(),
            ..Default::default()
        };

        let mut gradual = GradualPerformance::new(difficulty.clone(), &map).unwrap();
        let gradual_end = gradual.last(state).unwrap();

        let settings = PerformanceSettings::new().difficulty(difficulty).state(state);
        let regular = Performance::new(&map).calculate(&settings).unwrap();

        assert_eq!(gradual_end, regular);
        assert!(gradual.next(state).is_none());
    }
}

#[test]
fn performance_nth() {
    let map = osu_map(45);
    let difficulty = Difficulty::new().mods(GameMods::DT);

    let mut gradual = GradualPerformance::new(difficulty.clone(), &map).unwrap();
    let mut gradual_3rd = GradualPerformance::new(difficulty, &map).unwrap();

    let mut state = ScoreState::new();

    for i in 1..=map.hit_objects.len() {
        state.n300 += 1;
        state.max_combo += 1;

        let next = gradual.next(state).unwrap();

        if i % 3 == 0 {
            assert_eq!(gradual_3rd.nth(state, 2), Some(next), "i={i}");
        }
    }

    assert_eq!(gradual.len(), 0);
    assert_eq!(gradual_3rd.len(), 0);
}

#[test]
fn counterfactual_accuracies() {
    let map = taiko_map(150);
    let mut gradual = GradualPerformance::new(Difficulty::new(), &map).unwrap();

    let state = ScoreState {
        max_combo: 20,
        n300: 18,
        n100: 2,
        misses: 1,
        ..Default::default()
    };

    gradual.nth(state, 20).unwrap();

    let accs = [90.0, 95.0, 100.0];
    let batch = gradual.accuracies(state, &accs).unwrap();

    assert_eq!(batch.len(), accs.len());
    assert!(batch.windows(2).all(|pair| pair[0].pp() <= pair[1].pp()));

    for (attrs, acc) in batch.iter().zip(accs) {
        let settings = PerformanceSettings::new()
            .combo(state.max_combo)
            .misses(state.misses)
            .accuracy(acc);

        let expected = Performance::new(&map).calculate(&settings).unwrap();

        assert_eq!(*attrs, expected, "acc={acc}");
    }

    // the position was not affected
    assert_eq!(gradual.len(), map.hit_objects.len() - 21);
}

#[test]
fn jump_behind() {
    let map = osu_map(50);
    let mut gradual = GradualDifficulty::new(Difficulty::new(), &map).unwrap();

    let at_10 = gradual.jump_to(10).unwrap();
    gradual.jump_to(40).unwrap();

    assert_eq!(gradual.jump_to(10), Some(at_10));
    assert!(gradual.jump_to(50).is_none());
}
