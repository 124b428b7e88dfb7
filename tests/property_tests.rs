//! Property-based tests: token conservation, deal sizes, scoring bounds.

use proptest::prelude::*;

use dino_draft::bags::bag_quota;
use dino_draft::rules::scoring::{
    DIFFERENT_SPECIES_POINTS, ISLAND_POINTS, KING_POINTS, PAIR_POINTS, SAME_SPECIES_POINTS,
    TRIO_POINTS,
};
use dino_draft::{
    Board, DieFace, EnclosureId, GameOptions, GameRng, GameStateStore, InMemoryStore, RulesConfig,
    PlacementValidator, ScoringEngine, Species, TurnEngine,
};
use rustc_hash::FxHashSet;

/// Strategy: a species.
fn species_strategy() -> impl Strategy<Value = Species> {
    (0..Species::COUNT).prop_map(|i| Species::ALL[i])
}

/// Strategy: a die face or no roll.
fn face_strategy() -> impl Strategy<Value = Option<DieFace>> {
    prop::option::of((0..DieFace::ALL.len()).prop_map(|i| DieFace::ALL[i]))
}

/// Fill a board by dropping each token into the first enclosure that accepts it.
fn build_board(tokens: &[(Species, u8)]) -> Board {
    let config = RulesConfig::default();
    let mut board = Board::new();
    for &(species, preferred) in tokens {
        let enclosure = EnclosureId::new(preferred).unwrap_or(EnclosureId::RIVER);
        if let Some(slot) = board.first_free_slot(enclosure, config.capacity(enclosure)) {
            board.push(enclosure, slot, species);
        }
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Unplayed tokens plus placements always equal seats x 6, through both rounds.
    #[test]
    fn tokens_are_conserved(
        seats in 2..=5usize,
        salt in any::<u64>(),
        choices in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), face_strategy()), 60),
    ) {
        let engine = TurnEngine::new(InMemoryStore::new(), RulesConfig::default());
        let players: Vec<String> = (0..seats).map(|i| format!("p{i}")).collect();
        let game = engine
            .start_game_with(&players, GameOptions::default().with_seed_salt(salt))
            .unwrap();
        let expected = seats * 6;

        for (token_pick, enclosure_pick, face) in choices.iter().take(seats * 12) {
            let view = engine.get_state(game).unwrap();
            let seat = view.active_seat;

            if let Some(face) = face {
                engine.roll_die(game, seat, *face).unwrap();
            }

            let bag = &view.seat(seat).unwrap().bag;
            let token = bag[token_pick.index(bag.len())].id;
            let legal = engine.legal_enclosures(game, seat, token).unwrap();
            prop_assert!(legal.contains(&EnclosureId::RIVER));
            let enclosure = legal[enclosure_pick.index(legal.len())];
            engine.process_turn(game, seat, token, enclosure.raw(), None).unwrap();

            let snapshot = engine.store().load(game).unwrap().unwrap();
            prop_assert_eq!(snapshot.unplayed_total() + snapshot.placements.len(), expected);

            // Bags stay balanced between seats.
            let sizes: FxHashSet<usize> = snapshot.bags.iter().map(|b| b.len()).collect();
            prop_assert!(sizes.len() <= 1);
        }

        let view = engine.get_state(game).unwrap();
        prop_assert!(view.is_completed());
    }

    // Every dealt bag holds exactly tokens_per_bag tokens.
    #[test]
    fn deal_sizes_are_exact(
        seed in any::<u64>(),
        tokens_per_bag in 0..=12usize,
        bags in 1..=8usize,
    ) {
        let mut rng = GameRng::new(seed);
        let mut used = FxHashSet::default();
        for index in 0..bags {
            let (signature, _) = bag_quota(&mut rng, tokens_per_bag, index, &used, 8);
            prop_assert_eq!(signature.iter().sum::<u32>() as usize, tokens_per_bag);
            used.insert(signature);
        }
    }

    // Scores stay within the table maxima.
    #[test]
    fn scores_are_bounded(
        tokens in prop::collection::vec((species_strategy(), 1..=7u8), 0..30),
    ) {
        let board = build_board(&tokens);
        let score = ScoringEngine::score_board(&board);

        prop_assert!(score.enclosure(EnclosureId::SAME_SPECIES) <= SAME_SPECIES_POINTS[6]);
        prop_assert!(score.enclosure(EnclosureId::DIFFERENT_SPECIES) <= DIFFERENT_SPECIES_POINTS[6]);
        prop_assert!(score.enclosure(EnclosureId::PAIRS) <= 3 * PAIR_POINTS);
        prop_assert!(score.enclosure(EnclosureId::TRIO) <= TRIO_POINTS);
        prop_assert!(score.enclosure(EnclosureId::KING) <= KING_POINTS);
        prop_assert!(score.enclosure(EnclosureId::ISLAND) <= ISLAND_POINTS);
        prop_assert_eq!(score.river() as usize, board.count(EnclosureId::RIVER));
        prop_assert!(score.trex_bonus <= score.trex_count);
        prop_assert_eq!(score.total, score.enclosures.iter().sum::<u32>() + score.trex_bonus);
    }

    // The river always accepts a token while it has room.
    #[test]
    fn river_ignores_die(
        tokens in prop::collection::vec((species_strategy(), 1..=6u8), 0..20),
        species in species_strategy(),
        face in face_strategy(),
    ) {
        let config = RulesConfig::default();
        let board = build_board(&tokens);
        let legal = PlacementValidator::new(&config).legal_enclosures(&board, face, species);
        prop_assert!(legal.contains(&EnclosureId::RIVER));
    }
}
