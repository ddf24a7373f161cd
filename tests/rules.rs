//! Options, set rule, and result tests.

use std::time::Duration;

use setrs::{Card, ConfigError, FeatureOracle, GameOptions, Oracle, full_deck, winners};

fn cards(ids: &[u16]) -> Vec<Card> {
    ids.iter().copied().map(Card::new).collect()
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_human_players(1)
        .with_computer_players(3)
        .with_table_size(9)
        .with_deck_size(27)
        .with_feature_size(3)
        .with_feature_count(3)
        .with_round_duration(Duration::from_secs(30))
        .with_warning_threshold(Duration::from_secs(3))
        .with_point_freeze(Duration::from_millis(500))
        .with_penalty_freeze(Duration::from_secs(2))
        .with_input_capacity(5)
        .with_hints(true)
        .with_ticks(Duration::from_millis(200), Duration::from_millis(5));

    assert_eq!(options.players(), 4);
    assert!(options.is_human(0));
    assert!(!options.is_human(1));
    assert_eq!(options.table_size, 9);
    assert_eq!(options.deck_size, 27);
    assert_eq!(options.feature_count, 3);
    assert_eq!(options.round_duration, Duration::from_secs(30));
    assert_eq!(options.warning_threshold, Duration::from_secs(3));
    assert_eq!(options.point_freeze, Duration::from_millis(500));
    assert_eq!(options.penalty_freeze, Duration::from_secs(2));
    assert_eq!(options.input_capacity, 5);
    assert!(options.hints);
    assert_eq!(options.idle_tick, Duration::from_millis(200));
    assert_eq!(options.warning_tick, Duration::from_millis(5));
    assert_eq!(options.validate(), Ok(()));
}

#[test]
fn options_validation() {
    let base = GameOptions::default();
    assert_eq!(base.validate(), Ok(()));

    assert_eq!(
        base.clone().with_computer_players(0).validate(),
        Err(ConfigError::NoPlayers)
    );
    assert_eq!(
        base.clone().with_computer_players(65).validate(),
        Err(ConfigError::TooManyPlayers { count: 65, max: 64 })
    );
    assert_eq!(
        base.clone().with_feature_size(1).validate(),
        Err(ConfigError::FeatureSizeTooSmall(1))
    );
    assert_eq!(
        base.clone().with_table_size(2).validate(),
        Err(ConfigError::TableTooSmall {
            table_size: 2,
            feature_size: 3
        })
    );
    assert_eq!(
        base.clone().with_deck_size(82).validate(),
        Err(ConfigError::DeckTooLarge {
            deck_size: 82,
            max: 81
        })
    );
    assert_eq!(
        base.clone()
            .with_round_duration(Duration::ZERO)
            .validate(),
        Err(ConfigError::ZeroRoundDuration)
    );
    assert_eq!(
        base.clone().with_input_capacity(0).validate(),
        Err(ConfigError::ZeroInputCapacity)
    );
    assert_eq!(
        base.clone()
            .with_ticks(Duration::ZERO, Duration::from_millis(10))
            .validate(),
        Err(ConfigError::ZeroTick)
    );
    assert_eq!(
        base.with_ticks(Duration::from_secs(1), Duration::ZERO)
            .validate(),
        Err(ConfigError::ZeroTick)
    );
}

#[test]
fn features_are_base_digits() {
    // 50 = 1*27 + 2*9 + 1*3 + 2
    let card = Card::new(50);
    assert_eq!(card.feature(0, 3), 2);
    assert_eq!(card.feature(1, 3), 1);
    assert_eq!(card.feature(2, 3), 2);
    assert_eq!(card.feature(3, 3), 1);
}

#[test]
fn oracle_accepts_all_same_or_all_different() {
    let oracle = FeatureOracle::new(3, 4);

    assert!(oracle.is_set(&cards(&[0, 1, 2])));
    assert!(oracle.is_set(&cards(&[0, 3, 6])));
    assert!(oracle.is_set(&cards(&[0, 40, 80])));
    assert!(!oracle.is_set(&cards(&[0, 1, 3])));
    assert!(!oracle.is_set(&cards(&[0, 1])));
    assert!(!oracle.is_set(&cards(&[0, 0, 0])));
    assert!(!oracle.is_set(&cards(&[0, 1, 2, 3])));
}

#[test]
fn oracle_counts_sets() {
    let oracle = FeatureOracle::new(3, 2);
    let grid = full_deck(9);
    assert_eq!(oracle.count_sets(&grid), 12);
    assert_eq!(oracle.find_sets(&grid, 2).len(), 2);
    assert!(oracle.has_set(&grid));
    assert!(!oracle.has_set(&cards(&[0, 1, 3, 4])));

    let full = FeatureOracle::new(3, 4);
    assert_eq!(full.count_sets(&full_deck(81)), 1080);
}

#[test]
fn winners_keep_ties() {
    assert_eq!(winners(&[3, 5, 5]), vec![1, 2]);
    assert_eq!(winners(&[0, 0]), vec![0, 1]);
    assert_eq!(winners(&[4]), vec![0]);
    assert!(winners(&[]).is_empty());
}
