//! Season bootstrap integration tests
//!
//! These tests validate season creation from both seed forms, the seed line
//! grammar operators feed in, and placement behavior on freshly seeded
//! ladders.

use club_ladder::error::{ladder_error_kind, LadderError};
use club_ladder::types::{SeasonSelector, SeedEntry, SeedList};
use club_ladder::utils::parse_seed_lines;

// Import test fixtures
use crate::fixtures::{create_seeded_service, ladder_names_and_ranks};

#[tokio::test]
async fn test_ordered_seeding_assigns_positions() {
    let (service, season_id) = create_seeded_service(2024, &["Alice", "Bob", "Carol"]).await;

    let ladder = ladder_names_and_ranks(&service, season_id).await;
    assert_eq!(
        ladder,
        vec![
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 2),
            ("Carol".to_string(), 3),
        ]
    );

    println!("✅ Ordered seeding assigns positions test passed");
}

#[tokio::test]
async fn test_ordered_seeding_skips_blanks_and_repeats_keeping_gaps() {
    let (service, season_id) =
        create_seeded_service(2024, &["Alice", "  ", "Alice", "Bob"]).await;

    // The blank and the repeat are dropped but their positions are not reused
    let ladder = ladder_names_and_ranks(&service, season_id).await;
    assert_eq!(
        ladder,
        vec![("Alice".to_string(), 1), ("Bob".to_string(), 4)]
    );

    println!("✅ Ordered seeding skips blanks and repeats test passed");
}

#[tokio::test]
async fn test_explicit_seeding_preserves_ties_and_gaps() {
    let (service, _) = create_seeded_service(2023, &[]).await;

    let season_id = service
        .init_season(
            2024,
            SeedList::Explicit {
                entries: vec![
                    SeedEntry::new("Alice", 1),
                    SeedEntry::new("Bob", 3),
                    SeedEntry::new("Carol", 3),
                    SeedEntry::new("Dave", 10),
                ],
            },
        )
        .await
        .unwrap();

    let ladder = ladder_names_and_ranks(&service, season_id).await;
    assert_eq!(
        ladder,
        vec![
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 3),
            ("Carol".to_string(), 3),
            ("Dave".to_string(), 10),
        ]
    );

    println!("✅ Explicit seeding preserves ties and gaps test passed");
}

#[tokio::test]
async fn test_duplicate_year_is_a_conflict_and_leaves_first_season_intact() {
    let (service, season_id) = create_seeded_service(2024, &["Alice", "Bob"]).await;

    let err = service
        .init_season(
            2024,
            SeedList::Ordered {
                names: vec!["Mallory".to_string()],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        ladder_error_kind(&err),
        Some(LadderError::Conflict { .. })
    ));

    // The first season is untouched and Mallory was never registered
    let seasons = service.list_seasons().await.unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].id, season_id);
    assert_eq!(ladder_names_and_ranks(&service, season_id).await.len(), 2);
    assert!(service
        .list_players()
        .await
        .unwrap()
        .iter()
        .all(|p| p.name != "Mallory"));

    println!("✅ Duplicate year conflict test passed");
}

#[tokio::test]
async fn test_non_positive_year_is_rejected() {
    let (service, _) = create_seeded_service(2024, &[]).await;

    let err = service
        .init_season(0, SeedList::Ordered { names: vec![] })
        .await
        .unwrap_err();
    assert!(matches!(
        ladder_error_kind(&err),
        Some(LadderError::Validation { .. })
    ));

    println!("✅ Non-positive year rejected test passed");
}

#[tokio::test]
async fn test_seed_file_grammar_end_to_end() {
    let (service, _) = create_seeded_service(2023, &[]).await;

    // The form operators paste in: bare names ranked by line, explicit
    // "rank,name" lines, blank lines keeping their position
    let text = "Alice\n4,Bob\n\nCarol\n2,Dana Q\n";
    let season_id = service
        .init_season(
            2024,
            SeedList::Explicit {
                entries: parse_seed_lines(text),
            },
        )
        .await
        .unwrap();

    let ladder = ladder_names_and_ranks(&service, season_id).await;
    assert_eq!(
        ladder,
        vec![
            ("Alice".to_string(), 1),
            ("Dana Q".to_string(), 2),
            ("Bob".to_string(), 4),
            ("Carol".to_string(), 4),
        ]
    );

    println!("✅ Seed file grammar end to end test passed");
}

#[tokio::test]
async fn test_placement_rules_on_a_seeded_ladder() {
    let (service, season_id) = create_seeded_service(2024, &["Alice", "Bob"]).await;

    // Default placement goes one below the bottom
    let outcome = service.place_player(season_id, "Carol", None).await.unwrap();
    assert_eq!(outcome.final_rank, 3);
    assert!(!outcome.existed);

    // Explicit rank may tie an existing holder without shifting anyone
    let outcome = service
        .place_player(season_id, "Dave", Some(2))
        .await
        .unwrap();
    assert_eq!(outcome.final_rank, 2);

    // Repeating a placement reports the existing entry and changes nothing
    let repeat = service
        .place_player(season_id, "Dave", Some(1))
        .await
        .unwrap();
    assert!(repeat.existed);
    assert_eq!(repeat.final_rank, 2);
    assert_eq!(repeat.player_id, outcome.player_id);

    let ladder = ladder_names_and_ranks(&service, season_id).await;
    assert_eq!(
        ladder,
        vec![
            ("Alice".to_string(), 1),
            ("Bob".to_string(), 2),
            ("Dave".to_string(), 2),
            ("Carol".to_string(), 3),
        ]
    );

    println!("✅ Placement rules on a seeded ladder test passed");
}

#[tokio::test]
async fn test_players_span_seasons_with_one_identity() {
    let (service, season_2023) = create_seeded_service(2023, &["Alice", "Bob"]).await;
    let season_2024 = service
        .init_season(
            2024,
            SeedList::Ordered {
                names: vec!["Bob".to_string(), "Alice".to_string()],
            },
        )
        .await
        .unwrap();

    // Same two players, independent ladders
    assert_eq!(service.list_players().await.unwrap().len(), 2);
    assert_eq!(
        ladder_names_and_ranks(&service, season_2023).await,
        vec![("Alice".to_string(), 1), ("Bob".to_string(), 2)]
    );
    assert_eq!(
        ladder_names_and_ranks(&service, season_2024).await,
        vec![("Bob".to_string(), 1), ("Alice".to_string(), 2)]
    );

    // Year-based lookup picks the right season
    assert_eq!(
        service
            .resolve_season_id(SeasonSelector::by_year(2023))
            .await
            .unwrap(),
        Some(season_2023)
    );

    println!("✅ Players span seasons with one identity test passed");
}
