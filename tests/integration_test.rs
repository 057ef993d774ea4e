use std::path::PathBuf;

use caliguess::{dataset, session::SubmitOutcome, GameSession, Phase};

fn bundled_dataset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/california_cities.csv")
}

#[test]
fn bundled_dataset_builds_a_catalog() {
    let catalog = dataset::load_catalog(bundled_dataset()).expect("bundled dataset loads");
    assert!(catalog.len() >= 30, "expected a real dataset, got {}", catalog.len());

    let la = catalog.lookup("LOS ANGELES").expect("Los Angeles is present");
    assert_eq!(la.population_total, Some(3990456));
    assert_eq!(la.area_total_sq_mi, Some(468.7));
    assert_eq!(la.coordinates(), Some((34.05, -118.24)));
}

#[test]
fn autocomplete_filters_and_falls_back() {
    let catalog = dataset::load_catalog(bundled_dataset()).expect("bundled dataset loads");

    let san = catalog.names_with_prefix("San ");
    assert!(san.contains(&"San Diego".to_string()));
    assert!(san.iter().all(|name| name.to_lowercase().starts_with("san ")));

    let none = catalog.names_with_prefix("zzz");
    assert_eq!(none.len(), catalog.len(), "no matches must fall back to the full list");
}

#[test]
fn a_seeded_round_plays_to_a_win() {
    let catalog = dataset::load_catalog(bundled_dataset()).expect("bundled dataset loads");
    let mut session = GameSession::new(catalog, 2024);
    let answer = session.answer().name.clone();

    // A couple of scored misses first, like a real player.
    for name in ["Eureka", "Needles"] {
        if name.eq_ignore_ascii_case(&answer) {
            continue;
        }
        let outcome = session.submit_guess(name).expect("round active");
        match outcome {
            SubmitOutcome::Continue { comparison } => {
                assert!(!comparison.is_correct);
                assert!(comparison.distance_miles.is_some());
                assert!(comparison.direction.is_some());
            }
            other => panic!("expected a scored miss for {name}, got {other:?}"),
        }
    }
    let misses = session.guess_count();

    match session.submit_guess(&answer).expect("round active") {
        SubmitOutcome::Win { guess_count, comparison } => {
            assert_eq!(guess_count, misses + 1);
            assert!(comparison.is_correct);
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert_eq!(session.phase(), Phase::Won);
    assert!(session.submit_guess("Fresno").is_err());
}
