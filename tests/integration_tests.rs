//! Integration tests for the season ladder
//!
//! These tests run the whole pipeline together:
//! - Match log parsing and appending
//! - Week partitioning and cumulative snapshots
//! - Ranking, scoreboards and chart series on disk
//! - The HTTP front end on top of a file-backed store

mod fixtures;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use season_ladder::ranking::{chart_series, rank, render_scoreboard, WeeklyChart};
use season_ladder::rating::EloCalculator;
use season_ladder::season::{partition, StatsAggregator};
use season_ladder::service::{router, RecordMatchRequest};
use season_ladder::store::{CsvMatchStore, InMemoryMatchStore, MatchStore};
use std::sync::Arc;
use tower::ServiceExt;

use fixtures::{app_state, game, sample_log, sample_season, test_config, ScratchDir};

fn aggregator() -> StatsAggregator {
    StatsAggregator::new(Arc::new(EloCalculator::default()))
}

#[test]
fn test_single_match_season() {
    let snapshots = aggregator().aggregate_matches(&[game("alice", "bob", 1, 0)]);

    assert_eq!(snapshots.len(), 1);
    let week0 = &snapshots[0];
    assert_eq!(week0.player_ratings["alice"], 1016.0);
    assert_eq!(week0.player_ratings["bob"], 984.0);
    assert_eq!(week0.player_stats["alice"].won, 1);
    assert_eq!(week0.player_stats["bob"].lost, 1);
}

#[test]
fn test_full_season_replay() {
    let matches = sample_season();
    let weeks = partition(&matches);
    assert_eq!(weeks.len(), 3);
    assert!(weeks[1].is_empty());

    let snapshots = aggregator().aggregate(&weeks);
    assert_eq!(snapshots.len(), 3);

    // The idle week carries the previous week forward unchanged
    assert_eq!(snapshots[1].player_ratings, snapshots[0].player_ratings);
    assert_eq!(snapshots[1].player_stats, snapshots[0].player_stats);

    let week0 = rank(&snapshots[0]).unwrap();
    let order: Vec<&str> = week0.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(order, vec!["alice", "bob", "dave", "carol"]);

    let final_week = rank(&snapshots[2]).unwrap();
    let order: Vec<&str> = final_week.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(order, vec!["dave", "alice", "carol", "bob"]);
    assert!((final_week[0].score - 1016.0).abs() < 1e-9);
    assert!((final_week[3].score - 984.0).abs() < 1e-9);

    // Elo is zero-sum across the whole ladder
    let total: f64 = snapshots[2].player_ratings.values().sum();
    assert!((total - 4000.0).abs() < 1e-9);

    let dave = &final_week[0];
    assert_eq!((dave.won, dave.lost, dave.total), (2, 1, 3));
    let carol = &final_week[2];
    assert_eq!((carol.won, carol.lost, carol.total), (1, 2, 3));
}

#[test]
fn test_scoreboard_for_final_week() {
    let snapshots = aggregator().aggregate_matches(&sample_season());
    let board = render_scoreboard(&rank(&snapshots[2]).unwrap());

    let lines: Vec<&str> = board.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "pos   name            score     won    lost   total"
    );
    assert_eq!(
        lines[1],
        "  1   dave             1016       2       1       3"
    );
    assert_eq!(
        lines[4],
        "  4   bob               984       1       2       3"
    );
}

#[test]
fn test_chart_follows_final_top_players() {
    let snapshots = aggregator().aggregate_matches(&sample_season());
    let chart = chart_series(&snapshots, 2).unwrap();

    assert_eq!(chart.week, 2);
    let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["dave", "alice"]);
    assert_eq!(chart.series[0].points.len(), 3);
    let (week, rating) = chart.series[0].points[2];
    assert_eq!(week, 2);
    assert!((rating - 1016.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_csv_log_drives_reports() {
    let scratch = ScratchDir::new("reports");
    let config = test_config(&scratch);
    std::fs::write(&config.storage.matches_file, sample_log()).unwrap();

    let store = Arc::new(CsvMatchStore::new(config.storage.matches_file.clone()));
    let state = app_state(config.clone(), store);

    let summary = state.generate_reports().await.unwrap();
    assert_eq!(summary.matches, 6);
    assert_eq!(summary.weeks, 3);
    assert_eq!(summary.players, 4);

    let output = &config.report.output_dir;
    let board = std::fs::read_to_string(output.join("week-2-scoreboard.txt")).unwrap();
    assert!(board.lines().nth(1).unwrap().contains("dave"));

    let chart: WeeklyChart =
        serde_json::from_slice(&std::fs::read(output.join("week-1-plot.json")).unwrap()).unwrap();
    assert_eq!(chart.week, 1);
    assert_eq!(chart.series.len(), 4);
    for series in &chart.series {
        assert_eq!(series.points.len(), 2);
    }
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let scratch = ScratchDir::new("malformed");
    let path = scratch.join("matches.csv");
    std::fs::write(&path, "alice,bob,1,0\nnot a match\n\nbob,alice,2,1,extra\n").unwrap();

    let matches = CsvMatchStore::new(&path).load().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].player1(), "alice");
}

#[tokio::test]
async fn test_invalid_winner_fails_load() {
    let scratch = ScratchDir::new("invalid");
    let path = scratch.join("matches.csv");
    std::fs::write(&path, "alice,bob,1,0\nalice,bob,3,2\n").unwrap();

    let err = CsvMatchStore::new(&path).load().await.unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[tokio::test]
async fn test_recorded_matches_survive_restart() {
    let scratch = ScratchDir::new("restart");
    let config = test_config(&scratch);

    {
        let store = Arc::new(CsvMatchStore::new(config.storage.matches_file.clone()));
        let state = app_state(config.clone(), store);
        for (p1, p2, winner, day) in [("Alice", "Bob", 1, 0), ("bob", "CAROL", 2, 8)] {
            let request = RecordMatchRequest {
                player1: p1.to_string(),
                player2: p2.to_string(),
                winner,
            };
            state.record_match_on(request, day).await.unwrap();
        }
    }

    let log = std::fs::read_to_string(&config.storage.matches_file).unwrap();
    assert_eq!(log, "alice,bob,1,0\nbob,carol,2,8\n");

    let store = Arc::new(CsvMatchStore::new(config.storage.matches_file.clone()));
    let report = app_state(config, store).compute_season().await.unwrap();
    assert_eq!(report.matches, 2);
    assert_eq!(report.weeks(), 2);

    let ranking = report.latest_ranking().unwrap();
    let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "carol", "bob"]);
}

#[tokio::test]
async fn test_names_that_would_split_a_log_line_are_refused() {
    let scratch = ScratchDir::new("separators");
    let config = test_config(&scratch);
    let store = Arc::new(CsvMatchStore::new(config.storage.matches_file.clone()));
    let state = app_state(config.clone(), store.clone());

    state
        .record_match_on(
            RecordMatchRequest {
                player1: "alice".to_string(),
                player2: "bob".to_string(),
                winner: 1,
            },
            0,
        )
        .await
        .unwrap();

    for name in ["smith, john", "eve\nmallory,carol,2,0\nx"] {
        let request = RecordMatchRequest {
            player1: name.to_string(),
            player2: "bob".to_string(),
            winner: 1,
        };
        assert!(state.record_match_on(request, 1).await.is_err());
    }

    let log = std::fs::read_to_string(&config.storage.matches_file).unwrap();
    assert_eq!(log, "alice,bob,1,0\n");

    let matches = store.load().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].player2(), "bob");
}

#[tokio::test]
async fn test_http_record_then_read_standings() {
    let scratch = ScratchDir::new("http");
    let config = test_config(&scratch);
    let store = Arc::new(InMemoryMatchStore::new());
    let app = router(app_state(config, store.clone()));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/match")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("player1=Alice&player2=Bob&winner=2"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(store.len().await, 1);

    let response = app
        .oneshot(Request::builder().uri("/standings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let ranking = body["ranking"].as_array().unwrap();
    assert_eq!(ranking[0]["name"], "bob");
    assert_eq!(ranking[0]["won"], 1);
    assert_eq!(ranking[1]["name"], "alice");
}
