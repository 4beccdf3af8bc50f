//! Integration tests for knight_runtime.
//!
//! Searches are kept short (small epoch caps, few attempts) so every test is
//! bounded whether or not the heuristic finds a tour.

use std::fs;
use std::path::PathBuf;

use knight_relax::domain::RelaxConfig;
use knight_relax::engine::KnightEngine;
use knight_relax::hashing::canonical_hash;
use knight_relax::KnightError;

use knight_runtime::config::load_config;
use knight_runtime::drift::{compare_networks, verify_determinism};
use knight_runtime::replay;
use knight_runtime::session::SolveSession;

fn short_config(seed: u64) -> RelaxConfig {
    RelaxConfig {
        board_size: 6,
        seed,
        epoch_cap: 40,
        max_attempts: Some(3),
        ..Default::default()
    }
}

/// Create a temp directory for a test.
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("knight_runtime_tests")
        .join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

// ─────────────────────────────────────────────────────────────
// Test 1: replay_is_deterministic
// ─────────────────────────────────────────────────────────────

#[test]
fn replay_is_deterministic() {
    let config = short_config(42);
    let run1 = replay::rebuild(&config).expect("replay 1");
    let run2 = replay::rebuild(&config).expect("replay 2");
    assert_eq!(run1, run2, "Two replays of the same seed diverged");
    verify_determinism(&config).expect("determinism check");
}

// ─────────────────────────────────────────────────────────────
// Test 2: replay_matches_live_session
// ─────────────────────────────────────────────────────────────

#[test]
fn replay_matches_live_session() {
    let config = short_config(7);
    let mut session = SolveSession::new(config.clone()).expect("session");
    let _ = session.run();
    let hash = replay::rebuild_hash(&config).expect("replay");
    assert_eq!(hash, session.current_hash());
}

// ─────────────────────────────────────────────────────────────
// Test 3: sessions_are_isolated
// ─────────────────────────────────────────────────────────────

#[test]
fn sessions_are_isolated() {
    let mut a = SolveSession::new(short_config(1)).expect("session a");
    let mut b = SolveSession::new(short_config(2)).expect("session b");
    assert_ne!(a.current_hash(), b.current_hash());

    a.run_attempt();
    assert_eq!(a.records().len(), 1);
    assert!(b.records().is_empty());

    // Stepping b does not disturb a.
    let hash_a = a.current_hash();
    b.run_attempt();
    assert_eq!(a.current_hash(), hash_a);
}

// ─────────────────────────────────────────────────────────────
// Test 4: exhausted_budget_is_reported
// ─────────────────────────────────────────────────────────────

#[test]
fn exhausted_budget_is_reported() {
    let mut session = SolveSession::new(short_config(3)).expect("session");
    match session.run() {
        Ok(solution) => {
            assert!(session.records().last().unwrap().accepted);
            assert_eq!(solution.attempts as usize, session.records().len());
        }
        Err(KnightError::AttemptsExhausted { attempts }) => {
            assert_eq!(attempts, 3);
            assert_eq!(session.records().len(), 3);
            assert!(session.records().iter().all(|r| !r.accepted));
        }
        Err(other) => panic!("unexpected error: {}", other),
    }
}

// ─────────────────────────────────────────────────────────────
// Test 5: config_file_drives_session
// ─────────────────────────────────────────────────────────────

#[test]
fn config_file_drives_session() {
    let dir = temp_dir("config_file");
    let path = dir.join("relax.json");
    fs::write(
        &path,
        r#"{"board_size": 8, "seed": 99, "epoch_cap": 5, "max_attempts": 1}"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("load config");
    let session = SolveSession::new(config.clone()).expect("session");
    assert_eq!(session.network().node_count(), 64);

    let engine = KnightEngine::new(config).expect("engine");
    assert_eq!(canonical_hash(engine.network()), session.current_hash());
}

// ─────────────────────────────────────────────────────────────
// Test 6: drift_between_attempts
// ─────────────────────────────────────────────────────────────

#[test]
fn drift_between_attempts() {
    let mut session = SolveSession::new(short_config(11)).expect("session");
    let before = session.network().clone();
    let same = compare_networks(&before, session.network());
    assert!(same.is_identical());

    session.run_attempt();
    let report = compare_networks(&before, session.network());
    assert_eq!(
        report.active_edges_delta,
        report.activated.len() as i64 - report.deactivated.len() as i64
    );
    assert_eq!(report.degree_histogram_delta.iter().sum::<i64>(), 0);
}

// ─────────────────────────────────────────────────────────────
// Test 7: invalid_board_size_rejected
// ─────────────────────────────────────────────────────────────

#[test]
fn invalid_board_size_rejected() {
    let config = RelaxConfig {
        board_size: 5,
        ..Default::default()
    };
    assert!(matches!(
        SolveSession::new(config.clone()),
        Err(KnightError::BoardSizeOutOfRange { size: 5 })
    ));
    assert!(replay::rebuild(&config).is_err());
}
