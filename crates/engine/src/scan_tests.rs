// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cw_core::{ClaimEntry, ClaimType};
use tempfile::tempdir;
use tokio::sync::mpsc::UnboundedReceiver;

const SHUFFLE: &str = "1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8";

fn game(white: &str, black: &str, board: &str, result: &str, moves: &str) -> String {
    format!(
        "[White \"{white}\"]\n[Black \"{black}\"]\n[Board \"{board}\"]\n[Result \"{result}\"]\n\n{moves} {result}\n\n"
    )
}

fn reader(pgn: &str) -> GameReader<&[u8]> {
    GameReader::new(pgn.as_bytes())
}

fn claims(rx: &mut UnboundedReceiver<PipelineEvent>) -> Vec<ClaimEntry> {
    drain(rx)
        .into_iter()
        .filter_map(|event| match event {
            PipelineEvent::Claim(entry) => Some(entry),
            _ => None,
        })
        .collect()
}

fn drain(rx: &mut UnboundedReceiver<PipelineEvent>) -> Vec<PipelineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn new_lock() -> CombinedLock {
    Arc::new(tokio::sync::Mutex::new(()))
}

#[test]
fn pass_streams_claims_in_file_order() {
    let pgn = [
        game("A", "B", "1", "*", SHUFFLE),
        game("C", "D", "2", "*", "1. e4 e5"),
        game("E", "F", "3", "*", SHUFFLE),
    ]
    .concat();
    let mut registry = ClaimRegistry::new();
    let (events, mut rx) = EventSender::channel();
    let stop = CancellationToken::new();

    let summary = ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));

    assert_eq!(summary.games, 3);
    assert_eq!(summary.checked, 3);
    assert_eq!(summary.claims, 2);
    assert_eq!(
        claims(&mut rx),
        vec![
            ClaimEntry::new(ClaimType::ThreefoldRepetition, "1", "A - B", "4...Ng8"),
            ClaimEntry::new(ClaimType::ThreefoldRepetition, "3", "E - F", "4...Ng8"),
        ]
    );
}

#[test]
fn suppressed_pair_is_not_checked() {
    let pgn = game("A", "B", "1", "*", SHUFFLE);
    let mut registry = ClaimRegistry::new();
    registry.suppress("A - B");
    let (events, mut rx) = EventSender::channel();
    let stop = CancellationToken::new();

    let summary = ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));

    assert_eq!(summary.skipped_suppressed, 1);
    assert_eq!(summary.checked, 0);
    assert_eq!(registry.reported_count(), 0);
    assert!(claims(&mut rx).is_empty());
}

#[test]
fn live_only_skips_finished_games() {
    let pgn = [
        game("A", "B", "1", "1-0", SHUFFLE),
        game("C", "D", "2", "*", SHUFFLE),
    ]
    .concat();
    let mut registry = ClaimRegistry::new();
    let (events, mut rx) = EventSender::channel();
    let stop = CancellationToken::new();

    let summary = ScanPass::new(&mut registry, &events, true, &stop).run(reader(&pgn));

    assert_eq!(summary.skipped_live, 1);
    assert_eq!(summary.checked, 1);
    assert!(!registry.is_suppressed("A - B"));
    let found = claims(&mut rx);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].players, "C - D");
}

#[test]
fn finished_games_are_checked_without_live_only() {
    let pgn = game("A", "B", "1", "1/2-1/2", SHUFFLE);
    let mut registry = ClaimRegistry::new();
    let (events, _rx) = EventSender::channel();
    let stop = CancellationToken::new();

    let summary = ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));

    assert_eq!(summary.claims, 1);
}

#[test]
fn second_pass_reports_nothing_new() {
    let pgn = game("A", "B", "1", "*", SHUFFLE);
    let mut registry = ClaimRegistry::new();
    let (events, mut rx) = EventSender::channel();
    let stop = CancellationToken::new();

    ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));
    drain(&mut rx);
    let summary = ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));

    assert_eq!(summary.checked, 1);
    assert_eq!(summary.claims, 0);
    assert!(claims(&mut rx).is_empty());
}

#[test]
fn stop_signal_ends_pass_before_next_game() {
    let pgn = game("A", "B", "1", "*", SHUFFLE);
    let mut registry = ClaimRegistry::new();
    let (events, _rx) = EventSender::channel();
    let stop = CancellationToken::new();
    stop.cancel();

    let summary = ScanPass::new(&mut registry, &events, false, &stop).run(reader(&pgn));

    assert!(summary.cancelled);
    assert_eq!(summary.games, 0);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn poll_runs_only_when_file_changes() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    let (events, mut rx) = EventSender::channel();
    let mut scanner = ScanScheduler::new(
        combined.clone(),
        new_lock(),
        ClaimRegistry::new(),
        Arc::new(AtomicBool::new(false)),
        events,
    );
    let stop = CancellationToken::new();

    // Missing file
    assert!(scanner.poll(&stop).await.unwrap().is_none());

    let pgn = game("A", "B", "1", "*", SHUFFLE);
    std::fs::write(&combined, &pgn).unwrap();
    let summary = scanner.poll(&stop).await.unwrap().unwrap();
    assert_eq!(summary.claims, 1);
    assert_eq!(scanner.last_size(), pgn.len() as u64);
    assert_eq!(scanner.state(), ScanState::Idle);

    let events = drain(&mut rx);
    assert_eq!(events.first(), Some(&PipelineEvent::Scan(Status::Active)));
    assert!(matches!(events[1], PipelineEvent::Claim(_)));
    assert_eq!(events.last(), Some(&PipelineEvent::Scan(Status::Wait)));

    // Unchanged
    assert!(scanner.poll(&stop).await.unwrap().is_none());
    assert!(drain(&mut rx).is_empty());

    // Grown
    let grown = [pgn.clone(), game("C", "D", "2", "*", "1. e4 e5")].concat();
    std::fs::write(&combined, &grown).unwrap();
    let summary = scanner.poll(&stop).await.unwrap().unwrap();
    assert_eq!(summary.games, 2);
    assert_eq!(summary.claims, 0);
}

#[tokio::test]
async fn empty_file_is_not_scanned() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    std::fs::write(&combined, "").unwrap();
    let (events, _rx) = EventSender::channel();
    let mut scanner = ScanScheduler::new(
        combined,
        new_lock(),
        ClaimRegistry::new(),
        Arc::new(AtomicBool::new(false)),
        events,
    );

    assert!(scanner.poll(&CancellationToken::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn live_only_flag_is_read_per_pass() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    let live_only = Arc::new(AtomicBool::new(true));
    let (events, _rx) = EventSender::channel();
    let mut scanner = ScanScheduler::new(
        combined.clone(),
        new_lock(),
        ClaimRegistry::new(),
        live_only.clone(),
        events,
    );
    let stop = CancellationToken::new();

    std::fs::write(&combined, game("A", "B", "1", "1-0", SHUFFLE)).unwrap();
    let summary = scanner.poll(&stop).await.unwrap().unwrap();
    assert_eq!(summary.skipped_live, 1);

    live_only.store(false, Ordering::Relaxed);
    std::fs::write(&combined, game("A", "B", "1", "1-0", "1. Nf3 Nf6 2. Ng1 Ng8 3. Nf3 Nf6 4. Ng1 Ng8 5. e4")).unwrap();
    let summary = scanner.poll(&stop).await.unwrap().unwrap();
    assert_eq!(summary.checked, 1);
    assert_eq!(summary.claims, 1);
}

#[tokio::test]
async fn pass_waits_for_lock() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    std::fs::write(&combined, game("A", "B", "1", "*", SHUFFLE)).unwrap();
    let lock = new_lock();
    let (events, mut rx) = EventSender::channel();
    let mut scanner = ScanScheduler::new(
        combined,
        lock.clone(),
        ClaimRegistry::new(),
        Arc::new(AtomicBool::new(false)),
        events,
    );

    let guard = lock.lock().await;
    let handle = tokio::spawn(async move {
        let summary = scanner.poll(&CancellationToken::new()).await;
        (scanner, summary)
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(claims(&mut rx).is_empty());

    drop(guard);
    let (scanner, summary) = handle.await.unwrap();
    assert_eq!(summary.unwrap().unwrap().claims, 1);
    assert_eq!(scanner.registry().reported_count(), 1);
}

#[tokio::test]
async fn run_returns_scheduler_with_registry() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    std::fs::write(&combined, game("A", "B", "1", "*", SHUFFLE)).unwrap();
    let (events, mut rx) = EventSender::channel();
    let scanner = ScanScheduler::new(
        combined,
        new_lock(),
        ClaimRegistry::new(),
        Arc::new(AtomicBool::new(false)),
        events,
    )
    .with_timing(Duration::from_millis(10), Duration::ZERO);
    let stop = CancellationToken::new();
    let handle = tokio::spawn(scanner.run(stop.clone()));

    tokio::time::sleep(Duration::from_millis(200)).await;
    stop.cancel();
    let scanner = handle.await.unwrap();

    assert_eq!(scanner.state(), ScanState::Stopped);
    assert_eq!(scanner.registry().reported_count(), 1);
    assert_eq!(claims(&mut rx).len(), 1);
}

#[tokio::test]
async fn cancel_during_start_delay_skips_scanning() {
    let dir = tempdir().unwrap();
    let combined = dir.path().join("games.pgn");
    std::fs::write(&combined, game("A", "B", "1", "*", SHUFFLE)).unwrap();
    let (events, mut rx) = EventSender::channel();
    let scanner = ScanScheduler::new(
        combined,
        new_lock(),
        ClaimRegistry::new(),
        Arc::new(AtomicBool::new(false)),
        events,
    )
    .with_timing(Duration::from_secs(4), Duration::from_secs(60));
    let stop = CancellationToken::new();
    let handle = tokio::spawn(scanner.run(stop.clone()));

    stop.cancel();
    let scanner = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();

    assert!(scanner.registry().is_empty());
    assert!(drain(&mut rx).is_empty());
}
