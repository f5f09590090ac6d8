//! End-to-end draw cycles through the public API

use ball_lottery::sim::{AbandonReason, Notice};
use ball_lottery::{DrawPhase, LotteryConfig, LotteryError, LotteryEvent, Session};

const FRAME_MS: f64 = 16.6;

fn session(seed: u64) -> Session {
    Session::with_seed(LotteryConfig::default(), seed).unwrap()
}

/// Tick until the session is Idle again, returning the frames spent
fn run_to_idle(s: &mut Session) -> usize {
    let mut frames = 0;
    while s.phase() != DrawPhase::Idle {
        s.tick(FRAME_MS);
        frames += 1;
        assert!(frames < 10_000, "draw never finished");
    }
    frames
}

fn phase_changes(events: &[LotteryEvent]) -> Vec<DrawPhase> {
    events
        .iter()
        .filter_map(|e| match e {
            LotteryEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

#[test]
fn test_two_participant_walkthrough() {
    let mut s = session(2024);
    let a = s.add_participant("A", 3).unwrap();
    let b = s.add_participant("B", 1).unwrap();
    assert_eq!(s.pool().ball_count(), 4);
    let registered: Vec<_> = s.pool().participants().to_vec();
    s.drain_events();

    s.start_draw().unwrap();
    let frames = run_to_idle(&mut s);
    // ~3s rolling + ~0.5s showcase + 3s reveal at 60 Hz
    assert!((380..=420).contains(&frames), "took {frames} frames");

    let events = s.drain_events();
    assert_eq!(
        phase_changes(&events),
        vec![
            DrawPhase::Rolling,
            DrawPhase::Showcase,
            DrawPhase::Reveal,
            DrawPhase::Idle
        ]
    );
    let revealed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            LotteryEvent::WinnerRevealed(entry) => Some(entry.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(revealed.len(), 1);
    let first = &revealed[0];
    assert_eq!(first.rank, 1);
    let record = registered
        .iter()
        .find(|p| p.id == first.participant)
        .unwrap();
    assert_eq!(first.name, record.name);
    assert_eq!(first.color, record.color);
    assert_eq!(first.weight, record.weight);
    assert_eq!(s.winners().entries[0], *first);

    // Exactly the winner left, with all of its balls
    assert_eq!(s.pool().participant_count(), 1);
    let (expected_left, left_balls) = if first.participant == a { (b, 1) } else { (a, 3) };
    assert_eq!(s.pool().participants()[0].id, expected_left);
    assert_eq!(s.pool().ball_count(), left_balls);
    assert!(s.particles().len() <= s.config().particles.count);

    // Second draw empties the pool
    s.start_draw().unwrap();
    run_to_idle(&mut s);
    assert!(s.pool().is_empty());
    assert_eq!(s.winners().len(), 2);
    assert_eq!(s.frame().notice, Some(Notice::PoolExhausted));
    assert_eq!(s.start_draw(), Err(LotteryError::EmptyPool));
}

#[test]
fn test_reset_neutralises_pending_transition() {
    let mut s = session(5);
    s.add_participant("A", 2).unwrap();
    s.start_draw().unwrap();
    for _ in 0..60 {
        s.tick(FRAME_MS);
    }
    assert_eq!(s.phase(), DrawPhase::Rolling);

    s.reset();
    s.add_participant("B", 4).unwrap();
    s.drain_events();

    // Well past the first round's rolling deadline: nothing fires
    for _ in 0..400 {
        s.tick(FRAME_MS);
    }
    assert_eq!(s.phase(), DrawPhase::Idle);
    assert!(s.drain_events().is_empty());
    assert_eq!(s.pool().ball_count(), 4);
    assert!(s.winners().is_empty());
}

#[test]
fn test_reset_during_reveal() {
    let mut s = session(11);
    s.add_participant("A", 1).unwrap();
    s.add_participant("B", 1).unwrap();
    s.start_draw().unwrap();
    while s.phase() != DrawPhase::Reveal {
        s.tick(FRAME_MS);
    }
    assert!(!s.particles().is_empty());

    s.reset();
    assert_eq!(s.phase(), DrawPhase::Idle);
    assert!(s.pool().is_empty());
    assert!(s.particles().is_empty());
    assert!(s.showcase_ball().is_none());
    assert_eq!(s.frame().notice, Some(Notice::AwaitingEntries));

    // The retire timeout from the old round must not touch the new pool
    s.add_participant("C", 2).unwrap();
    for _ in 0..300 {
        s.tick(FRAME_MS);
    }
    assert_eq!(s.pool().participant_count(), 1);
}

#[test]
fn test_start_rejected_mid_draw_without_side_effects() {
    let mut s = session(8);
    s.add_participant("A", 2).unwrap();
    s.start_draw().unwrap();
    s.tick(FRAME_MS);
    let deadline = s.pending_deadline_ms();
    s.drain_events();

    assert!(matches!(
        s.start_draw(),
        Err(LotteryError::InvalidState {
            phase: DrawPhase::Rolling
        })
    ));
    assert_eq!(s.pending_deadline_ms(), deadline);
    assert!(s.drain_events().is_empty());
}

#[test]
fn test_everyone_removed_while_rolling() {
    let mut s = session(13);
    let a = s.add_participant("A", 2).unwrap();
    s.start_draw().unwrap();
    s.tick(FRAME_MS);
    s.remove_participant(a);

    run_to_idle(&mut s);
    let events = s.drain_events();
    assert!(events.contains(&LotteryEvent::DrawAbandoned {
        reason: AbandonReason::PoolEmptied
    }));
    assert!(s.winners().is_empty());
}

#[test]
fn test_elimination_order_covers_everyone() {
    let mut s = session(99);
    for (name, weight) in [("A", 5), ("B", 1), ("C", 2), ("D", 1)] {
        s.add_participant(name, weight).unwrap();
    }
    while !s.pool().is_empty() {
        s.start_draw().unwrap();
        run_to_idle(&mut s);
    }

    let mut names: Vec<_> = s.winners().entries.iter().map(|w| w.name.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    let ranks: Vec<_> = s.winners().entries.iter().map(|w| w.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn test_ids_stay_unique_across_reset() {
    let mut s = session(21);
    let alice = s.add_participant("Alice", 2).unwrap();
    s.reset();
    let bob = s.add_participant("Bob", 3).unwrap();

    assert_ne!(bob, alice);
    // A handle from before the reset must not reach the new participant
    assert!(!s.remove_participant(alice));
    assert_eq!(s.pool().participant_count(), 1);
    assert_eq!(s.pool().ball_count(), 3);
    assert_eq!(s.pool().participants()[0].name, "Bob");
}

#[test]
fn test_reset_during_showcase() {
    let mut s = session(17);
    s.add_participant("A", 2).unwrap();
    s.add_participant("B", 1).unwrap();
    s.start_draw().unwrap();
    while s.phase() != DrawPhase::Showcase {
        s.tick(FRAME_MS);
    }

    s.reset();
    s.add_participant("C", 3).unwrap();
    s.drain_events();

    // Long enough for the old showcase, reveal and retirement to have fired
    for _ in 0..500 {
        s.tick(FRAME_MS);
    }
    let events = s.drain_events();
    assert!(!events
        .iter()
        .any(|e| matches!(e, LotteryEvent::WinnerRevealed(_))));
    assert!(events.is_empty());
    assert!(s.winners().is_empty());
    assert_eq!(s.phase(), DrawPhase::Idle);
    assert_eq!(s.pool().participant_count(), 1);
    assert_eq!(s.pool().ball_count(), 3);
}

#[test]
fn test_winner_removed_during_reveal() {
    let mut s = session(31);
    s.add_participant("A", 2).unwrap();
    s.add_participant("B", 2).unwrap();
    s.start_draw().unwrap();
    while s.phase() != DrawPhase::Reveal {
        s.tick(FRAME_MS);
    }

    let winner = s.showcase_ball().unwrap().owner;
    assert!(s.remove_participant(winner));
    assert_eq!(s.phase(), DrawPhase::Idle);
    assert!(s.showcase_ball().is_none());
    assert_eq!(s.winners().len(), 1);
    assert_eq!(s.pending_deadline_ms(), None);
    s.drain_events();

    // The retire timeout is stale and must not touch the survivor
    for _ in 0..300 {
        s.tick(FRAME_MS);
    }
    assert!(s.drain_events().is_empty());
    assert_eq!(s.pool().participant_count(), 1);
    assert_ne!(s.pool().participants()[0].id, winner);
    assert_eq!(s.pool().ball_count(), 2);
}
