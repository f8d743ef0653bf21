//! Whole-session scenarios driven through the session API
//!
//! Frames are synthetic right hands posed to match whatever the current
//! round prompts.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Difficulty, DifficultyProfile, GameConfig, GestureMode, HandSelection, Strictness};
use crate::engine::RecognitionCause;
use crate::gestures::{matches_hand, GestureId, HAND_GESTURES};
use crate::hand::test_hands::*;
use crate::hand::{Frame, Landmark, INDEX_TIP, THUMB_TIP};

use super::{OutcomeTier, RecognitionKind, Session, SessionEvent, SessionPhase, TickOutcome};

const FRAME_SECS: f64 = 1.0 / 30.0;

/// A right hand showing `gesture`
fn pose(gesture: GestureId) -> Frame {
    let hand = match gesture {
        GestureId::ThumbsUp => extend_thumb(fist(), true),
        GestureId::ThumbsDown => extend_thumb(fist(), false),
        GestureId::Peace | GestureId::CrossedFingers => extend(fist(), &[INDEX, MIDDLE]),
        GestureId::HangLoose => extend(extend_thumb(fist(), true), &[PINKY]),
        GestureId::Fist => fist(),
        GestureId::OpenHand | GestureId::HighFive => open_hand(),
        GestureId::Pointing => extend(fist(), &[INDEX]),
        GestureId::OkSign => {
            let mut hand = extend(fist(), &[MIDDLE, RING, PINKY]);
            let index_tip = hand.landmarks[INDEX_TIP];
            hand.landmarks[THUMB_TIP] = Landmark::new(index_tip.x + 0.02, index_tip.y);
            hand
        }
        other => panic!("no single-hand pose for {:?}", other),
    };
    Frame::new(vec![hand])
}

fn config(strictness: Strictness, difficulty: Difficulty) -> GameConfig {
    GameConfig::new(
        GestureMode::Hands,
        HandSelection::Right,
        DifficultyProfile::preset(difficulty, strictness),
    )
}

fn started(cfg: GameConfig, rng: &mut StdRng) -> Session {
    let mut session = Session::new();
    session.begin_loading().unwrap();
    session.start(cfg, rng).unwrap();
    session.drain_events();
    session
}

fn current_gesture(session: &Session) -> GestureId {
    session.current_round().expect("active round").gesture.id
}

/// Feed matching frames until the round is recognized, returns frames used
fn hold_target(session: &mut Session, clock: &mut f64, rng: &mut StdRng) -> usize {
    let frame = pose(current_gesture(session));
    for n in 1..=300 {
        *clock += FRAME_SECS;
        let update = session.process_frame(&frame, *clock, rng).expect("frame processed");
        if update.recognized.is_some() {
            return n;
        }
    }
    panic!("gesture {:?} never recognized", current_gesture(session));
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn every_pose_matches_its_prompt() {
    let tol = DifficultyProfile::preset(Difficulty::Easy, Strictness::Strict).tolerance;
    for def in HAND_GESTURES.iter() {
        let frame = pose(def.id);
        assert!(
            matches_hand(def.id, &frame.hands[0], &tol),
            "{:?}",
            def.id
        );
    }
}

#[test]
fn easy_session_with_perfect_matches_is_excellent() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut session = started(config(Strictness::Lenient, Difficulty::Easy), &mut rng);
    let mut clock = 0.0;

    for round in 1..=6 {
        assert_eq!(session.round_index(), round);
        hold_target(&mut session, &mut clock, &mut rng);

        let recognized: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::GestureRecognized { token, kind, .. } => Some((token, kind)),
                _ => None,
            })
            .collect();
        assert_eq!(recognized.len(), 1);
        let (token, kind) = recognized[0];
        assert_eq!(kind, RecognitionKind::Held);

        clock += 1.5;
        assert!(session.advance(token, &mut rng));
    }

    assert_eq!(session.phase(), SessionPhase::Resulting);
    let summary = session.summary().unwrap();
    assert_eq!(summary.recognized, 6);
    assert_eq!(summary.total_rounds, 6);
    assert_eq!(summary.accuracy_percent, 100);
    assert_eq!(summary.tier, OutcomeTier::Excellent);
    assert_eq!(summary.best_time_secs, Some(0));
}

#[test]
fn lenient_wrong_pose_only_wins_rounds_it_satisfies() {
    let mut rng = StdRng::seed_from_u64(12);
    let cfg = config(Strictness::Lenient, Difficulty::Easy);
    let mut session = started(cfg, &mut rng);
    let open = Frame::new(vec![open_hand()]);
    let mut clock = 0.0;
    let mut satisfiable = 0;

    while session.phase() == SessionPhase::Active {
        let target = current_gesture(&session);
        let round = session.round_index();
        let matches = matches_hand(target, &open.hands[0], &cfg.profile.tolerance);
        if matches {
            satisfiable += 1;
        }

        'round: for _ in 0..cfg.profile.seconds_per_round {
            for _ in 0..30 {
                clock += FRAME_SECS;
                if let Some(update) = session.process_frame(&open, clock, &mut rng) {
                    assert!(matches || update.recognized.is_none(), "{:?} won without a match", target);
                }
            }
            session.tick(&mut rng);
            if session.round_index() != round || session.pending_advance().is_some() {
                break 'round;
            }
        }
        if let Some(token) = session.pending_advance() {
            session.advance(token, &mut rng);
        }
    }

    assert_eq!(session.recognized_count(), satisfiable);
}

#[test]
fn recognition_fires_once_per_round() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut session = started(config(Strictness::Strict, Difficulty::Medium), &mut rng);
    let frame = pose(current_gesture(&session));

    let mut fired = 0;
    for i in 0..120 {
        if let Some(update) = session.process_frame(&frame, i as f64 * FRAME_SECS, &mut rng) {
            if update.recognized == Some(RecognitionCause::HeldMatch) {
                fired += 1;
            }
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(session.recognized_count(), 1);
    assert_eq!(session.round_index(), 1);
}

#[test]
fn score_adds_fifty_plus_ten_per_remaining_second() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut session = started(config(Strictness::Strict, Difficulty::Easy), &mut rng);
    for _ in 0..3 {
        session.tick(&mut rng);
    }
    let remaining = session.current_round().unwrap().seconds_remaining;
    assert_eq!(remaining, 12);

    let mut clock = 0.0;
    hold_target(&mut session, &mut clock, &mut rng);
    assert_eq!(session.score(), 50 + 10 * remaining);
    assert_eq!(session.best_time_secs(), Some(3));
}

#[test]
fn timer_stops_after_recognition() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut session = started(config(Strictness::Strict, Difficulty::Easy), &mut rng);
    let mut clock = 0.0;
    hold_target(&mut session, &mut clock, &mut rng);

    let remaining = session.current_round().unwrap().seconds_remaining;
    assert_eq!(session.tick(&mut rng), TickOutcome::Idle);
    assert_eq!(session.current_round().unwrap().seconds_remaining, remaining);
}

#[test]
fn handless_round_times_out_without_score() {
    let mut rng = StdRng::seed_from_u64(5);
    let cfg = config(Strictness::Strict, Difficulty::Hard);
    let mut session = started(cfg, &mut rng);
    let mut clock = 0.0;

    for _ in 0..cfg.profile.seconds_per_round {
        for _ in 0..30 {
            clock += FRAME_SECS;
            let update = session.process_frame(&Frame::empty(), clock, &mut rng).unwrap();
            assert_eq!(update.hold_secs, 0.0);
            assert_eq!(update.confidence, 0.0);
        }
        session.tick(&mut rng);
    }

    assert_eq!(session.round_index(), 2);
    assert_eq!(session.recognized_count(), 0);
    assert_eq!(session.score(), 0);
    assert!(session
        .drain_events()
        .iter()
        .any(|e| matches!(e, SessionEvent::RoundTimedOut { round: 1 })));
}

#[test]
fn all_rounds_timing_out_ends_session() {
    let mut rng = StdRng::seed_from_u64(6);
    let cfg = config(Strictness::Strict, Difficulty::Hard);
    let mut session = started(cfg, &mut rng);

    let mut last_index = session.round_index();
    let total_ticks = cfg.profile.seconds_per_round * cfg.profile.total_rounds;
    for _ in 0..total_ticks {
        session.tick(&mut rng);
        let index = session.round_index();
        assert!(index == last_index || index == last_index + 1);
        last_index = index;
    }

    assert_eq!(session.phase(), SessionPhase::Resulting);
    assert_eq!(session.round_index(), cfg.profile.total_rounds + 1);
    let summary = session.summary().unwrap();
    assert_eq!(summary.accuracy_percent, 0);
    assert_eq!(summary.tier, OutcomeTier::TryAgain);
    assert_eq!(summary.best_time_secs, None);
}

#[test]
fn pause_freezes_timer_and_ignores_frames() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut session = started(config(Strictness::Strict, Difficulty::Easy), &mut rng);
    let frame = pose(current_gesture(&session));

    session.tick(&mut rng);
    for i in 0..10 {
        session.process_frame(&frame, i as f64 * FRAME_SECS, &mut rng);
    }
    let confidence = session.confidence();
    let hold = session.hold_secs();
    let remaining = session.current_round().unwrap().seconds_remaining;

    session.pause(0.4).unwrap();
    for i in 0..5 {
        assert_eq!(session.tick(&mut rng), TickOutcome::Idle);
        assert!(session.process_frame(&Frame::empty(), 1.0 + i as f64, &mut rng).is_none());
    }
    assert_eq!(session.current_round().unwrap().seconds_remaining, remaining);
    assert_eq!(session.confidence(), confidence);
    assert_eq!(session.hold_secs(), hold);

    session.resume(20.0, &mut rng).unwrap();
    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.confidence(), confidence);

    // the pause did not count towards the hold
    let update = session.process_frame(&frame, 20.05, &mut rng).unwrap();
    assert!(update.hold_secs < 0.5);
    assert!(update.recognized.is_none());
}

#[test]
fn quit_during_celebration_discards_advance() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut session = started(config(Strictness::Strict, Difficulty::Easy), &mut rng);
    let mut clock = 0.0;
    hold_target(&mut session, &mut clock, &mut rng);
    let token = session.pending_advance().unwrap();

    session.quit().unwrap();
    let summary = session.summary().unwrap().clone();

    assert!(!session.advance(token, &mut rng));
    assert_eq!(session.phase(), SessionPhase::Resulting);
    assert_eq!(session.summary(), Some(&summary));
    assert!(session.current_round().is_none());
}

#[test]
fn advance_from_previous_session_is_ignored() {
    let mut rng = StdRng::seed_from_u64(9);
    let cfg = config(Strictness::Strict, Difficulty::Easy);
    let mut session = started(cfg, &mut rng);
    let mut clock = 0.0;
    hold_target(&mut session, &mut clock, &mut rng);
    let token = session.pending_advance().unwrap();

    session.quit().unwrap();
    session.start(cfg, &mut rng).unwrap();
    assert_eq!(session.round_index(), 1);

    assert!(!session.advance(token, &mut rng));
    assert_eq!(session.round_index(), 1);
    assert_eq!(session.score(), 0);
}

#[test]
fn pause_during_celebration_defers_next_round_to_resume() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut session = started(config(Strictness::Strict, Difficulty::Easy), &mut rng);
    let mut clock = 0.0;
    hold_target(&mut session, &mut clock, &mut rng);
    let token = session.pending_advance().unwrap();

    session.pause(clock).unwrap();
    assert!(!session.advance(token, &mut rng));
    assert_eq!(session.round_index(), 1);

    session.resume(clock + 5.0, &mut rng).unwrap();
    assert_eq!(session.round_index(), 2);
    assert!(session.pending_advance().is_none());
    assert!(!session.advance(token, &mut rng));
    assert_eq!(session.round_index(), 2);
}

#[test]
fn wrong_hand_does_not_count() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut cfg = config(Strictness::Strict, Difficulty::Easy);
    cfg.hand_selection = HandSelection::Left;
    let mut session = started(cfg, &mut rng);

    let frame = pose(current_gesture(&session));
    for i in 0..120 {
        let update = session.process_frame(&frame, i as f64 * FRAME_SECS, &mut rng).unwrap();
        assert!(update.detected);
        assert!(update.recognized.is_none());
    }
    assert!(session.view().hand_detected);
    assert_eq!(session.confidence(), 0.0);
}
