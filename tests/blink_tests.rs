// Host-side tests for blink scheduling, the blink curve and cancellation.

use face_core::*;
use std::rc::Rc;

const FRAME: f64 = 16.0;

fn controller(seed: u64) -> (Rc<ManualScheduler>, BlinkController) {
    controller_with(BlinkConfig {
        seed: Some(seed),
        ..BlinkConfig::default()
    })
}

fn controller_with(config: BlinkConfig) -> (Rc<ManualScheduler>, BlinkController) {
    let clock = Rc::new(ManualScheduler::new());
    let blink = BlinkController::new(clock.clone(), config);
    (clock, blink)
}

// Advance exactly to the pending blink timer; its first curve frame runs in
// the same step.
fn run_to_next_blink(clock: &ManualScheduler) -> f64 {
    let due = clock.next_timer_due().expect("blink timer armed");
    clock.advance(due - clock.now_ms());
    clock.now_ms()
}

#[test]
fn arms_one_timer_and_starts_open() {
    let (clock, blink) = controller(1);
    assert_eq!(blink.eye_scale(), 1.0);
    assert!(!blink.is_blinking());
    assert_eq!(clock.pending_timers(), 1);
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn first_delay_is_within_two_to_five_seconds() {
    for seed in 0..200 {
        let (clock, _blink) = controller(seed);
        let due = clock.next_timer_due().unwrap();
        assert!((2000.0..5000.0).contains(&due), "seed {seed}: delay {due}");
    }
}

#[test]
fn same_seed_gives_same_schedule() {
    let (a, _ba) = controller(42);
    let (b, _bb) = controller(42);
    assert_eq!(a.next_timer_due(), b.next_timer_due());
}

#[test]
fn timer_fire_starts_blink_and_rearms() {
    let (clock, blink) = controller(5);
    let t0 = run_to_next_blink(&clock);
    assert!(blink.is_blinking());
    assert_eq!(blink.blink_count(), 1);
    assert_eq!(blink.session().unwrap().start_ms, Some(t0));
    assert_eq!(blink.session().unwrap().duration_ms, 150.0);
    // First frame: no progress yet, eyes still open
    assert!((blink.eye_scale() - 1.0).abs() < 1e-9);
    assert_eq!(clock.pending_frames(), 1);
    // The next blink is already waiting
    assert_eq!(clock.pending_timers(), 1);
    let next = clock.next_timer_due().unwrap();
    assert!(next - t0 >= 2000.0 && next - t0 < 5000.0);
}

#[test]
fn curve_closes_at_half_duration_and_reopens() {
    let (clock, blink) = controller(9);
    run_to_next_blink(&clock);

    clock.advance(75.0);
    assert!(blink.eye_scale().abs() < 1e-9, "eye at midpoint: {}", blink.eye_scale());

    clock.advance(37.5);
    let quarter = blink.eye_scale();
    assert!((quarter - (1.0 - (0.75 * std::f64::consts::PI).sin())).abs() < 1e-9);

    clock.advance(40.0);
    assert_eq!(blink.eye_scale(), 1.0);
    assert!(!blink.is_blinking());
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn overshooting_frame_snaps_open() {
    let (clock, blink) = controller(11);
    run_to_next_blink(&clock);
    clock.advance(140.0);
    assert!(blink.eye_scale() > 0.0 && blink.eye_scale() < 1.0);
    clock.advance(400.0);
    assert_eq!(blink.eye_scale(), 1.0);
    assert!(!blink.is_blinking());
}

#[test]
fn eye_scale_stays_in_unit_range_during_blink() {
    let (clock, blink) = controller(13);
    run_to_next_blink(&clock);
    let mut min_seen: f64 = 1.0;
    while blink.is_blinking() {
        clock.advance(FRAME);
        let e = blink.eye_scale();
        assert!((0.0..=1.0).contains(&e), "eye {e}");
        min_seen = min_seen.min(e);
    }
    assert!(min_seen < 0.1, "never closed: {min_seen}");
}

#[test]
fn second_trigger_leaves_one_curve() {
    let (clock, blink) = controller(17);
    blink.trigger();
    clock.advance(FRAME);
    clock.advance(FRAME);
    assert!(blink.is_blinking());
    assert_eq!(clock.pending_frames(), 1);

    blink.trigger();
    assert_eq!(clock.pending_frames(), 1);
    assert_eq!(blink.blink_count(), 2);

    // The new curve restarts from its own first frame
    clock.advance(FRAME);
    assert_eq!(blink.session().unwrap().start_ms, Some(clock.now_ms()));
    assert!((blink.eye_scale() - 1.0).abs() < 1e-9);
    while blink.is_blinking() {
        assert!(clock.pending_frames() <= 1);
        clock.advance(FRAME);
    }
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn back_to_back_triggers_keep_single_frame_request() {
    let (clock, blink) = controller(19);
    blink.trigger();
    blink.trigger();
    blink.trigger();
    assert_eq!(clock.pending_frames(), 1);
    // Manual triggers leave the idle timer alone
    assert_eq!(clock.pending_timers(), 1);
}

#[test]
fn dispose_cancels_frame_and_timer() {
    let (clock, blink) = controller(23);
    run_to_next_blink(&clock);
    clock.advance(FRAME);
    assert_eq!(clock.pending_frames(), 1);
    assert_eq!(clock.pending_timers(), 1);

    blink.dispose();
    assert_eq!(clock.pending_frames(), 0);
    assert_eq!(clock.pending_timers(), 0);
    assert_eq!(blink.eye_scale(), 1.0);

    // Nothing comes back to life afterwards
    blink.trigger();
    clock.advance(10_000.0);
    assert_eq!(clock.pending_frames() + clock.pending_timers(), 0);
    assert_eq!(blink.blink_count(), 1);
}

#[test]
fn dropping_controller_cancels_callbacks() {
    let (clock, blink) = controller(29);
    blink.trigger();
    drop(blink);
    assert_eq!(clock.pending_frames(), 0);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn blinks_recur_indefinitely() {
    let (clock, blink) = controller(31);
    let mut elapsed = 0.0;
    while elapsed < 60_000.0 {
        clock.advance(FRAME);
        elapsed += FRAME;
        assert_eq!(clock.pending_timers(), 1);
        assert!(clock.pending_frames() <= 1);
    }
    let n = blink.blink_count();
    assert!((10..=30).contains(&n), "{n} blinks in a minute");
}

#[test]
fn speed_shortens_the_curve() {
    let (clock, blink) = controller_with(BlinkConfig {
        speed: 2.0,
        seed: Some(37),
        ..BlinkConfig::default()
    });
    run_to_next_blink(&clock);
    clock.advance(37.5);
    assert!(blink.eye_scale().abs() < 1e-9);
    clock.advance(40.0);
    assert_eq!(blink.eye_scale(), 1.0);
    assert!(!blink.is_blinking());
}

#[test]
fn custom_interval_is_respected() {
    let (clock, _blink) = controller_with(BlinkConfig {
        min_interval_ms: 500.0,
        interval_jitter_ms: 0.0,
        seed: Some(41),
        ..BlinkConfig::default()
    });
    assert_eq!(clock.next_timer_due(), Some(500.0));
}
