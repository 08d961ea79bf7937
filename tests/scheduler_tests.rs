// Host-side tests for the virtual-clock scheduler used by tests and the
// native front-end.

use face_core::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

fn log_entry(log: &Log, entry: impl Into<String>) {
    log.borrow_mut().push(entry.into());
}

#[test]
fn timers_fire_once_in_due_order() {
    let clock = ManualScheduler::new();
    let log: Log = Rc::default();
    for (name, delay) in [("late", 300.0), ("early", 100.0), ("mid", 200.0)] {
        let l = log.clone();
        clock.set_delayed(Box::new(move || log_entry(&l, name)), delay);
    }
    clock.advance(150.0);
    assert_eq!(*log.borrow(), vec!["early"]);
    clock.advance(1000.0);
    assert_eq!(*log.borrow(), vec!["early", "mid", "late"]);
    clock.advance(1000.0);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn cancelled_timer_never_fires() {
    let clock = ManualScheduler::new();
    let log: Log = Rc::default();
    let l = log.clone();
    let handle = clock.set_delayed(Box::new(move || log_entry(&l, "fired")), 10.0);
    assert_eq!(clock.pending_timers(), 1);
    clock.cancel_delayed(handle);
    assert_eq!(clock.pending_timers(), 0);
    clock.advance(100.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn frames_receive_current_time() {
    let clock = ManualScheduler::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    clock.request_frame(Box::new(move |t: f64| s.borrow_mut().push(t)));
    clock.advance(16.0);
    assert_eq!(*seen.borrow(), vec![16.0]);
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn frame_requested_inside_frame_waits_for_next_advance() {
    let clock = Rc::new(ManualScheduler::new());
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let weak = Rc::downgrade(&clock);
    clock.request_frame(Box::new(move |_: f64| {
        *c.borrow_mut() += 1;
        if let Some(clock) = weak.upgrade() {
            let c2 = c.clone();
            clock.request_frame(Box::new(move |_: f64| *c2.borrow_mut() += 1));
        }
    }));
    clock.advance(16.0);
    assert_eq!(*count.borrow(), 1);
    assert_eq!(clock.pending_frames(), 1);
    clock.advance(16.0);
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn cancelled_frame_is_dropped() {
    let clock = ManualScheduler::new();
    let log: Log = Rc::default();
    let l = log.clone();
    let keep = log.clone();
    let a = clock.request_frame(Box::new(move |_: f64| log_entry(&l, "a")));
    clock.request_frame(Box::new(move |_: f64| log_entry(&keep, "b")));
    clock.cancel_frame(a);
    assert_eq!(clock.pending_frames(), 1);
    clock.advance(16.0);
    assert_eq!(*log.borrow(), vec!["b"]);
}

#[test]
fn timers_run_before_frames_in_one_advance() {
    let clock = ManualScheduler::new();
    let log: Log = Rc::default();
    let l1 = log.clone();
    let l2 = log.clone();
    clock.request_frame(Box::new(move |_: f64| log_entry(&l1, "frame")));
    clock.set_delayed(Box::new(move || log_entry(&l2, "timer")), 5.0);
    clock.advance(16.0);
    assert_eq!(*log.borrow(), vec!["timer", "frame"]);
}

#[test]
fn zero_delay_timer_armed_by_timer_fires_same_advance() {
    let clock = Rc::new(ManualScheduler::new());
    let log: Log = Rc::default();
    let l = log.clone();
    let weak = Rc::downgrade(&clock);
    clock.set_delayed(
        Box::new(move || {
            log_entry(&l, "first");
            if let Some(clock) = weak.upgrade() {
                let l2 = l.clone();
                clock.set_delayed(Box::new(move || log_entry(&l2, "second")), 0.0);
            }
        }),
        10.0,
    );
    clock.advance(10.0);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn handles_are_unique() {
    let clock = ManualScheduler::new();
    let a = clock.request_frame(Box::new(|_: f64| {}));
    let b = clock.request_frame(Box::new(|_: f64| {}));
    let t = clock.set_delayed(Box::new(|| {}), 1.0);
    assert_ne!(a, b);
    assert_ne!(a.0, t.0);
    assert_ne!(b.0, t.0);
}
