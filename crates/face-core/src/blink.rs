//! Randomized involuntary blinking.
//!
//! Idle: a one-shot timer waits `min + random() * jitter` ms. When it fires a
//! blink starts and the next timer is armed straight away, so blink cadence
//! does not depend on blink length. Blinking: every display refresh advances a
//! half-sine curve from open to closed and back until the duration elapses,
//! then eyes snap fully open.
//!
//! The controller keeps at most one frame handle and one timer handle.
//! Replacing either cancels the previous one first; disposal cancels both.

use crate::config::BlinkConfig;
use crate::easing::blink_curve;
use crate::scheduler::{FrameHandle, Scheduler, TimerHandle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// An in-flight blink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkSession {
    /// Timestamp of the first frame of the blink; set when that frame runs.
    pub start_ms: Option<f64>,
    pub duration_ms: f64,
}

struct BlinkState {
    config: BlinkConfig,
    rng: StdRng,
    eye_scale: f64,
    session: Option<BlinkSession>,
    frame: Option<FrameHandle>,
    timer: Option<TimerHandle>,
    blinks: u64,
    disposed: bool,
}

pub struct BlinkController {
    state: Rc<RefCell<BlinkState>>,
    scheduler: Rc<dyn Scheduler>,
}

impl BlinkController {
    /// Create the controller and arm the first blink timer.
    pub fn new(scheduler: Rc<dyn Scheduler>, config: BlinkConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Rc::new(RefCell::new(BlinkState {
            config,
            rng,
            eye_scale: 1.0,
            session: None,
            frame: None,
            timer: None,
            blinks: 0,
            disposed: false,
        }));
        schedule_next(&state, &scheduler);
        Self { state, scheduler }
    }

    /// Current eye openness, 1 = open.
    pub fn eye_scale(&self) -> f64 {
        self.state.borrow().eye_scale
    }

    pub fn is_blinking(&self) -> bool {
        self.state.borrow().session.is_some()
    }

    pub fn session(&self) -> Option<BlinkSession> {
        self.state.borrow().session
    }

    /// Number of blinks started so far.
    pub fn blink_count(&self) -> u64 {
        self.state.borrow().blinks
    }

    pub fn config(&self) -> BlinkConfig {
        self.state.borrow().config.clone()
    }

    /// Start a blink now, superseding one in progress. The idle timer is left
    /// alone.
    pub fn trigger(&self) {
        trigger(&self.state, &self.scheduler);
    }

    /// Cancel pending callbacks and stop blinking for good. Safe to call more
    /// than once; also runs on drop.
    pub fn dispose(&self) {
        let (frame, timer) = {
            let mut st = self.state.borrow_mut();
            if st.disposed {
                return;
            }
            st.disposed = true;
            st.session = None;
            st.eye_scale = 1.0;
            (st.frame.take(), st.timer.take())
        };
        if let Some(f) = frame {
            self.scheduler.cancel_frame(f);
        }
        if let Some(t) = timer {
            self.scheduler.cancel_delayed(t);
        }
        log::debug!("blink controller disposed");
    }
}

impl Drop for BlinkController {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn schedule_next(state: &Rc<RefCell<BlinkState>>, scheduler: &Rc<dyn Scheduler>) {
    let delay = {
        let mut guard = state.borrow_mut();
        if guard.disposed {
            return;
        }
        let st = &mut *guard;
        st.config.sample_delay(&mut st.rng)
    };
    let weak_state = Rc::downgrade(state);
    let weak_sched = Rc::downgrade(scheduler);
    let handle = scheduler.set_delayed(
        Box::new(move || {
            let (Some(state), Some(sched)) = (weak_state.upgrade(), weak_sched.upgrade()) else {
                return;
            };
            state.borrow_mut().timer = None;
            trigger(&state, &sched);
            schedule_next(&state, &sched);
        }),
        delay,
    );
    log::debug!("next blink in {:.0} ms", delay);
    if let Some(old) = state.borrow_mut().timer.replace(handle) {
        scheduler.cancel_delayed(old);
    }
}

fn trigger(state: &Rc<RefCell<BlinkState>>, scheduler: &Rc<dyn Scheduler>) {
    let previous = {
        let mut st = state.borrow_mut();
        if st.disposed {
            return;
        }
        st.session = Some(BlinkSession {
            start_ms: None,
            duration_ms: st.config.duration_ms,
        });
        st.blinks += 1;
        st.frame.take()
    };
    if let Some(f) = previous {
        log::debug!("blink superseded mid-curve");
        scheduler.cancel_frame(f);
    }
    request_step(state, scheduler);
}

fn request_step(state: &Rc<RefCell<BlinkState>>, scheduler: &Rc<dyn Scheduler>) {
    let weak_state: Weak<RefCell<BlinkState>> = Rc::downgrade(state);
    let weak_sched = Rc::downgrade(scheduler);
    let handle = scheduler.request_frame(Box::new(move |timestamp| {
        if let (Some(state), Some(sched)) = (weak_state.upgrade(), weak_sched.upgrade()) {
            step(&state, &sched, timestamp);
        }
    }));
    state.borrow_mut().frame = Some(handle);
}

fn step(state: &Rc<RefCell<BlinkState>>, scheduler: &Rc<dyn Scheduler>, timestamp: f64) {
    let running = {
        let mut st = state.borrow_mut();
        st.frame = None;
        let (start, duration) = match st.session.as_mut() {
            Some(s) => (*s.start_ms.get_or_insert(timestamp), s.duration_ms),
            None => return,
        };
        let progress = (timestamp - start) * st.config.speed;
        if progress < duration {
            st.eye_scale = blink_curve((progress / duration).min(1.0));
            true
        } else {
            st.eye_scale = 1.0;
            st.session = None;
            log::debug!("blink finished");
            false
        }
    };
    if running {
        request_step(state, scheduler);
    }
}
