//! Host scheduling port.
//!
//! Animation code never sleeps or spins; it asks the host for a callback on
//! the next display refresh or after a delay, and keeps the returned handle
//! so it can cancel it. Hosts run everything on one thread, so callbacks are
//! plain boxed closures without `Send` bounds.

use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Pending per-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Pending one-shot delayed callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;
pub type TimerCallback = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Run `callback` once on the next display refresh.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;
    fn cancel_frame(&self, handle: FrameHandle);
    /// Run `callback` once after `delay_ms` milliseconds.
    fn set_delayed(&self, callback: TimerCallback, delay_ms: f64) -> TimerHandle;
    fn cancel_delayed(&self, handle: TimerHandle);
}

struct PendingTimer {
    due_ms: f64,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualState {
    now_ms: f64,
    next_id: i32,
    frames: SmallVec<[(i32, FrameCallback); 4]>,
    timers: FnvHashMap<i32, PendingTimer>,
}

/// Virtual-clock scheduler driven explicitly by the caller.
///
/// Each [`advance`](Self::advance) moves the clock, fires every timer that has
/// come due (earliest first) and then runs the frame callbacks that were
/// requested before the advance. Callbacks requested while a frame runs wait
/// for the next one, like `requestAnimationFrame`.
#[derive(Default)]
pub struct ManualScheduler {
    state: std::cell::RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Due time of the earliest pending timer.
    pub fn next_timer_due(&self) -> Option<f64> {
        self.state
            .borrow()
            .timers
            .values()
            .map(|t| t.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Advance the clock by `dt_ms` and deliver one frame.
    pub fn advance(&self, dt_ms: f64) {
        let now = {
            let mut st = self.state.borrow_mut();
            st.now_ms += dt_ms.max(0.0);
            st.now_ms
        };
        self.fire_due_timers(now);

        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        for (_, callback) in frames {
            callback(now);
        }
    }

    fn fire_due_timers(&self, now: f64) {
        // A timer callback may arm another one that is already due; loop
        // until nothing is left at or before `now`.
        loop {
            let next = {
                let mut st = self.state.borrow_mut();
                let due = st
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due_ms <= now)
                    .min_by(|(ia, a), (ib, b)| a.due_ms.total_cmp(&b.due_ms).then(ia.cmp(ib)))
                    .map(|(id, _)| *id);
                due.and_then(|id| st.timers.remove(&id))
            };
            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
    }

    fn next_id(st: &mut ManualState) -> i32 {
        st.next_id += 1;
        st.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut st = self.state.borrow_mut();
        let id = Self::next_id(&mut st);
        st.frames.push((id, callback));
        FrameHandle(id)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state
            .borrow_mut()
            .frames
            .retain(|(id, _)| *id != handle.0);
    }

    fn set_delayed(&self, callback: TimerCallback, delay_ms: f64) -> TimerHandle {
        let mut st = self.state.borrow_mut();
        let id = Self::next_id(&mut st);
        let due_ms = st.now_ms + delay_ms.max(0.0);
        st.timers.insert(id, PendingTimer { due_ms, callback });
        TimerHandle(id)
    }

    fn cancel_delayed(&self, handle: TimerHandle) {
        self.state.borrow_mut().timers.remove(&handle.0);
    }
}
