use face_core::{FrameCallback, FrameHandle, Scheduler, TimerCallback, TimerHandle};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// JS closures must outlive their invocation. Fired or cancelled closures are
// parked in `spent_*` and only dropped on the next scheduling call, never
// while they may still be running.
#[derive(Default)]
struct Registry {
    frames: FnvHashMap<i32, Closure<dyn FnMut(f64)>>,
    timers: FnvHashMap<i32, Closure<dyn FnMut()>>,
    spent_frames: Vec<Closure<dyn FnMut(f64)>>,
    spent_timers: Vec<Closure<dyn FnMut()>>,
}

impl Registry {
    fn retire_frame(&mut self, id: i32) {
        if let Some(c) = self.frames.remove(&id) {
            self.spent_frames.push(c);
        }
    }

    fn retire_timer(&mut self, id: i32) {
        if let Some(c) = self.timers.remove(&id) {
            self.spent_timers.push(c);
        }
    }
}

/// `requestAnimationFrame` / `setTimeout` behind the core scheduling port.
pub struct BrowserScheduler {
    window: web::Window,
    registry: Rc<RefCell<Registry>>,
}

impl BrowserScheduler {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            registry: Rc::new(RefCell::new(Registry::default())),
        })
    }

    fn sweep(&self) {
        let mut reg = self.registry.borrow_mut();
        reg.spent_frames.clear();
        reg.spent_timers.clear();
    }
}

impl Scheduler for BrowserScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        self.sweep();
        let id_cell = Rc::new(Cell::new(-1));
        let id_for_cb = id_cell.clone();
        let registry = Rc::downgrade(&self.registry);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(cb) = callback.take() {
                cb(timestamp);
            }
            if let Some(reg) = registry.upgrade() {
                reg.borrow_mut().retire_frame(id_for_cb.get());
            }
        }) as Box<dyn FnMut(f64)>);
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => {
                id_cell.set(id);
                self.registry.borrow_mut().frames.insert(id, closure);
                FrameHandle(id)
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(-1)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if handle.0 < 0 {
            return;
        }
        _ = self.window.cancel_animation_frame(handle.0);
        self.registry.borrow_mut().retire_frame(handle.0);
    }

    fn set_delayed(&self, callback: TimerCallback, delay_ms: f64) -> TimerHandle {
        self.sweep();
        let id_cell = Rc::new(Cell::new(-1));
        let id_for_cb = id_cell.clone();
        let registry = Rc::downgrade(&self.registry);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(cb) = callback.take() {
                cb();
            }
            if let Some(reg) = registry.upgrade() {
                reg.borrow_mut().retire_timer(id_for_cb.get());
            }
        }) as Box<dyn FnMut()>);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.max(0.0).round() as i32,
            ) {
            Ok(id) => {
                id_cell.set(id);
                self.registry.borrow_mut().timers.insert(id, closure);
                TimerHandle(id)
            }
            Err(e) => {
                log::error!("setTimeout failed: {:?}", e);
                TimerHandle(-1)
            }
        }
    }

    fn cancel_delayed(&self, handle: TimerHandle) {
        if handle.0 < 0 {
            return;
        }
        self.window.clear_timeout_with_handle(handle.0);
        self.registry.borrow_mut().retire_timer(handle.0);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        let reg = self.registry.borrow();
        for id in reg.frames.keys() {
            _ = self.window.cancel_animation_frame(*id);
        }
        for id in reg.timers.keys() {
            self.window.clear_timeout_with_handle(*id);
        }
    }
}
