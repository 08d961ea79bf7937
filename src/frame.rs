use crate::canvas::CanvasSurface;
use face_core::{render_params, FaceAnimator, FaceParameters};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub animator: FaceAnimator,
    pub surface: CanvasSurface,
    pub last_params: FaceParameters,
    pub frames: u64,
}

impl FrameContext {
    pub fn new(animator: FaceAnimator, surface: CanvasSurface) -> Self {
        Self {
            animator,
            surface,
            last_params: FaceParameters::default(),
            frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let params = self.animator.tick();
        render_params(&mut self.surface, params, self.animator.color());
        self.last_params = params;
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "[face] frame={} eye={:.2} mouth={:.2} blinks={}",
                self.frames,
                params.eye_scale,
                params.mouth_scale,
                self.animator.blink().blink_count()
            );
        }
    }
}

/// Running redraw loop; `stop` cancels the pending frame and releases the
/// loop closure.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    frame_ctx: Rc<RefCell<FrameContext>>,
}

impl FrameLoop {
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.frame_ctx.borrow().animator.dispose();
        // Drops the self-referencing loop closure
        self.tick.borrow_mut().take();
        log::info!("face loop stopped");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_tick.set(None);
        frame_ctx_tick.borrow_mut().frame();
        request_next(&tick_clone, &raf_id_tick);
    }) as Box<dyn FnMut()>));
    request_next(&tick, &raf_id);
    FrameLoop {
        raf_id,
        tick,
        frame_ctx,
    }
}

fn request_next(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Rc<Cell<Option<i32>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        if let Ok(id) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            raf_id.set(Some(id));
        }
    }
}
