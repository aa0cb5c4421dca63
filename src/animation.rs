// requestAnimationFrame loop owned by one instance. Cancellation is
// cooperative: stop() cancels the pending frame, and a frame already running
// when stop() is called finishes but does not schedule another.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

struct LoopState {
    window: Window,
    running: Cell<bool>,
    frame_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn schedule(&self) -> Result<(), JsValue> {
        if let Some(callback) = self.callback.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.frame_id.set(Some(id));
        }
        Ok(())
    }

    fn cancel(&self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

#[derive(Clone)]
pub struct AnimationLoop {
    state: Rc<LoopState>,
}

impl AnimationLoop {
    pub fn new(window: Window) -> AnimationLoop {
        AnimationLoop {
            state: Rc::new(LoopState {
                window,
                running: Cell::new(false),
                frame_id: Cell::new(None),
                callback: RefCell::new(None),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Calls `tick` with the frame timestamp once per animation frame until
    /// stopped. Ignored if the loop is already running.
    pub fn start<F>(&self, mut tick: F) -> Result<(), JsValue>
    where
        F: FnMut(f64) + 'static,
    {
        if self.state.running.get() {
            return Ok(());
        }
        // the callback lives inside the state, so it only holds a weak ref back
        let weak: Weak<LoopState> = Rc::downgrade(&self.state);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let state = match weak.upgrade() {
                Some(state) => state,
                None => return,
            };
            state.frame_id.set(None);
            if !state.running.get() {
                return;
            }
            tick(timestamp);
            if state.running.get() {
                if let Err(e) = state.schedule() {
                    console::error_1(&e);
                    state.running.set(false);
                }
            }
        }) as Box<dyn FnMut(f64)>);

        *self.state.callback.borrow_mut() = Some(callback);
        self.state.running.set(true);
        if let Err(e) = self.state.schedule() {
            self.state.running.set(false);
            return Err(e);
        }
        Ok(())
    }

    pub fn stop(&self) {
        self.state.running.set(false);
        self.state.cancel();
    }
}
