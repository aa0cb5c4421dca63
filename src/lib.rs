mod utils;

pub mod animation;
pub mod canvas;
pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod field;
pub mod motion;
pub mod particle;
pub mod surface;
pub mod viewport;

pub use canvas::PixelCanvas;
pub use color::Color;
pub use config::FieldConfig;
pub use dom::DomMarkers;
pub use error::FieldError;
pub use field::ParticleField;
pub use particle::{MarkerStyle, Particle, ParticleSeed};
pub use surface::MarkerSurface;
pub use viewport::Viewport;

use animation::AnimationLoop;
use events::EventListener;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, Document, MouseEvent, Window};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// console.time / console.timeEnd around a scope, only with `frame-timing`
pub struct Timer<'a> {
    name: Option<&'a str>,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if cfg!(feature = "frame-timing") {
            console::time_with_label(name);
            Timer { name: Some(name) }
        } else {
            Timer { name: None }
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if let Some(name) = self.name {
            console::time_end_with_label(name);
        }
    }
}

type SharedField = Rc<RefCell<ParticleField<DomMarkers>>>;

/// Ambient particle background made of DOM elements inside a container.
/// Runs its own animation loop, follows the mouse, tracks window resizes and
/// tears itself down while the page is hidden.
#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    document: Document,
    field: SharedField,
    animation: AnimationLoop,
    listeners: Vec<EventListener>,
    // set by start(), cleared by stop(); a visible page only restarts a wanted field
    wanted: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or(FieldError::NoWindow)?;
        let document = window.document().ok_or(FieldError::NoDocument)?;
        let markers = DomMarkers::from_element_id(document.clone(), container_id)?;
        let field = ParticleField::new(markers, FieldConfig::default());
        Ok(ParticleBackground {
            animation: AnimationLoop::new(window.clone()),
            window,
            document,
            field: Rc::new(RefCell::new(field)),
            listeners: Vec::new(),
            wanted: Rc::new(Cell::new(false)),
        })
    }

    // Setters only apply before start() or after stop()
    pub fn set_particle_count(&mut self, particle_count: u32) -> bool {
        self.update_config(|config| config.with_particle_count(particle_count))
    }

    pub fn set_repulsion(&mut self, radius: f64, strength: f64) -> bool {
        self.update_config(|config| config.with_repulsion(radius, strength))
    }

    pub fn set_max_speed(&mut self, max_speed: Option<f64>) -> bool {
        self.update_config(|config| config.with_max_speed(max_speed))
    }

    pub fn set_color(&mut self, color: &str) {
        self.field.borrow_mut().surface_mut().set_color(color);
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        start_field(&self.field, &self.animation)?;
        self.wanted.set(true);
        if self.listeners.is_empty() {
            self.attach_listeners()?;
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        self.wanted.set(false);
        stop_field(&self.field, &self.animation);
    }

    /// Stops the field and detaches every event listener.
    pub fn destroy(&mut self) {
        self.stop();
        self.listeners.clear();
    }

    pub fn is_running(&self) -> bool {
        self.field.borrow().is_running() && self.animation.is_running()
    }

    pub fn viewport_width(&self) -> u32 {
        self.field.borrow().viewport().width
    }

    pub fn viewport_height(&self) -> u32 {
        self.field.borrow().viewport().height
    }

    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }
}

impl ParticleBackground {
    fn update_config<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(FieldConfig) -> FieldConfig,
    {
        let mut field = self.field.borrow_mut();
        let config = change(*field.config());
        field.reconfigure(config)
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let field = Rc::clone(&self.field);
        let mousemove = EventListener::new(&self.window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let mut field = field.borrow_mut();
                let [x, y] = field
                    .surface()
                    .to_local(event.client_x() as f64, event.client_y() as f64);
                field.on_pointer_move(x, y);
            }
        })?;

        let field = Rc::clone(&self.field);
        let resize = EventListener::new(&self.window, "resize", move |_| {
            let mut field = field.borrow_mut();
            let viewport = field.surface().viewport();
            field.resize(viewport);
        })?;

        let field = Rc::clone(&self.field);
        let animation = self.animation.clone();
        let document = self.document.clone();
        let wanted = Rc::clone(&self.wanted);
        let visibility = EventListener::new(&self.document, "visibilitychange", move |_| {
            if document.hidden() {
                stop_field(&field, &animation);
            } else if wanted.get() {
                if let Err(e) = start_field(&field, &animation) {
                    console::error_1(&e);
                }
            }
        })?;

        self.listeners = vec![mousemove, resize, visibility];
        Ok(())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn start_field(field: &SharedField, animation: &AnimationLoop) -> Result<(), JsValue> {
    {
        let mut field = field.borrow_mut();
        if field.is_running() {
            return Ok(());
        }
        let viewport = field.surface().viewport();
        if viewport.is_degenerate() {
            console::warn_1(
                &format!(
                    "particle container is {}x{}, particles will sit at its origin",
                    viewport.width, viewport.height
                )
                .into(),
            );
        }
        field.start(viewport, &mut rand::thread_rng())?;
        console::log_1(
            &format!(
                "particle field started: {} particles in {}x{}",
                field.particles().len(),
                viewport.width,
                viewport.height
            )
            .into(),
        );
    }
    let tick_field = Rc::clone(field);
    animation.start(move |_timestamp| {
        let _timer = Timer::new("ParticleBackground::advance");
        tick_field.borrow_mut().advance();
    })
}

fn stop_field(field: &SharedField, animation: &AnimationLoop) {
    animation.stop();
    let released = field.borrow_mut().stop();
    if released > 0 {
        console::log_1(&format!("particle field stopped: released {} markers", released).into());
    }
}

/// Particle field drawn into a single 2d canvas. The host drives it:
/// call `update()` and then `render(ctx)` once per frame.
#[wasm_bindgen]
pub struct ParticleCanvas {
    field: ParticleField<PixelCanvas>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> ParticleCanvas {
        ParticleCanvas {
            field: ParticleField::new(PixelCanvas::new(width, height), FieldConfig::default()),
        }
    }

    pub fn set_particle_count(&mut self, particle_count: u32) -> bool {
        let config = self.field.config().with_particle_count(particle_count);
        self.field.reconfigure(config)
    }

    pub fn set_repulsion(&mut self, radius: f64, strength: f64) -> bool {
        let config = self.field.config().with_repulsion(radius, strength);
        self.field.reconfigure(config)
    }

    pub fn set_max_speed(&mut self, max_speed: Option<f64>) -> bool {
        let config = self.field.config().with_max_speed(max_speed);
        self.field.reconfigure(config)
    }

    // RRGGBBAA
    pub fn set_color(&mut self, color: u32) {
        self.field.surface_mut().set_color(Color::from_u32(color));
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        let surface = self.field.surface();
        let viewport = Viewport::new(surface.width(), surface.height());
        self.field.start(viewport, &mut rand::thread_rng())?;
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.field.surface_mut().resize(width, height);
        self.field.resize(Viewport::new(width, height));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.field.on_pointer_move(x, y);
    }

    pub fn update(&mut self) {
        let _timer = Timer::new("ParticleCanvas::update()");
        self.field.advance();
    }

    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let _timer = Timer::new("ParticleCanvas::render");
        self.field.surface_mut().render(ctx)
    }

    pub fn stop(&mut self) -> usize {
        self.field.stop()
    }

    pub fn is_running(&self) -> bool {
        self.field.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }
}
