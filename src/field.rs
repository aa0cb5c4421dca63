// Particle field: a fixed set of particles bouncing around a viewport and
// shying away from the pointer. The host drives it one tick at a time.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::motion;
use crate::particle::{Particle, ParticleSeed};
use crate::surface::MarkerSurface;
use crate::viewport::Viewport;
use rand::Rng;

pub struct ParticleField<S: MarkerSurface> {
    surface: S,
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle<S::Marker>>,
    pointer: [f64; 2],
    running: bool,
    ticks: u64,
}

impl<S: MarkerSurface> ParticleField<S> {
    pub fn new(surface: S, config: FieldConfig) -> Self {
        ParticleField {
            surface,
            config,
            viewport: Viewport::new(0, 0),
            particles: Vec::new(),
            pointer: [0.0, 0.0],
            running: false,
            ticks: 0,
        }
    }

    /// Fills the field with `config.particle_count` randomly placed particles
    /// and starts it. Does nothing if the field is already running.
    pub fn start<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) -> Result<(), FieldError> {
        if self.running {
            return Ok(());
        }
        let seeds: Vec<ParticleSeed> = (0..self.config.particle_count)
            .map(|_| ParticleSeed::random(&mut *rng, viewport))
            .collect();
        self.start_with(viewport, seeds)
    }

    /// Starts the field with exactly the given particles. If a marker cannot
    /// be created, the markers made so far are released and the field stays
    /// stopped.
    pub fn start_with(&mut self, viewport: Viewport, seeds: Vec<ParticleSeed>) -> Result<(), FieldError> {
        if self.running {
            return Ok(());
        }
        let mut particles: Vec<Particle<S::Marker>> = Vec::with_capacity(seeds.len());
        for mut seed in seeds {
            seed.pos = viewport.clamp(seed.pos);
            let marker = match self.surface.create_marker(seed.style()) {
                Ok(marker) => marker,
                Err(e) => {
                    for particle in particles.drain(..) {
                        self.surface.release_marker(particle.marker);
                    }
                    return Err(e);
                }
            };
            self.surface.place_marker(&marker, seed.pos);
            particles.push(Particle::from_seed(seed, marker));
        }
        self.viewport = viewport;
        self.particles = particles;
        self.running = true;
        self.ticks = 0;
        Ok(())
    }

    /// Last known pointer position relative to the viewport's top-left corner.
    /// Anything is accepted; a far away pointer simply repels nothing.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = [x, y];
    }

    /// Replaces the configuration. Only takes effect while stopped; returns
    /// whether it was applied.
    pub fn reconfigure(&mut self, config: FieldConfig) -> bool {
        if self.running {
            return false;
        }
        self.config = config;
        true
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// One logical tick. No-op while stopped.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }
        for particle in &mut self.particles {
            motion::step(particle, self.viewport, self.pointer, &self.config);
            self.surface.place_marker(&particle.marker, particle.pos);
        }
        self.ticks += 1;
    }

    /// Releases every marker and drops the particles. Returns how many markers
    /// were released; a second call releases nothing.
    pub fn stop(&mut self) -> usize {
        if !self.running {
            return 0;
        }
        self.running = false;
        let released = self.particles.len();
        for particle in self.particles.drain(..) {
            self.surface.release_marker(particle.marker);
        }
        released
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle<S::Marker>] {
        &self.particles
    }

    pub fn pointer(&self) -> [f64; 2] {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: MarkerSurface> Drop for ParticleField<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
