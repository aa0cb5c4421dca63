// Particle record: position and velocity change every tick, size and opacity
// are fixed at creation, and the marker is owned by this particle alone

use crate::viewport::Viewport;
use rand::Rng;

pub struct Particle<M> {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub opacity: f64,
    pub marker: M,
}

impl<M> Particle<M> {
    pub fn from_seed(seed: ParticleSeed, marker: M) -> Particle<M> {
        Particle {
            pos: seed.pos,
            vel: seed.vel,
            radius: seed.radius,
            opacity: seed.opacity,
            marker,
        }
    }
}

// Everything about a particle except its marker
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleSeed {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub opacity: f64,
}

impl ParticleSeed {
    pub const MAX_INITIAL_SPEED: f64 = 1.0;
    pub const MIN_RADIUS: f64 = 2.0;
    pub const MAX_RADIUS: f64 = 5.0;
    pub const MIN_OPACITY: f64 = 0.1;
    pub const MAX_OPACITY: f64 = 0.3;

    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, opacity: f64) -> ParticleSeed {
        ParticleSeed {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport) -> ParticleSeed {
        let pos = viewport.clamp([
            rng.gen::<f64>() * viewport.width_f64(),
            rng.gen::<f64>() * viewport.height_f64(),
        ]);
        let max_vel = ParticleSeed::MAX_INITIAL_SPEED;
        let vel = [
            rng.gen_range(-max_vel, max_vel),
            rng.gen_range(-max_vel, max_vel),
        ];
        let radius = rng.gen_range(ParticleSeed::MIN_RADIUS, ParticleSeed::MAX_RADIUS);
        let opacity = rng.gen_range(ParticleSeed::MIN_OPACITY, ParticleSeed::MAX_OPACITY);
        ParticleSeed::new(pos, vel, radius, opacity)
    }

    pub fn style(&self) -> MarkerStyle {
        MarkerStyle {
            radius: self.radius,
            opacity: self.opacity,
        }
    }
}

// What a surface needs to know to draw a particle's marker
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub opacity: f64,
}
