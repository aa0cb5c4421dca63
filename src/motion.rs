// Per-tick update steps for a single particle. One call to `step` is one
// logical tick: velocities are px/tick and there is no delta-time scaling,
// so perceived speed follows however often the host ticks.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::viewport::Viewport;
use vecmath::Vector2;

pub fn step<M>(particle: &mut Particle<M>, viewport: Viewport, pointer: Vector2<f64>, config: &FieldConfig) {
    integrate(particle);
    bounce(particle, viewport);
    particle.pos = viewport.clamp(particle.pos);
    repel(particle, pointer, config.repulsion_radius, config.repulsion_strength);
    if let Some(max_speed) = config.max_speed {
        limit_speed(particle, max_speed);
    }
}

pub fn integrate<M>(particle: &mut Particle<M>) {
    particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
}

// Each axis is tested on its own; touching an edge counts as a hit
pub fn bounce<M>(particle: &mut Particle<M>, viewport: Viewport) {
    if particle.pos[0] <= 0.0 || particle.pos[0] >= viewport.width_f64() {
        particle.vel[0] *= -1.0;
    }
    if particle.pos[1] <= 0.0 || particle.pos[1] >= viewport.height_f64() {
        particle.vel[1] *= -1.0;
    }
}

// Constant-size push away from the pointer whenever it is closer than
// `radius`. Not weighted by distance. A particle sitting exactly on the
// pointer gets atan2(0, 0) = 0 and is pushed towards -x.
pub fn repel<M>(particle: &mut Particle<M>, pointer: Vector2<f64>, radius: f64, strength: f64) {
    let to_pointer = vecmath::vec2_sub(pointer, particle.pos);
    let distance = vecmath::vec2_len(to_pointer);
    if distance < radius {
        let angle = to_pointer[1].atan2(to_pointer[0]);
        let push = vecmath::vec2_scale([angle.cos(), angle.sin()], strength);
        particle.vel = vecmath::vec2_sub(particle.vel, push);
    }
}

pub fn limit_speed<M>(particle: &mut Particle<M>, max_speed: f64) {
    let max_speed = max_speed.max(0.0);
    let speed = vecmath::vec2_len(particle.vel);
    if speed > max_speed {
        particle.vel = vecmath::vec2_scale(particle.vel, max_speed / speed);
    }
}
