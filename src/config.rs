// Options for a particle field. Fixed once the field is started.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: u32,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    /// Upper bound on particle speed in px/tick. `None` lets repeated
    /// repulsion accumulate speed without limit.
    pub max_speed: Option<f64>,
}

impl FieldConfig {
    pub const PARTICLE_COUNT: u32 = 50;
    pub const REPULSION_RADIUS: f64 = 100.0;
    pub const REPULSION_STRENGTH: f64 = 0.1;

    pub fn with_particle_count(mut self, particle_count: u32) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_repulsion(mut self, radius: f64, strength: f64) -> Self {
        self.repulsion_radius = radius;
        self.repulsion_strength = strength;
        self
    }

    pub fn with_max_speed(mut self, max_speed: Option<f64>) -> Self {
        self.max_speed = max_speed;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: FieldConfig::PARTICLE_COUNT,
            repulsion_radius: FieldConfig::REPULSION_RADIUS,
            repulsion_strength: FieldConfig::REPULSION_STRENGTH,
            max_speed: None,
        }
    }
}
