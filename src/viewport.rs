// Rectangle the particles live in, measured in pixels from the top-left corner

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }

    // A zero-area viewport pins every particle to the single point it has left
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, pos: [f64; 2]) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width_f64() && pos[1] >= 0.0 && pos[1] <= self.height_f64()
    }

    pub fn clamp(&self, pos: [f64; 2]) -> [f64; 2] {
        [
            pos[0].max(0.0).min(self.width_f64()),
            pos[1].max(0.0).min(self.height_f64()),
        ]
    }
}
