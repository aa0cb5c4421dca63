// RGBA color with straight (non-premultiplied) alpha, created from an
// unsigned 32 representing RRGGBBAA
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn with_opacity(self, opacity: f64) -> Color {
        let a = (self.a as f64 * opacity.max(0.0).min(1.0)).round() as u8;
        Color { a, ..self }
    }

    // Source-over compositing of self onto dst
    pub fn blend_over(self, dst: Color) -> Color {
        let src_a = self.a as f64 / 255.0;
        let dst_a = dst.a as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }
        let channel = |s: u8, d: u8| -> u8 {
            let c = (s as f64 * src_a + d as f64 * dst_a * (1.0 - src_a)) / out_a;
            c.round().max(0.0).min(255.0) as u8
        };
        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}
