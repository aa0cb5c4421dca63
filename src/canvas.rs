// Marker surface that draws every particle as a round dot into an RGBA pixel
// buffer, then pushes the whole buffer to a 2d canvas in one put_image_data

use crate::color::Color;
use crate::error::FieldError;
use crate::particle::MarkerStyle;
use crate::surface::MarkerSurface;
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

// Handle to one dot slot. Deliberately not Clone.
#[derive(Debug, PartialEq, Eq)]
pub struct DotId(usize);

#[derive(Copy, Clone)]
struct Dot {
    pos: [f64; 2],
    radius: f64,
    opacity: f64,
}

// RGBA bytes for a width x height image, counted in usize so large canvases
// cannot wrap
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
    dots: Vec<Option<Dot>>,
    free_slots: Vec<usize>,
    color: Color,
}

impl PixelCanvas {
    pub const DEFAULT_COLOR: u32 = 0x64ffdaff;

    pub fn new(width: u32, height: u32) -> PixelCanvas {
        PixelCanvas {
            width,
            height,
            pixel_data: vec![0x00; buffer_len(width, height)],
            dots: Vec::new(),
            free_slots: Vec::new(),
            color: Color::from_u32(PixelCanvas::DEFAULT_COLOR),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixel_data = vec![0x00; buffer_len(width, height)];
    }

    pub fn live_dots(&self) -> usize {
        self.dots.iter().filter(|d| d.is_some()).count()
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel_index(x, y).map(|idx| Color {
            r: self.pixel_data[idx],
            g: self.pixel_data[idx + 1],
            b: self.pixel_data[idx + 2],
            a: self.pixel_data[idx + 3],
        })
    }

    /// Clears the buffer and draws every live dot into it.
    pub fn draw(&mut self) {
        for byte in self.pixel_data.iter_mut() {
            *byte = 0x00;
        }
        for slot in 0..self.dots.len() {
            if let Some(dot) = self.dots[slot] {
                let color = self.color.with_opacity(dot.opacity);
                self.draw_disc(dot.pos, dot.radius, color);
            }
        }
    }

    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        self.draw();
        let image_data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.pixel_data[..]),
            self.width,
            self.height,
        )?;
        ctx.put_image_data(&image_data, 0.0, 0.0)
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.get_pixel_index(x, y) {
            let dst = Color {
                r: self.pixel_data[idx],
                g: self.pixel_data[idx + 1],
                b: self.pixel_data[idx + 2],
                a: self.pixel_data[idx + 3],
            };
            let out = color.blend_over(dst);
            self.pixel_data[idx] = out.r;
            self.pixel_data[idx + 1] = out.g;
            self.pixel_data[idx + 2] = out.b;
            self.pixel_data[idx + 3] = out.a;
        }
    }

    // A pixel is covered when its center lies inside the circle
    fn draw_disc(&mut self, center: [f64; 2], radius: f64, color: Color) {
        let min_x = (center[0] - radius).floor() as i32;
        let max_x = (center[0] + radius).ceil() as i32;
        let min_y = (center[1] - radius).floor() as i32;
        let max_y = (center[1] + radius).ceil() as i32;
        let radius_sq = radius * radius;
        for pixel_y in min_y..=max_y {
            for pixel_x in min_x..=max_x {
                let dx = pixel_x as f64 + 0.5 - center[0];
                let dy = pixel_y as f64 + 0.5 - center[1];
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(pixel_x, pixel_y, color);
                }
            }
        }
    }
}

impl MarkerSurface for PixelCanvas {
    type Marker = DotId;

    fn create_marker(&mut self, style: MarkerStyle) -> Result<DotId, FieldError> {
        let dot = Dot {
            pos: [0.0, 0.0],
            radius: style.radius,
            opacity: style.opacity,
        };
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.dots[slot] = Some(dot);
                slot
            }
            None => {
                self.dots.push(Some(dot));
                self.dots.len() - 1
            }
        };
        Ok(DotId(slot))
    }

    fn place_marker(&mut self, marker: &DotId, pos: [f64; 2]) {
        if let Some(Some(dot)) = self.dots.get_mut(marker.0) {
            dot.pos = pos;
        }
    }

    fn release_marker(&mut self, marker: DotId) {
        if let Some(slot) = self.dots.get_mut(marker.0) {
            if slot.take().is_some() {
                self.free_slots.push(marker.0);
            }
        }
    }
}
