// Seam between the simulation and whatever draws it. Each particle owns one
// marker; the field creates it at start, moves it every tick, and hands it
// back by value on stop so it cannot be released twice.

use crate::error::FieldError;
use crate::particle::MarkerStyle;

pub trait MarkerSurface {
    type Marker;

    fn create_marker(&mut self, style: MarkerStyle) -> Result<Self::Marker, FieldError>;

    fn place_marker(&mut self, marker: &Self::Marker, pos: [f64; 2]);

    fn release_marker(&mut self, marker: Self::Marker);
}
