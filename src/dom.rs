// Marker surface backed by one absolutely positioned <div class="particle">
// per particle, appended to a container element

use crate::error::FieldError;
use crate::particle::MarkerStyle;
use crate::surface::MarkerSurface;
use crate::viewport::Viewport;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub struct DomMarkers {
    document: Document,
    container: HtmlElement,
    color: String,
}

impl DomMarkers {
    pub const CLASS_NAME: &'static str = "particle";
    pub const DEFAULT_COLOR: &'static str = "#64ffda";

    pub fn new(document: Document, container: HtmlElement) -> DomMarkers {
        DomMarkers {
            document,
            container,
            color: DomMarkers::DEFAULT_COLOR.to_owned(),
        }
    }

    pub fn from_element_id(document: Document, container_id: &str) -> Result<DomMarkers, FieldError> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| FieldError::MissingElement(container_id.to_owned()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| FieldError::Dom(format!("`{}` is not an HTML element", container_id)))?;
        Ok(DomMarkers::new(document, container))
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_owned();
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.container.client_width().max(0) as u32,
            self.container.client_height().max(0) as u32,
        )
    }

    // Pointer position relative to the container's top-left corner
    pub fn to_local(&self, client_x: f64, client_y: f64) -> [f64; 2] {
        let rect = self.container.get_bounding_client_rect();
        [client_x - rect.left(), client_y - rect.top()]
    }
}

impl MarkerSurface for DomMarkers {
    type Marker = HtmlElement;

    fn create_marker(&mut self, style: MarkerStyle) -> Result<HtmlElement, FieldError> {
        let element = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| FieldError::Dom("created element is not an HTML element".to_owned()))?;
        element.set_class_name(DomMarkers::CLASS_NAME);

        let size = format!("{}px", style.radius * 2.0);
        let css = element.style();
        css.set_property("position", "absolute")?;
        css.set_property("pointer-events", "none")?;
        css.set_property("border-radius", "50%")?;
        css.set_property("width", &size)?;
        css.set_property("height", &size)?;
        css.set_property("background", &self.color)?;
        css.set_property("opacity", &style.opacity.to_string())?;

        self.container.append_child(&element)?;
        Ok(element)
    }

    fn place_marker(&mut self, marker: &HtmlElement, pos: [f64; 2]) {
        let css = marker.style();
        let _ = css.set_property("left", &format!("{}px", pos[0]));
        let _ = css.set_property("top", &format!("{}px", pos[1]));
    }

    fn release_marker(&mut self, marker: HtmlElement) {
        marker.remove();
    }
}
