//! The interface between the overlay and the map it is attached to.
//!
//! The overlay never renders anything itself. It declares a source and layers, registers icon
//! images, queries features and shows popups through the [`MapHost`] trait. A web map library
//! binding implements the trait on top of the library; [`MemoryMap`] implements it in memory for
//! headless use and tests.

use incidents_types::{LngLat, Rect, ScreenPoint};

use crate::decoded_image::DecodedImage;
use crate::error::IncidentsError;
use crate::feature::IncidentFeature;
use crate::layer::{Filter, LayerSpec};

mod memory;

pub use memory::MemoryMap;

/// Source of features for the overlay layers.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    /// GeoJSON document loaded (and refreshed) by the map from the url.
    GeoJson {
        /// Url of the document.
        url: String,
    },
}

/// A feature found under a screen point, together with the layer it was rendered by.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    /// Id of the layer that rendered the feature.
    pub layer_id: String,
    /// The feature.
    pub feature: IncidentFeature,
}

/// Options of a viewport animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBoundsOptions {
    /// Space in pixels left between the bounds and the viewport edges.
    pub padding: f64,
}

/// Identifier of a popup shown by the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PopupId(pub u64);

/// Popup to be shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Position the popup points at.
    pub lng_lat: LngLat,
    /// Distance in pixels between the popup tip and the position.
    pub offset: Option<f64>,
    /// Whether the popup shows its own close button.
    pub close_button: bool,
    /// Popup content.
    pub html: String,
}

/// Mouse cursor over the map.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Cursor of the map library.
    #[default]
    Default,
    /// Cursor indicating a clickable object.
    Pointer,
}

/// Element of the map controls area owned by an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlContainer {
    /// CSS class of the element.
    pub class_name: String,
}

impl ControlContainer {
    /// Creates a new container description.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

/// Map capabilities the overlay relies on.
///
/// Events the overlay handles (clicks, hover, popup close) are delivered by the host calling
/// [`MapEventHandler::handle`](crate::control::MapEventHandler::handle) on the
/// [`MajorIncidentsOverlay`](crate::control::MajorIncidentsOverlay).
pub trait MapHost {
    /// Adds the overlay container to the map controls.
    fn add_container(&mut self, container: &ControlContainer);
    /// Removes the overlay container from the map controls.
    fn remove_container(&mut self, container: &ControlContainer);

    /// Adds a feature source. Fails if a source with the same id exists.
    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), IncidentsError>;
    /// Removes a source. Returns false if there was no such source.
    fn remove_source(&mut self, id: &str) -> bool;
    /// Returns true if the source exists.
    fn has_source(&self, id: &str) -> bool;

    /// Adds a layer on top of the existing ones. Fails if a layer with the same id exists.
    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), IncidentsError>;
    /// Removes a layer. Returns false if there was no such layer.
    fn remove_layer(&mut self, id: &str) -> bool;
    /// Returns true if the layer exists.
    fn has_layer(&self, id: &str) -> bool;
    /// Replaces the filter of the layer.
    fn set_filter(&mut self, layer_id: &str, filter: Filter) -> Result<(), IncidentsError>;

    /// Registers an image to be referenced by symbol layers. Fails if the name is taken.
    fn add_image(&mut self, name: &str, image: DecodedImage) -> Result<(), IncidentsError>;
    /// Removes an image. Returns false if there was no such image.
    fn remove_image(&mut self, name: &str) -> bool;
    /// Returns true if the image is registered.
    fn has_image(&self, name: &str) -> bool;

    /// Features rendered at the screen point by any of the given layers, topmost first.
    fn query_rendered_features(&self, point: ScreenPoint, layers: &[String]) -> Vec<RenderedFeature>;
    /// Features of the source passing the filter, regardless of whether they are visible.
    fn query_source_features(&self, source_id: &str, filter: &Filter) -> Vec<IncidentFeature>;

    /// Geographic bounds of the current viewport.
    fn bounds(&self) -> Rect;
    /// Animates the viewport to show the bounds.
    fn fit_bounds(&mut self, bounds: Rect, options: FitBoundsOptions);

    /// Shows a popup. The host reports its closing with
    /// [`MapEvent::PopupClosed`](crate::control::MapEvent::PopupClosed), whether it was closed by
    /// the user or by [`MapHost::remove_popup`].
    fn show_popup(&mut self, popup: Popup) -> PopupId;
    /// Closes the popup. Does nothing if it is already closed.
    fn remove_popup(&mut self, id: PopupId);

    /// Sets the mouse cursor over the map.
    fn set_cursor(&mut self, cursor: Cursor);
}
