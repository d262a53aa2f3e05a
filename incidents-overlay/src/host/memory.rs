use std::collections::{HashMap, HashSet};

use incidents_types::{CartesianPoint2d, LngLat, Rect, ScreenPoint, Size};
use log::debug;

use crate::control::{ClickEvent, MapEvent};
use crate::decoded_image::DecodedImage;
use crate::error::IncidentsError;
use crate::feature::IncidentFeature;
use crate::host::{
    ControlContainer, Cursor, FitBoundsOptions, MapHost, Popup, PopupId, RenderedFeature,
    SourceSpec,
};
use crate::layer::{Filter, LayerKind, LayerSpec, SYMBOL_RADIUS};

#[derive(Debug)]
struct Source {
    spec: SourceSpec,
    features: Vec<IncidentFeature>,
}

/// Headless [`MapHost`] keeping everything in memory.
///
/// The viewport is a plain linear mapping between screen pixels and degrees: `resolution` degrees
/// per pixel on both axes, with the screen `y` axis pointing south. Rendering is emulated only as
/// far as hit tests need it:
/// * symbol layers are hit within [`SYMBOL_RADIUS`] pixels from the point, circle layers within
///   their radius plus stroke width,
/// * fill layers are hit inside the polygon,
/// * line layers are never hit.
///
/// Layers added later are drawn on top, and within a layer later features are drawn on top, so
/// [`MapHost::query_rendered_features`] returns the last layer and the last feature first.
///
/// Events that a real map would fire (popup close, mouse enter and leave) are queued and can be
/// drained with [`MemoryMap::take_events`].
#[derive(Debug)]
pub struct MemoryMap {
    center: LngLat,
    resolution: f64,
    size: Size,
    sources: HashMap<String, Source>,
    layers: Vec<LayerSpec>,
    images: HashMap<String, DecodedImage>,
    containers: Vec<ControlContainer>,
    popups: Vec<(PopupId, Popup)>,
    next_popup_id: u64,
    cursor: Cursor,
    hovered: HashSet<String>,
    fit_history: Vec<(Rect, FitBoundsOptions)>,
    events: Vec<MapEvent>,
}

impl MemoryMap {
    /// Creates an empty map showing `size` pixels around `center` with `resolution` degrees per
    /// pixel.
    pub fn new(center: LngLat, resolution: f64, size: Size) -> Self {
        Self {
            center,
            resolution,
            size,
            sources: HashMap::new(),
            layers: vec![],
            images: HashMap::new(),
            containers: vec![],
            popups: vec![],
            next_popup_id: 0,
            cursor: Cursor::Default,
            hovered: HashSet::new(),
            fit_history: vec![],
            events: vec![],
        }
    }

    /// Center of the viewport.
    pub fn center(&self) -> LngLat {
        self.center
    }

    /// Degrees per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Size of the viewport in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Geographic position shown at the screen point.
    pub fn screen_to_lnglat(&self, point: ScreenPoint) -> LngLat {
        LngLat::new(
            self.center.lng() + (point.x() - self.size.width() / 2.0) * self.resolution,
            self.center.lat() - (point.y() - self.size.height() / 2.0) * self.resolution,
        )
    }

    /// Screen point the geographic position is shown at. The result can be outside of the
    /// viewport.
    pub fn lnglat_to_screen(&self, position: &LngLat) -> ScreenPoint {
        ScreenPoint::new(
            (position.lng() - self.center.lng()) / self.resolution + self.size.width() / 2.0,
            (self.center.lat() - position.lat()) / self.resolution + self.size.height() / 2.0,
        )
    }

    /// Click event at the screen point.
    pub fn click_event(&self, point: ScreenPoint) -> ClickEvent {
        ClickEvent {
            point,
            lng_lat: self.screen_to_lnglat(point),
        }
    }

    /// Click event at the screen point the geographic position is shown at.
    pub fn click_event_at(&self, position: &LngLat) -> ClickEvent {
        ClickEvent {
            point: self.lnglat_to_screen(position),
            lng_lat: *position,
        }
    }

    /// Replaces the features of the source, as if the source url returned them.
    pub fn set_source_data(
        &mut self,
        source_id: &str,
        features: Vec<IncidentFeature>,
    ) -> Result<(), IncidentsError> {
        let source = self
            .sources
            .get_mut(source_id)
            .ok_or(IncidentsError::NotFound)?;
        debug!("Source {source_id} now has {} features", features.len());
        source.features = features;

        Ok(())
    }

    /// Declaration of the source.
    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id).map(|source| &source.spec)
    }

    /// Layer declaration with its current filter.
    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Ids of the layers from bottom to top.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.id.as_str()).collect()
    }

    /// Current filter of the layer.
    pub fn filter(&self, layer_id: &str) -> Option<&Filter> {
        self.layer(layer_id).map(|layer| &layer.filter)
    }

    /// Names of the registered images, sorted.
    pub fn image_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Open popups in the order they were shown.
    pub fn popups(&self) -> impl Iterator<Item = (PopupId, &Popup)> {
        self.popups.iter().map(|(id, popup)| (*id, popup))
    }

    /// Open popup with the id.
    pub fn popup(&self, id: PopupId) -> Option<&Popup> {
        self.popups
            .iter()
            .find_map(|(popup_id, popup)| (*popup_id == id).then_some(popup))
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Attached control containers.
    pub fn containers(&self) -> &[ControlContainer] {
        &self.containers
    }

    /// All viewport animations requested so far.
    pub fn fit_history(&self) -> &[(Rect, FitBoundsOptions)] {
        &self.fit_history
    }

    /// Closes the popup as if the user did, queueing [`MapEvent::PopupClosed`].
    pub fn close_popup(&mut self, id: PopupId) {
        self.remove_popup(id);
    }

    /// Moves the pointer to the screen point, queueing mouse enter and leave events for the
    /// layers which features start or stop being under the pointer.
    pub fn pointer_moved(&mut self, point: ScreenPoint) {
        let under_pointer: HashSet<String> = self
            .layers
            .iter()
            .filter(|layer| !self.hit_features(layer, point).is_empty())
            .map(|layer| layer.id.clone())
            .collect();

        for layer in &self.layers {
            let was_hovered = self.hovered.contains(&layer.id);
            let is_hovered = under_pointer.contains(&layer.id);
            if is_hovered && !was_hovered {
                self.events.push(MapEvent::MouseEnter {
                    layer_id: layer.id.clone(),
                });
            } else if was_hovered && !is_hovered {
                self.events.push(MapEvent::MouseLeave {
                    layer_id: layer.id.clone(),
                });
            }
        }

        self.hovered = under_pointer;
    }

    /// Drains the queued events.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    fn hit_features(&self, layer: &LayerSpec, point: ScreenPoint) -> Vec<&IncidentFeature> {
        let Some(source) = self.sources.get(&layer.source) else {
            return vec![];
        };

        let position = self.screen_to_lnglat(point);
        source
            .features
            .iter()
            .rev()
            .filter(|feature| layer.filter.evaluate(feature))
            .filter(|feature| match &layer.kind {
                LayerKind::Symbol(_) => self.point_hit(feature, point, SYMBOL_RADIUS),
                LayerKind::Circle(paint) => {
                    self.point_hit(feature, point, paint.radius + paint.stroke_width)
                }
                LayerKind::Fill(_) => feature.geometry.contains(&position),
                LayerKind::Line(_) => false,
            })
            .collect()
    }

    fn point_hit(&self, feature: &IncidentFeature, point: ScreenPoint, radius: f64) -> bool {
        feature.geometry.as_point().is_some_and(|position| {
            self.lnglat_to_screen(&position).distance_sq(&point) <= radius * radius
        })
    }
}

impl MapHost for MemoryMap {
    fn add_container(&mut self, container: &ControlContainer) {
        self.containers.push(container.clone());
    }

    fn remove_container(&mut self, container: &ControlContainer) {
        self.containers.retain(|c| c != container);
    }

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), IncidentsError> {
        if self.sources.contains_key(id) {
            return Err(IncidentsError::AlreadyExists(format!("source {id}")));
        }

        self.sources.insert(
            id.to_string(),
            Source {
                spec: source,
                features: vec![],
            },
        );

        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> bool {
        self.sources.remove(id).is_some()
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), IncidentsError> {
        if self.has_layer(&layer.id) {
            return Err(IncidentsError::AlreadyExists(format!("layer {}", layer.id)));
        }
        if !self.has_source(&layer.source) {
            return Err(IncidentsError::Generic(format!(
                "layer {} references unknown source {}",
                layer.id, layer.source
            )));
        }

        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> bool {
        let count = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.hovered.remove(id);
        self.layers.len() != count
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    fn set_filter(&mut self, layer_id: &str, filter: Filter) -> Result<(), IncidentsError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.id == layer_id)
            .ok_or(IncidentsError::NotFound)?;
        layer.filter = filter;

        Ok(())
    }

    fn add_image(&mut self, name: &str, image: DecodedImage) -> Result<(), IncidentsError> {
        if self.images.contains_key(name) {
            return Err(IncidentsError::AlreadyExists(format!("image {name}")));
        }

        self.images.insert(name.to_string(), image);
        Ok(())
    }

    fn remove_image(&mut self, name: &str) -> bool {
        self.images.remove(name).is_some()
    }

    fn has_image(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layers: &[String],
    ) -> Vec<RenderedFeature> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layers.contains(&layer.id))
            .flat_map(|layer| {
                self.hit_features(layer, point)
                    .into_iter()
                    .map(|feature| RenderedFeature {
                        layer_id: layer.id.clone(),
                        feature: feature.clone(),
                    })
            })
            .collect()
    }

    fn query_source_features(&self, source_id: &str, filter: &Filter) -> Vec<IncidentFeature> {
        self.sources
            .get(source_id)
            .map(|source| {
                source
                    .features
                    .iter()
                    .filter(|feature| filter.evaluate(feature))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn bounds(&self) -> Rect {
        let half_width = self.size.width() / 2.0 * self.resolution;
        let half_height = self.size.height() / 2.0 * self.resolution;
        Rect::new(
            self.center.lng() - half_width,
            self.center.lat() - half_height,
            self.center.lng() + half_width,
            self.center.lat() + half_height,
        )
    }

    fn fit_bounds(&mut self, bounds: Rect, options: FitBoundsOptions) {
        self.fit_history.push((bounds, options));

        let Some((lng, lat)) = bounds.center() else {
            return;
        };
        let available_width = self.size.width() - 2.0 * options.padding;
        let available_height = self.size.height() - 2.0 * options.padding;
        if available_width <= 0.0 || available_height <= 0.0 {
            return;
        }

        let resolution = (bounds.width() / available_width).max(bounds.height() / available_height);
        self.center = LngLat::new(lng, lat);
        if resolution > 0.0 {
            self.resolution = resolution;
        }
    }

    fn show_popup(&mut self, popup: Popup) -> PopupId {
        let id = PopupId(self.next_popup_id);
        self.next_popup_id += 1;
        self.popups.push((id, popup));

        id
    }

    fn remove_popup(&mut self, id: PopupId) {
        let count = self.popups.len();
        self.popups.retain(|(popup_id, _)| *popup_id != id);
        if self.popups.len() != count {
            self.events.push(MapEvent::PopupClosed(id));
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}
