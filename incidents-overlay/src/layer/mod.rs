//! Declarations of the overlay layers.
//!
//! All five layers draw the same GeoJSON source:
//!
//! | layer                 | kind   | draws                                       |
//! |-----------------------|--------|---------------------------------------------|
//! | `-fill`               | fill   | incident areas                              |
//! | `-outline`            | line   | borders of incident areas                   |
//! | `-outline-selected`   | line   | border of the selected incident area        |
//! | `-symbol`             | symbol | incident locations with a status icon       |
//! | `-symbol-selected`    | circle | ring around the selected incident location  |
//!
//! The two `-selected` layers use [`Filter::selected`], so updating their filters is all it
//! takes to move the highlight.

use incidents_types::GeometryType;
use serde_json::{json, Value};

use crate::Color;

mod expression;
mod icon;

pub use expression::{Filter, NO_SELECTION};
pub use icon::{icon_url, load_icons, IconImageRule, IconKey};

#[cfg(test)]
pub(crate) use icon::tests::TestPlatform;

/// Prefix of the source, layer and image ids registered by the overlay.
pub const DEFAULT_PREFIX: &str = "_nswrfsmajorincidents";

/// Radius of the status icons in pixels.
pub const SYMBOL_RADIUS: f64 = 15.0;
/// Stroke width of the selection ring around a status icon.
pub const SELECTED_STROKE_WIDTH: f64 = 4.0;
/// Distance between a popup tip and the incident location when the popup points at an icon.
pub const SYMBOL_POPUP_OFFSET: f64 = SYMBOL_RADIUS + SELECTED_STROKE_WIDTH;

/// Paint of a fill layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPaint {
    /// Fill color.
    pub color: Color,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Paint of a line layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePaint {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Layout of a symbol layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolLayout {
    /// Image to draw each feature with.
    pub icon_image: IconImageRule,
    /// Draw icons even if they collide with other symbols.
    pub icon_allow_overlap: bool,
}

/// Paint of a circle layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePaint {
    /// Fill opacity.
    pub opacity: f64,
    /// Radius in pixels.
    pub radius: f64,
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Stroke opacity.
    pub stroke_opacity: f64,
}

/// Kind of the layer together with its style.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Filled polygons.
    Fill(FillPaint),
    /// Lines or polygon borders.
    Line(LinePaint),
    /// Point icons.
    Symbol(SymbolLayout),
    /// Point circles.
    Circle(CirclePaint),
}

/// Declaration of a single layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Unique id of the layer in the map.
    pub id: String,
    /// Id of the source the layer draws.
    pub source: String,
    /// Layer kind and style.
    pub kind: LayerKind,
    /// Features of the source the layer draws.
    pub filter: Filter,
}

impl LayerSpec {
    /// Layer declaration in the style format of web map libraries.
    pub fn to_json(&self) -> Value {
        let (kind, paint, layout) = match &self.kind {
            LayerKind::Fill(paint) => (
                "fill",
                json!({"fill-color": paint.color.to_css(), "fill-opacity": paint.opacity}),
                None,
            ),
            LayerKind::Line(paint) => (
                "line",
                json!({"line-color": paint.color.to_css(), "line-width": paint.width}),
                None,
            ),
            LayerKind::Symbol(layout) => (
                "symbol",
                json!({}),
                Some(json!({
                    "icon-image": layout.icon_image.to_json(),
                    "icon-allow-overlap": layout.icon_allow_overlap,
                })),
            ),
            LayerKind::Circle(paint) => (
                "circle",
                json!({
                    "circle-opacity": paint.opacity,
                    "circle-stroke-color": paint.stroke_color.to_css(),
                    "circle-radius": paint.radius,
                    "circle-stroke-width": paint.stroke_width,
                    "circle-stroke-opacity": paint.stroke_opacity,
                }),
                None,
            ),
        };

        let mut layer = json!({
            "id": self.id,
            "source": self.source,
            "type": kind,
            "paint": paint,
            "filter": self.filter.to_json(),
        });
        if let (Some(layout), Some(object)) = (layout, layer.as_object_mut()) {
            object.insert("layout".to_string(), layout);
        }

        layer
    }
}

/// Ids and declarations of the overlay source and layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    prefix: String,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl LayerSet {
    /// Creates a layer set which ids start with the `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix of all ids.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Id of the incidents source.
    pub fn source_id(&self) -> &str {
        &self.prefix
    }

    /// Id of the incident areas layer.
    pub fn fill_id(&self) -> String {
        format!("{}-fill", self.prefix)
    }

    /// Id of the incident area borders layer.
    pub fn outline_id(&self) -> String {
        format!("{}-outline", self.prefix)
    }

    /// Id of the selected incident area border layer.
    pub fn outline_selected_id(&self) -> String {
        format!("{}-outline-selected", self.prefix)
    }

    /// Id of the incident locations layer.
    pub fn symbol_id(&self) -> String {
        format!("{}-symbol", self.prefix)
    }

    /// Id of the selected incident location layer.
    pub fn symbol_selected_id(&self) -> String {
        format!("{}-symbol-selected", self.prefix)
    }

    /// Name of the icon image in the map.
    pub fn image_name(&self, icon: IconKey) -> String {
        icon.image_name(&self.prefix)
    }

    /// Layers that react to clicks and hover, topmost first.
    pub fn interactive_layer_ids(&self) -> [String; 2] {
        [self.symbol_id(), self.fill_id()]
    }

    /// Ids of all layers in the order they are added.
    pub fn layer_ids(&self) -> [String; 5] {
        [
            self.fill_id(),
            self.outline_id(),
            self.outline_selected_id(),
            self.symbol_id(),
            self.symbol_selected_id(),
        ]
    }

    /// Filter of the `-selected` layer drawing the given geometry type.
    pub fn selected_filter(&self, geometry_type: GeometryType, guid: Option<&str>) -> Filter {
        Filter::selected(geometry_type, guid)
    }

    /// Layers that do not need icons: fill, outline and outline-selected.
    pub fn area_layers(&self) -> [LayerSpec; 3] {
        [
            self.layer(
                self.fill_id(),
                LayerKind::Fill(FillPaint {
                    color: Color::RED,
                    opacity: 0.5,
                }),
                Filter::geometry(GeometryType::Polygon),
            ),
            self.layer(
                self.outline_id(),
                LayerKind::Line(LinePaint {
                    color: Color::RED,
                    width: 2.0,
                }),
                Filter::geometry(GeometryType::Polygon),
            ),
            self.layer(
                self.outline_selected_id(),
                LayerKind::Line(LinePaint {
                    color: Color::BLUE,
                    width: 2.0,
                }),
                self.selected_filter(GeometryType::Polygon, None),
            ),
        ]
    }

    /// Layers drawing incident locations: symbol and symbol-selected. The symbol layer references
    /// the icon images, so they must be registered first.
    pub fn point_layers(&self) -> [LayerSpec; 2] {
        [
            self.layer(
                self.symbol_id(),
                LayerKind::Symbol(SymbolLayout {
                    icon_image: IconImageRule::new(self.prefix.clone()),
                    icon_allow_overlap: true,
                }),
                Filter::geometry(GeometryType::Point),
            ),
            self.layer(
                self.symbol_selected_id(),
                LayerKind::Circle(CirclePaint {
                    opacity: 0.0,
                    radius: SYMBOL_RADIUS - 1.0,
                    stroke_color: Color::BLUE,
                    stroke_width: SELECTED_STROKE_WIDTH,
                    stroke_opacity: 0.8,
                }),
                self.selected_filter(GeometryType::Point, None),
            ),
        ]
    }

    fn layer(&self, id: String, kind: LayerKind, filter: Filter) -> LayerSpec {
        LayerSpec {
            id,
            source: self.source_id().to_string(),
            kind,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed() {
        let layers = LayerSet::default();

        assert_eq!(layers.source_id(), "_nswrfsmajorincidents");
        assert_eq!(
            layers.layer_ids(),
            [
                "_nswrfsmajorincidents-fill",
                "_nswrfsmajorincidents-outline",
                "_nswrfsmajorincidents-outline-selected",
                "_nswrfsmajorincidents-symbol",
                "_nswrfsmajorincidents-symbol-selected",
            ]
        );
        assert_eq!(
            layers.image_name(IconKey::OutOfControl),
            "_nswrfsmajorincidents-out-of-control"
        );
    }

    #[test]
    fn declarations_match_ids() {
        let layers = LayerSet::new("x");
        let declared: Vec<_> = layers
            .area_layers()
            .into_iter()
            .chain(layers.point_layers())
            .map(|l| l.id)
            .collect();

        assert_eq!(declared, layers.layer_ids());
    }

    #[test]
    fn selected_layers_start_empty() {
        let layers = LayerSet::default();

        assert_eq!(
            layers.area_layers()[2].filter.selected_guid(),
            Some(NO_SELECTION)
        );
        assert_eq!(
            layers.point_layers()[1].filter.selected_guid(),
            Some(NO_SELECTION)
        );
    }

    #[test]
    fn circle_layer_json() {
        let layers = LayerSet::new("p");
        let json = layers.point_layers()[1].to_json();

        assert_eq!(json["type"], "circle");
        assert_eq!(json["source"], "p");
        assert_eq!(json["paint"]["circle-radius"], 14.0);
        assert_eq!(json["paint"]["circle-stroke-width"], 4.0);
        assert_eq!(
            json["filter"],
            json!(["all", ["==", "$type", "Point"], ["==", "guid", ""]])
        );
        assert!(json.get("layout").is_none());
    }

    #[test]
    fn symbol_layer_json() {
        let json = LayerSet::new("p").point_layers()[0].to_json();

        assert_eq!(json["type"], "symbol");
        assert_eq!(json["layout"]["icon-allow-overlap"], true);
        assert_eq!(json["layout"]["icon-image"][0], "case");
    }
}
