use incidents_types::{GeometryType, LngLat, Rect};
use log::{debug, warn};

use crate::control::ClickEvent;
use crate::error::IncidentsError;
use crate::feature::IncidentFeature;
use crate::host::{FitBoundsOptions, MapHost, Popup, PopupId};
use crate::layer::{Filter, LayerSet, SYMBOL_POPUP_OFFSET};
use crate::popup::PopupRenderer;

/// Padding in pixels used when the viewport is expanded to show a clicked incident area.
pub const FIT_PADDING: f64 = 20.0;

/// Counter identifying a selection. Every selection change gets a larger value than any
/// previous one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Selected incident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Unselected,
    /// The incident with the `guid` is highlighted and its popup is open.
    Selected {
        /// Identifier of the incident.
        guid: String,
        /// Generation the selection was made in.
        generation: Generation,
    },
}

impl Selection {
    /// Identifier of the selected incident.
    pub fn guid(&self) -> Option<&str> {
        match self {
            Selection::Unselected => None,
            Selection::Selected { guid, .. } => Some(guid),
        }
    }

    /// Generation of the selection.
    pub fn generation(&self) -> Option<Generation> {
        match self {
            Selection::Unselected => None,
            Selection::Selected { generation, .. } => Some(*generation),
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct OpenPopup {
    id: PopupId,
    generation: Generation,
}

/// Where the popup of a clicked incident points to.
#[derive(Debug, Clone, PartialEq)]
struct Target {
    anchor: LngLat,
    offset: Option<f64>,
    viewport: Option<Rect>,
}

/// Owner of the selected incident.
///
/// Keeps the filters of the two `-selected` layers equal to the selected `guid` and drives the
/// popup lifecycle. At most one incident is selected at any time, and all popups of older
/// selections are dismissed before a new one is shown.
///
/// A popup close can be reported after a newer selection was already made (a user can close
/// one popup by clicking another incident, and the close notification of the old popup arrives
/// later). Each popup remembers the [`Generation`] it was opened in, and a close only clears the
/// selection of its own generation.
#[derive(Debug)]
pub struct SelectionController {
    layers: LayerSet,
    renderer: PopupRenderer,
    selection: Selection,
    generation: Generation,
    popups: Vec<OpenPopup>,
}

impl SelectionController {
    /// Creates a controller for the layers, rendering popups with the renderer.
    pub fn new(layers: LayerSet, renderer: PopupRenderer) -> Self {
        Self {
            layers,
            renderer,
            selection: Selection::Unselected,
            generation: Generation::default(),
            popups: vec![],
        }
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Identifier of the selected incident.
    pub fn selected_guid(&self) -> Option<&str> {
        self.selection.guid()
    }

    /// Handles a click on the map.
    ///
    /// The topmost incident under the pointer (icon or area) becomes selected and its popup is
    /// shown. A click on an empty place clears the selection. Returns the id of the shown popup.
    pub fn on_map_click(
        &mut self,
        host: &mut dyn MapHost,
        event: &ClickEvent,
    ) -> Result<Option<PopupId>, IncidentsError> {
        let symbol_id = self.layers.symbol_id();
        let fill_id = self.layers.fill_id();
        let hit = host
            .query_rendered_features(event.point, &self.layers.interactive_layer_ids())
            .into_iter()
            .find(|hit| hit.layer_id == symbol_id || hit.layer_id == fill_id);

        let Some(hit) = hit else {
            debug!("Click at {:?} hit no incident", event.lng_lat);
            self.clear(host)?;
            return Ok(None);
        };

        let feature = hit.feature;
        let target = if hit.layer_id == symbol_id {
            self.symbol_target(&feature, event)
        } else {
            self.area_target(host, &feature, event)
        };

        let html = self.renderer.render(&feature.properties)?;

        if let Some(viewport) = target.viewport {
            host.fit_bounds(
                viewport,
                FitBoundsOptions {
                    padding: FIT_PADDING,
                },
            );
        }

        self.dismiss_popups(host);
        self.generation = self.generation.next();
        let guid = feature.guid().to_string();
        debug!("Selecting incident {guid} in generation {:?}", self.generation);
        self.sync_filters(host, Some(&guid))?;
        self.selection = Selection::Selected {
            guid,
            generation: self.generation,
        };

        let id = host.show_popup(Popup {
            lng_lat: target.anchor,
            offset: target.offset,
            close_button: false,
            html,
        });
        self.popups.push(OpenPopup {
            id,
            generation: self.generation,
        });

        Ok(Some(id))
    }

    /// Handles the close of a popup reported by the host.
    ///
    /// Popups dismissed by the controller itself and popups of other controllers are ignored.
    pub fn on_popup_closed(
        &mut self,
        host: &mut dyn MapHost,
        id: PopupId,
    ) -> Result<(), IncidentsError> {
        let Some(index) = self.popups.iter().position(|popup| popup.id == id) else {
            return Ok(());
        };
        let popup = self.popups.remove(index);

        self.on_popup_close(host, popup.generation)
    }

    /// Clears the selection if the popup opened in `generation` belongs to it. A close coming
    /// from a superseded popup leaves the newer selection untouched.
    pub fn on_popup_close(
        &mut self,
        host: &mut dyn MapHost,
        generation: Generation,
    ) -> Result<(), IncidentsError> {
        if self.selection.generation() != Some(generation) {
            debug!("Ignoring close of a popup from superseded generation {generation:?}");
            return Ok(());
        }

        self.generation = self.generation.next();
        self.selection = Selection::Unselected;
        self.sync_filters(host, None)
    }

    /// Clears the selection, resets the `-selected` filters and dismisses the open popups.
    pub fn clear(&mut self, host: &mut dyn MapHost) -> Result<(), IncidentsError> {
        self.dismiss_popups(host);
        self.generation = self.generation.next();
        self.selection = Selection::Unselected;
        self.sync_filters(host, None)
    }

    /// Drops the selection and the open popups without touching layer filters. Used when the
    /// layers are being removed from the map.
    pub fn detach(&mut self, host: &mut dyn MapHost) {
        self.dismiss_popups(host);
        self.generation = self.generation.next();
        self.selection = Selection::Unselected;
    }

    fn symbol_target(&self, feature: &IncidentFeature, event: &ClickEvent) -> Target {
        match feature.geometry.as_point() {
            Some(anchor) => Target {
                anchor,
                offset: Some(SYMBOL_POPUP_OFFSET),
                viewport: None,
            },
            None => {
                warn!(
                    "Incident {} in the symbol layer has {} geometry",
                    feature.guid(),
                    feature.geometry_type()
                );
                Target {
                    anchor: event.lng_lat,
                    offset: None,
                    viewport: None,
                }
            }
        }
    }

    fn area_target(
        &self,
        host: &dyn MapHost,
        feature: &IncidentFeature,
        event: &ClickEvent,
    ) -> Target {
        let point = host
            .query_source_features(
                self.layers.source_id(),
                &Filter::selected(GeometryType::Point, Some(feature.guid())),
            )
            .into_iter()
            .find_map(|point_feature| point_feature.geometry.as_point());

        let current = host.bounds();
        let mut expanded = match feature.geometry.bounding_rect() {
            Some(bbox) => current.merge(bbox),
            None => current,
        };
        if let Some(point) = &point {
            expanded = expanded.merge_point(point);
        }
        let viewport = (expanded != current).then_some(expanded);

        match point {
            Some(anchor) => Target {
                anchor,
                offset: Some(SYMBOL_POPUP_OFFSET),
                viewport,
            },
            None => Target {
                anchor: event.lng_lat,
                offset: None,
                viewport,
            },
        }
    }

    fn sync_filters(
        &self,
        host: &mut dyn MapHost,
        guid: Option<&str>,
    ) -> Result<(), IncidentsError> {
        host.set_filter(
            &self.layers.outline_selected_id(),
            self.layers.selected_filter(GeometryType::Polygon, guid),
        )?;
        host.set_filter(
            &self.layers.symbol_selected_id(),
            self.layers.selected_filter(GeometryType::Point, guid),
        )
    }

    fn dismiss_popups(&mut self, host: &mut dyn MapHost) {
        for popup in self.popups.drain(..) {
            host.remove_popup(popup.id);
        }
    }
}
