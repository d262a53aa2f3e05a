use log::{debug, error, info};

use crate::config::OverlayOptions;
use crate::control::{EventPropagation, MapEvent, MapEventHandler, Selection, SelectionController};
use crate::error::IncidentsError;
use crate::host::{ControlContainer, Cursor, MapHost, SourceSpec};
use crate::layer::{load_icons, IconKey, LayerSet};
use crate::platform::PlatformService;
use crate::popup::PopupRenderer;

/// CSS class of the overlay control container.
pub const CONTAINER_CLASS: &str = "nswrfsmajorincidents-ctrl";

/// NSW RFS major incidents overlay.
///
/// Lifecycle:
/// 1. [`on_add`](Self::on_add) attaches the control container to the map.
/// 2. [`on_load`](Self::on_load) is called once the map style is ready. It declares the feed
///    source and the area layers, loads the status icons and, if all of them loaded, declares the
///    point layers.
/// 3. The host passes its events to [`handle`](MapEventHandler::handle).
/// 4. [`on_remove`](Self::on_remove) removes everything the overlay added.
///
/// The overlay does not keep a reference to the map. Every call receives the host, so one
/// overlay value can only ever touch the map it is currently given. All steps are idempotent:
/// nothing is added twice and removing a detached overlay does nothing.
///
/// ```no_run
/// use incidents_overlay::control::{MajorIncidentsOverlay, MapEventHandler};
/// use incidents_overlay::host::MemoryMap;
/// use incidents_overlay::platform::{PlatformService, PlatformServiceImpl};
/// use incidents_overlay::OverlayOptions;
/// use incidents_types::{lnglat, Size};
///
/// # tokio_test::block_on(async {
/// let mut map = MemoryMap::new(lnglat!(147.0, -33.0), 0.01, Size::new(800.0, 600.0));
/// let platform = PlatformServiceImpl::new().unwrap();
/// let mut overlay = MajorIncidentsOverlay::new(OverlayOptions::default());
///
/// overlay.on_add(&mut map);
/// overlay.on_load(&mut map, &platform).await.unwrap();
///
/// let click = map.click_event_at(&lnglat!(150.3, -33.7));
/// overlay.handle(&incidents_overlay::control::MapEvent::Click(click), &mut map);
/// # });
/// ```
#[derive(Debug)]
pub struct MajorIncidentsOverlay {
    options: OverlayOptions,
    layers: LayerSet,
    container: ControlContainer,
    attached: bool,
    controller: SelectionController,
}

impl Default for MajorIncidentsOverlay {
    fn default() -> Self {
        Self::new(OverlayOptions::default())
    }
}

impl MajorIncidentsOverlay {
    /// Creates a new overlay with default popup rendering.
    pub fn new(options: OverlayOptions) -> Self {
        Self::with_renderer(options, PopupRenderer::default())
    }

    /// Creates a new overlay rendering popups with the renderer.
    pub fn with_renderer(options: OverlayOptions, renderer: PopupRenderer) -> Self {
        let layers = LayerSet::default();
        Self {
            options,
            controller: SelectionController::new(layers.clone(), renderer),
            layers,
            container: ControlContainer::new(CONTAINER_CLASS),
            attached: false,
        }
    }

    /// Options of the overlay.
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    /// Ids of the source and layers of the overlay.
    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Currently selected incident.
    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    /// Returns true between [`on_add`](Self::on_add) and [`on_remove`](Self::on_remove).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Attaches the control container to the map and returns it.
    pub fn on_add(&mut self, host: &mut dyn MapHost) -> ControlContainer {
        if !self.attached {
            host.add_container(&self.container);
            self.attached = true;
        }

        self.container.clone()
    }

    /// Declares the source and layers of the overlay.
    ///
    /// Area layers do not depend on icons and are added first. Point layers are only added when
    /// every icon was loaded and registered; otherwise the icon error is returned and no icon is
    /// registered.
    pub async fn on_load(
        &mut self,
        host: &mut dyn MapHost,
        platform: &(impl PlatformService + ?Sized),
    ) -> Result<(), IncidentsError> {
        let source_id = self.layers.source_id();
        if !host.has_source(source_id) {
            host.add_source(
                source_id,
                SourceSpec::GeoJson {
                    url: self.options.url.clone(),
                },
            )?;
        }

        for layer in self.layers.area_layers() {
            if !host.has_layer(&layer.id) {
                host.add_layer(layer)?;
            }
        }

        let icons = match load_icons(platform, &self.options.icons_url).await {
            Ok(icons) => icons,
            Err(err) => {
                error!("Incident symbols are not shown, icons failed to load: {err}");
                return Err(err);
            }
        };

        for (key, image) in icons {
            let name = self.layers.image_name(key);
            if !host.has_image(&name) {
                host.add_image(&name, image)?;
            }
        }

        for layer in self.layers.point_layers() {
            if !host.has_layer(&layer.id) {
                host.add_layer(layer)?;
            }
        }

        info!("Major incidents overlay loaded from {}", self.options.url);
        Ok(())
    }

    /// Removes the popups, layers, images, source and the control container of the overlay.
    pub fn on_remove(&mut self, host: &mut dyn MapHost) {
        self.controller.detach(host);

        for id in self.layers.layer_ids().iter().rev() {
            host.remove_layer(id);
        }
        for key in IconKey::ALL {
            host.remove_image(&self.layers.image_name(key));
        }
        host.remove_source(self.layers.source_id());

        if self.attached {
            host.remove_container(&self.container);
            self.attached = false;
            info!("Major incidents overlay removed");
        }
    }

    fn is_interactive(&self, layer_id: &str) -> bool {
        self.layers
            .interactive_layer_ids()
            .iter()
            .any(|id| id == layer_id)
    }
}

impl MapEventHandler for MajorIncidentsOverlay {
    fn handle(&mut self, event: &MapEvent, host: &mut dyn MapHost) -> EventPropagation {
        if !host.has_source(self.layers.source_id()) {
            return EventPropagation::Propagate;
        }

        match event {
            MapEvent::Click(click) => match self.controller.on_map_click(host, click) {
                Ok(Some(_)) => EventPropagation::Stop,
                Ok(None) => EventPropagation::Propagate,
                Err(err) => {
                    error!("Failed to select incident: {err}");
                    EventPropagation::Propagate
                }
            },
            MapEvent::MouseEnter { layer_id } if self.is_interactive(layer_id) => {
                host.set_cursor(Cursor::Pointer);
                EventPropagation::Propagate
            }
            MapEvent::MouseLeave { layer_id } if self.is_interactive(layer_id) => {
                host.set_cursor(Cursor::Default);
                EventPropagation::Propagate
            }
            MapEvent::PopupClosed(id) => {
                if let Err(err) = self.controller.on_popup_closed(host, *id) {
                    error!("Failed to reset incident selection: {err}");
                }
                EventPropagation::Propagate
            }
            _ => {
                debug!("Ignoring event {event:?}");
                EventPropagation::Propagate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use incidents_types::{lnglat, Size};
    use tokio_test::block_on;

    use super::*;
    use crate::feature::{IncidentFeature, Properties};
    use crate::host::MemoryMap;
    use crate::layer::{Filter, TestPlatform, NO_SELECTION};

    fn map() -> MemoryMap {
        MemoryMap::new(lnglat!(147.0, -33.0), 0.01, Size::new(800.0, 600.0))
    }

    fn loaded(map: &mut MemoryMap) -> MajorIncidentsOverlay {
        let mut overlay = MajorIncidentsOverlay::default();
        overlay.on_add(map);
        block_on(overlay.on_load(map, &TestPlatform::default())).expect("loaded");
        overlay
    }

    #[test]
    fn on_load_declares_everything() {
        let mut map = map();
        let platform = TestPlatform::default();
        let mut overlay = MajorIncidentsOverlay::new(OverlayOptions::default().with_icons_url("img"));

        let container = overlay.on_add(&mut map);
        block_on(overlay.on_load(&mut map, &platform)).expect("loaded");

        assert_eq!(map.containers(), [container]);
        assert_eq!(
            map.source("_nswrfsmajorincidents"),
            Some(&SourceSpec::GeoJson {
                url: "https://www.beyondtracks.com/contrib/nsw-rfs-majorincidents.geojson".into()
            })
        );
        assert_eq!(map.layer_ids(), overlay.layers().layer_ids());
        assert_eq!(
            map.image_names(),
            [
                "_nswrfsmajorincidents-being-controlled",
                "_nswrfsmajorincidents-non-fire",
                "_nswrfsmajorincidents-out-of-control",
                "_nswrfsmajorincidents-under-control",
            ]
        );

        let mut requested = platform.requested.lock().expect("poisoned").clone();
        requested.sort();
        assert_eq!(
            requested,
            [
                "img/being-controlled.png",
                "img/non-fire.png",
                "img/out-of-control.png",
                "img/under-control.png",
            ]
        );
    }

    #[test]
    fn icon_failure_skips_symbol_layers() {
        let mut map = map();
        let platform = TestPlatform {
            fail_on: Some("out-of-control"),
            ..Default::default()
        };
        let mut overlay = MajorIncidentsOverlay::default();

        overlay.on_add(&mut map);
        let result = block_on(overlay.on_load(&mut map, &platform));

        assert_matches!(result, Err(IncidentsError::IconLoad { url, .. }) => {
            assert_eq!(url, "icons/out-of-control.png");
        });
        assert!(map.image_names().is_empty());
        assert_eq!(
            map.layer_ids(),
            [
                "_nswrfsmajorincidents-fill",
                "_nswrfsmajorincidents-outline",
                "_nswrfsmajorincidents-outline-selected",
            ]
        );
    }

    #[test]
    fn repeated_load_adds_nothing() {
        let mut map = map();
        let mut overlay = loaded(&mut map);

        overlay.on_add(&mut map);
        block_on(overlay.on_load(&mut map, &TestPlatform::default())).expect("loaded");

        assert_eq!(map.containers().len(), 1);
        assert_eq!(map.source_count(), 1);
        assert_eq!(map.layer_ids().len(), 5);
        assert_eq!(map.image_names().len(), 4);
    }

    #[test]
    fn add_remove_cycles_do_not_leak() {
        let mut map = map();

        for _ in 0..3 {
            let mut overlay = loaded(&mut map);
            assert_eq!(map.layer_ids().len(), 5);

            overlay.on_remove(&mut map);
            assert!(!overlay.is_attached());
            assert!(map.layer_ids().is_empty());
            assert!(map.image_names().is_empty());
            assert_eq!(map.source_count(), 0);
            assert!(map.containers().is_empty());

            overlay.on_remove(&mut map);
        }
    }

    #[test]
    fn remove_closes_popup_and_drops_selection() {
        let mut map = map();
        let mut overlay = loaded(&mut map);
        map.set_source_data(
            overlay.layers().source_id(),
            vec![IncidentFeature::new(
                lnglat!(147.0, -33.0),
                Properties::new().with("guid", "a"),
            )],
        )
        .expect("data");

        let click = map.click_event_at(&lnglat!(147.0, -33.0));
        assert_eq!(
            overlay.handle(&MapEvent::Click(click), &mut map),
            EventPropagation::Stop
        );
        assert_eq!(overlay.selection().guid(), Some("a"));

        overlay.on_remove(&mut map);

        assert_eq!(overlay.selection(), &Selection::Unselected);
        assert_eq!(map.popups().count(), 0);
    }

    #[test]
    fn click_and_close_through_events() {
        let mut map = map();
        let mut overlay = loaded(&mut map);
        map.set_source_data(
            overlay.layers().source_id(),
            vec![IncidentFeature::new(
                lnglat!(147.0, -33.0),
                Properties::new().with("guid", "a").with("fire", false),
            )],
        )
        .expect("data");

        let click = map.click_event_at(&lnglat!(147.0, -33.0));
        overlay.handle(&MapEvent::Click(click), &mut map);
        let (id, _) = map.popups().next().expect("popup is open");

        map.close_popup(id);
        for event in map.take_events() {
            overlay.handle(&event, &mut map);
        }

        assert_eq!(overlay.selection(), &Selection::Unselected);
        assert_eq!(
            map.filter(&overlay.layers().symbol_selected_id())
                .and_then(Filter::selected_guid),
            Some(NO_SELECTION)
        );
    }

    #[test]
    fn hover_switches_cursor() {
        let mut map = map();
        let mut overlay = loaded(&mut map);
        map.set_source_data(
            overlay.layers().source_id(),
            vec![IncidentFeature::new(lnglat!(147.0, -33.0), Properties::new())],
        )
        .expect("data");

        map.pointer_moved(map.lnglat_to_screen(&lnglat!(147.0, -33.0)));
        for event in map.take_events() {
            overlay.handle(&event, &mut map);
        }
        assert_eq!(map.cursor(), Cursor::Pointer);

        map.pointer_moved(map.lnglat_to_screen(&lnglat!(148.0, -33.0)));
        for event in map.take_events() {
            overlay.handle(&event, &mut map);
        }
        assert_eq!(map.cursor(), Cursor::Default);
    }

    #[test]
    fn events_before_load_are_ignored() {
        let mut map = map();
        let mut overlay = MajorIncidentsOverlay::default();
        overlay.on_add(&mut map);

        let click = map.click_event_at(&lnglat!(147.0, -33.0));
        assert_eq!(
            overlay.handle(&MapEvent::Click(click), &mut map),
            EventPropagation::Propagate
        );
        assert_eq!(overlay.selection(), &Selection::Unselected);
    }
}
