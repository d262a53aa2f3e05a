//! Loads the major incidents feed into an in-memory map, clicks incident locations one by one and
//! prints the popups the overlay shows.
//!
//! ```shell
//! cargo run -p incidents-demo -- [feed url or file] [icons directory]
//! ```
//!
//! Without arguments the live feed is used together with generated placeholder icons.

use anyhow::Result;
use incidents_overlay::control::{MajorIncidentsOverlay, MapEvent, MapEventHandler};
use incidents_overlay::host::{MapHost, MemoryMap};
use incidents_overlay::platform::{PlatformService, PlatformServiceImpl};
use incidents_overlay::{parse_feed, OverlayOptions, DEFAULT_FEED_URL};
use incidents_types::{lnglat, LngLat, Size};
use log::{error, info};

mod icons;

/// Degrees per pixel, roughly zoom level 5 around NSW.
const RESOLUTION: f64 = 0.04;
const MAX_CLICKS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
    let icons_url = match args.next() {
        Some(dir) => dir,
        None => icons::write_placeholder_icons()?,
    };
    let options = OverlayOptions::default()
        .with_url(url)
        .with_icons_url(icons_url);

    let platform = PlatformServiceImpl::new()?;
    let mut map = MemoryMap::new(lnglat!(147.0, -33.0), RESOLUTION, Size::new(1024.0, 768.0));
    let mut overlay = MajorIncidentsOverlay::new(options.clone());

    overlay.on_add(&mut map);
    overlay.on_load(&mut map, &platform).await?;

    let feed = match platform.load_bytes_from_url(&options.url).await {
        Ok(feed) => feed,
        Err(err) => {
            error!("Failed to load incidents feed from {}: {err}", options.url);
            return Err(err.into());
        }
    };
    let features = parse_feed(&feed)?;
    info!("Loaded {} incident features", features.len());

    let locations: Vec<LngLat> = features
        .iter()
        .filter_map(|feature| feature.geometry.as_point())
        .take(MAX_CLICKS)
        .collect();
    map.set_source_data(overlay.layers().source_id(), features)?;

    for location in &locations {
        let click = map.click_event_at(location);
        dispatch(&mut overlay, &mut map, MapEvent::Click(click));

        if let Some(guid) = overlay.selection().guid() {
            info!("Selected incident {guid}");
        }
        for (id, popup) in map.popups() {
            info!(
                "Popup {id:?} at {:?} (offset {:?}):\n{}",
                popup.lng_lat.to_array(),
                popup.offset,
                popup.html
            );
        }
    }

    let bounds = map.bounds();
    let empty_place = map.click_event_at(&lnglat!(bounds.x_min, bounds.y_max));
    dispatch(&mut overlay, &mut map, MapEvent::Click(empty_place));
    info!("Selection after clicking an empty place: {:?}", overlay.selection());

    overlay.on_remove(&mut map);
    Ok(())
}

/// Gives the event to the overlay together with all the events the map queued in response.
fn dispatch(overlay: &mut MajorIncidentsOverlay, map: &mut MemoryMap, event: MapEvent) {
    let mut queue = vec![event];
    while !queue.is_empty() {
        for event in queue.drain(..) {
            overlay.handle(&event, map);
        }
        queue = map.take_events();
    }
}
