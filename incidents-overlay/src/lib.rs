//! Interactive overlay showing NSW RFS major incidents on a web map.
//!
//! The overlay takes the major incidents GeoJSON feed, draws incident areas and locations with
//! status icons, and shows a popup with incident details when the user clicks an incident. The
//! selected incident is highlighted on both area and location layers.
//!
//! # Quick start
//!
//! ```no_run
//! use incidents_overlay::control::{MajorIncidentsOverlay, MapEventHandler};
//! use incidents_overlay::host::MemoryMap;
//! use incidents_overlay::platform::{PlatformService, PlatformServiceImpl};
//! use incidents_overlay::{parse_feed, OverlayOptions};
//! use incidents_types::{lnglat, Size};
//!
//! # tokio_test::block_on(async {
//! let options = OverlayOptions::default();
//! let platform = PlatformServiceImpl::new().unwrap();
//! let mut map = MemoryMap::new(lnglat!(147.0, -33.0), 0.01, Size::new(800.0, 600.0));
//!
//! let mut overlay = MajorIncidentsOverlay::new(options.clone());
//! overlay.on_add(&mut map);
//! overlay.on_load(&mut map, &platform).await.unwrap();
//!
//! let feed = platform.load_bytes_from_url(&options.url).await.unwrap();
//! map.set_source_data(overlay.layers().source_id(), parse_feed(&feed).unwrap()).unwrap();
//! # });
//! ```
//!
//! # Main components
//!
//! * [`MapHost`](host::MapHost) is everything the overlay needs from a map library: sources,
//!   layers, images, feature queries, viewport, popups and cursor. [`MemoryMap`](host::MemoryMap)
//!   implements it without any rendering.
//! * [`LayerSet`](layer::LayerSet) declares the five overlay layers and their filters.
//! * [`SelectionController`](control::SelectionController) decides what a click selects, where the
//!   popup points to and whether the viewport should move. It keeps the highlight filters in sync
//!   with the selection.
//! * [`PopupRenderer`](popup::PopupRenderer) turns incident properties into popup markup.
//! * [`MajorIncidentsOverlay`](control::MajorIncidentsOverlay) ties them together and manages the
//!   lifecycle of the overlay on a map.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod config;
pub mod control;
pub mod decoded_image;
pub mod error;
pub mod feature;
pub mod feed;
pub mod host;
pub mod layer;
pub mod platform;
pub mod popup;

pub use color::Color;
pub use config::OverlayOptions;
pub use error::IncidentsError;
pub use feature::{IncidentFeature, Properties};
pub use feed::{parse_feed, DEFAULT_FEED_URL};

// Reexport incidents_types
pub use incidents_types;
