//! Interactivity of the overlay.
//!
//! The map host converts its native events into [`MapEvent`]s and gives them to the
//! [`MapEventHandler`]s attached to it, in order, until one of them stops the propagation:
//! 1. [`MapEvent::Click`] drives the [`SelectionController`], which selects the incident under the
//!    pointer and opens its popup.
//! 2. [`MapEvent::MouseEnter`] and [`MapEvent::MouseLeave`] on interactive layers switch the cursor.
//! 3. [`MapEvent::PopupClosed`] lets the controller drop the selection the popup belonged to.

use incidents_types::{LngLat, ScreenPoint};

use crate::host::{MapHost, PopupId};

mod overlay;
mod selection;

pub use overlay::{MajorIncidentsOverlay, CONTAINER_CLASS};
pub use selection::{Generation, Selection, SelectionController, FIT_PADDING};

/// Map event handler.
pub trait MapEventHandler {
    /// Handle the event.
    fn handle(&mut self, event: &MapEvent, host: &mut dyn MapHost) -> EventPropagation;
}

/// Event reported by the map host.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Primary button click on the map.
    Click(ClickEvent),
    /// Pointer entered a feature of the layer.
    MouseEnter {
        /// Id of the layer.
        layer_id: String,
    },
    /// Pointer left the features of the layer.
    MouseLeave {
        /// Id of the layer.
        layer_id: String,
    },
    /// Popup was closed, either by the user or by [`MapHost::remove_popup`].
    PopupClosed(PopupId),
}

/// Position of a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Pointer position on the screen in pixels from the top-left corner.
    pub point: ScreenPoint,
    /// Geographic position under the pointer.
    pub lng_lat: LngLat,
}

/// Value returned by a [`MapEventHandler`] to indicate the status of the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
}
