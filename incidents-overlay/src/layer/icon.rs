//! Status icons of point incidents and their loading.

use futures::future::try_join_all;
use log::{debug, error};
use serde_json::{json, Value};

use crate::decoded_image::DecodedImage;
use crate::error::IncidentsError;
use crate::feature::{IncidentFeature, FIRE_PROPERTY, STATUS_PROPERTY};
use crate::platform::PlatformService;

/// Icon shown for a point incident.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IconKey {
    /// Incident that is not a fire.
    NonFire,
    /// Fire under control. Also used for fires with unknown status.
    UnderControl,
    /// Fire being controlled.
    BeingControlled,
    /// Fire out of control.
    OutOfControl,
}

impl IconKey {
    /// All icons, in the order they are loaded.
    pub const ALL: [IconKey; 4] = [
        IconKey::NonFire,
        IconKey::UnderControl,
        IconKey::BeingControlled,
        IconKey::OutOfControl,
    ];

    /// Key of the icon, also the file name of the icon without extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::NonFire => "non-fire",
            IconKey::UnderControl => "under-control",
            IconKey::BeingControlled => "being-controlled",
            IconKey::OutOfControl => "out-of-control",
        }
    }

    /// Name the image is registered under in the map: `<prefix>-<key>`.
    pub fn image_name(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.as_str())
    }

    /// Selects the icon for the incident.
    ///
    /// Statuses are matched exactly as the feed spells them for point features. A fire with any other
    /// status, or none, gets the [`IconKey::UnderControl`] icon.
    pub fn for_incident(fire: bool, status: Option<&str>) -> Self {
        if !fire {
            return IconKey::NonFire;
        }

        match status {
            Some("Under control") => IconKey::UnderControl,
            Some("Being controlled") => IconKey::BeingControlled,
            Some("Out of control") => IconKey::OutOfControl,
            _ => IconKey::UnderControl,
        }
    }
}

/// The `icon-image` layout rule of the symbol layer.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImageRule {
    prefix: String,
}

impl IconImageRule {
    /// Creates a rule referencing images registered with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Name of the image to draw the feature with.
    pub fn resolve(&self, feature: &IncidentFeature) -> String {
        IconKey::for_incident(feature.properties.fire(), feature.properties.status())
            .image_name(&self.prefix)
    }

    /// Style expression representation of the rule.
    pub fn to_json(&self) -> Value {
        let name = |key: IconKey| key.image_name(&self.prefix);
        json!([
            "case",
            ["get", FIRE_PROPERTY],
            [
                "match",
                ["get", STATUS_PROPERTY],
                "Under control",
                name(IconKey::UnderControl),
                "Being controlled",
                name(IconKey::BeingControlled),
                "Out of control",
                name(IconKey::OutOfControl),
                name(IconKey::UnderControl)
            ],
            name(IconKey::NonFire)
        ])
    }
}

/// Url of the icon image under the `base_url` directory.
pub fn icon_url(base_url: &str, key: IconKey) -> String {
    format!("{}/{}.png", base_url.trim_end_matches('/'), key.as_str())
}

/// Loads all icons concurrently.
///
/// Returns the images only if every load succeeded. The first failure is returned as
/// [`IncidentsError::IconLoad`], and the successfully loaded images are dropped, so a caller never
/// registers a partial icon set.
pub async fn load_icons(
    platform: &(impl PlatformService + ?Sized),
    base_url: &str,
) -> Result<Vec<(IconKey, DecodedImage)>, IncidentsError> {
    let loads = IconKey::ALL.into_iter().map(|key| async move {
        let url = icon_url(base_url, key);
        debug!("Loading icon {url}");
        match platform.load_image_url(&url).await {
            Ok(image) => Ok((key, image)),
            Err(err) => {
                error!("Failed to load icon {url}: {err}");
                Err(IncidentsError::IconLoad {
                    url,
                    reason: err.to_string(),
                })
            }
        }
    });

    try_join_all(loads).await
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;

    /// Platform returning 1x1 images for every url except those containing `fail_on`.
    #[derive(Default)]
    pub(crate) struct TestPlatform {
        pub(crate) fail_on: Option<&'static str>,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PlatformService for TestPlatform {
        async fn load_image_url(&self, url: &str) -> Result<DecodedImage, IncidentsError> {
            self.requested.lock().expect("poisoned").push(url.to_string());
            match self.fail_on {
                Some(pattern) if url.contains(pattern) => Err(IncidentsError::NotFound),
                _ => DecodedImage::from_raw(vec![255, 0, 0, 255], (1, 1)),
            }
        }

        async fn load_bytes_from_url(&self, _url: &str) -> Result<Bytes, IncidentsError> {
            Err(IncidentsError::NotFound)
        }
    }

    #[test]
    fn icon_mapping_is_total() {
        let statuses = [
            Some("Under control"),
            Some("Being controlled"),
            Some("Out of control"),
            Some("Under Control"),
            Some("Patrol"),
            Some(""),
            None,
        ];

        for status in statuses {
            assert_eq!(IconKey::for_incident(false, status), IconKey::NonFire);
        }

        assert_eq!(
            IconKey::for_incident(true, Some("Under control")),
            IconKey::UnderControl
        );
        assert_eq!(
            IconKey::for_incident(true, Some("Being controlled")),
            IconKey::BeingControlled
        );
        assert_eq!(
            IconKey::for_incident(true, Some("Out of control")),
            IconKey::OutOfControl
        );
        assert_eq!(IconKey::for_incident(true, Some("Patrol")), IconKey::UnderControl);
        assert_eq!(
            IconKey::for_incident(true, Some("Out of Control")),
            IconKey::UnderControl
        );
        assert_eq!(IconKey::for_incident(true, None), IconKey::UnderControl);
    }

    #[test]
    fn image_names_are_prefixed() {
        assert_eq!(
            IconKey::BeingControlled.image_name("_nswrfsmajorincidents"),
            "_nswrfsmajorincidents-being-controlled"
        );
        assert_eq!(icon_url("icons/", IconKey::NonFire), "icons/non-fire.png");
    }

    #[test]
    fn rule_expression() {
        let rule = IconImageRule::new("p");
        assert_eq!(
            rule.to_json(),
            json!([
                "case",
                ["get", "fire"],
                [
                    "match",
                    ["get", "status"],
                    "Under control",
                    "p-under-control",
                    "Being controlled",
                    "p-being-controlled",
                    "Out of control",
                    "p-out-of-control",
                    "p-under-control"
                ],
                "p-non-fire"
            ])
        );
    }

    #[test]
    fn loads_all_icons() {
        let platform = TestPlatform::default();
        let icons = tokio_test::block_on(load_icons(&platform, "icons")).unwrap();

        let keys: HashSet<_> = icons.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(platform.requested.lock().unwrap().len(), 4);
    }

    #[test]
    fn single_failure_fails_all() {
        let platform = TestPlatform {
            fail_on: Some("out-of-control"),
            ..Default::default()
        };
        let result = tokio_test::block_on(load_icons(&platform, "icons"));

        assert_matches!(result, Err(IncidentsError::IconLoad { url, .. }) if url == "icons/out-of-control.png");
    }
}
