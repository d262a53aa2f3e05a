//! Placeholder status icons, used when no icons directory is given.

use std::path::PathBuf;

use anyhow::Result;
use image::{Rgba, RgbaImage};
use incidents_overlay::layer::IconKey;

const ICON_SIZE: u32 = 30;

fn icon_color(key: IconKey) -> Rgba<u8> {
    match key {
        IconKey::NonFire => Rgba([128, 128, 128, 255]),
        IconKey::UnderControl => Rgba([0, 128, 255, 255]),
        IconKey::BeingControlled => Rgba([255, 165, 0, 255]),
        IconKey::OutOfControl => Rgba([220, 0, 0, 255]),
    }
}

/// Draws a filled circle for every status into a temporary directory and returns its path.
pub fn write_placeholder_icons() -> Result<String> {
    let dir: PathBuf = std::env::temp_dir().join("incidents-demo-icons");
    std::fs::create_dir_all(&dir)?;

    let radius = ICON_SIZE as f64 / 2.0;
    for key in IconKey::ALL {
        let color = icon_color(key);
        let icon = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
            let dx = x as f64 + 0.5 - radius;
            let dy = y as f64 + 0.5 - radius;
            if dx * dx + dy * dy <= radius * radius {
                color
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        icon.save(dir.join(format!("{}.png", key.as_str())))?;
    }

    log::debug!("Placeholder icons written to {}", dir.display());
    Ok(dir.to_string_lossy().into_owned())
}
