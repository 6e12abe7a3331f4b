//! Raw ADC range to panel pixel mapping.

use crate::config::TouchConfig;

/// Map one raw coordinate pair into pixel space: optional axis swap, then
/// per-axis saturating offset, scale and optional inversion.
///
/// The result is deliberately not clamped to the panel rectangle. A raw
/// reading at the configured axis maximum lands exactly on `hor_res` /
/// `ver_res`, and readings past the configured range can overshoot at the
/// physical edges; consumers tolerate that rather than lose edge contacts.
pub(crate) fn map_point(config: &TouchConfig, raw_x: u16, raw_y: u16) -> (i16, i16) {
    let (raw_x, raw_y) = if config.swap_xy {
        (raw_y, raw_x)
    } else {
        (raw_x, raw_y)
    };

    let mut x = scale_axis(raw_x, config.x_min, config.x_max, config.hor_res);
    let mut y = scale_axis(raw_y, config.y_min, config.y_max, config.ver_res);

    if config.invert_x {
        x = config.hor_res as i16 - x;
    }
    if config.invert_y {
        y = config.ver_res as i16 - y;
    }

    (x, y)
}

fn scale_axis(raw: u16, min: u16, max: u16, resolution: u16) -> i16 {
    let offset = raw.saturating_sub(min) as u32;
    // Truncating division; `is_valid` guarantees max > min and a resolution
    // within i16. A raw reading far past a narrow configured range can still
    // overshoot the pixel space, so the value saturates instead of wrapping.
    (offset * resolution as u32 / (max - min) as u32).min(i16::MAX as u32) as i16
}
