//! Contact-resistance proxy derived from the Z channels.

use crate::frame::RawSample;

/// Estimate the relative contact resistance `Rt` for one raw sample:
/// `((z2 - z1) * x * scale) / z1`, rounded back into range with
/// `(Rt + 2047) >> 12`. Not a calibrated physical pressure unit.
///
/// `z1 == 0` means the divider formula is undefined for this frame; the
/// caller drops the sample rather than report a fabricated pressure.
/// `z2 < z1` floors at zero instead of wrapping.
pub(crate) fn contact_resistance(raw: &RawSample, scale: u16) -> Option<u32> {
    if raw.z1 == 0 {
        return None;
    }

    // Worst case (z2 - z1) * x * scale = 4095 * 4095 * 60, within u32.
    let rt = (raw.z2 as u32).saturating_sub(raw.z1 as u32) * raw.x as u32 * scale as u32
        / raw.z1 as u32;
    Some((rt + 2047) >> 12)
}
