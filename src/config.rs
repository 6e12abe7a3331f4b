use crate::filter::MAX_FILTER_DEPTH;

/// Tuning record for one digitizer instance.
///
/// Raw-range and orientation values map the controller's 12-bit ADC space
/// onto the panel's pixel space. The defaults match a 3.5" 480x320 panel with
/// the Y axis mounted inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    /// Raw ADC value reported at the low edge of the X axis.
    pub x_min: u16,
    /// Raw ADC value reported at the high edge of the X axis.
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
    /// Panel resolution in pixels.
    pub hor_res: u16,
    pub ver_res: u16,
    /// Exchange X and Y before range mapping.
    pub swap_xy: bool,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Moving-average depth over calibrated points, 1..=8.
    pub filter_depth: usize,
    /// Pause between acquisition iterations while the panel is touched.
    pub sample_interval_ms: u32,
    /// Panel resistance ratio used by the contact-resistance estimate.
    pub pressure_scale: u16,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            x_min: 400,
            x_max: 3800,
            y_min: 400,
            y_max: 3800,
            hor_res: 480,
            ver_res: 320,
            swap_xy: false,
            invert_x: false,
            invert_y: true,
            filter_depth: 4,
            sample_interval_ms: 10,
            pressure_scale: 60,
        }
    }
}

impl TouchConfig {
    /// A zero-width raw range would divide by zero in the scale step, a zero
    /// filter depth would do the same in the running mean, and pixel
    /// coordinates are signed 16-bit, so each resolution must stay within
    /// `i16::MAX`.
    pub(crate) fn is_valid(&self) -> bool {
        self.x_max > self.x_min
            && self.y_max > self.y_min
            && (1..=i16::MAX as u16).contains(&self.hor_res)
            && (1..=i16::MAX as u16).contains(&self.ver_res)
            && (1..=MAX_FILTER_DEPTH).contains(&self.filter_depth)
    }
}
