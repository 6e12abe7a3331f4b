//! Interrupt-driven driver for the XPT2046 resistive touch-panel digitizer.
//!
//! The controller asserts its PENIRQ line while the panel is touched. The
//! driver waits for that falling edge, then polls the controller over SPI
//! while the line stays low: each frame reads both Z channels and the X/Y
//! coordinates, derives a contact-resistance estimate, maps the raw ADC
//! values into panel pixels, smooths them with a short moving average and
//! reports press/move/release transitions to a registered callback. When the
//! line returns high the run ends with exactly one `pressed == false` event
//! carrying the last observed position.
//!
//! The crate is hardware-agnostic: the SPI transport, the detect line and
//! the sampling pause come in through `embedded-hal` / `embedded-hal-async`
//! traits, so any HAL that provides `SpiDevice`, an edge-waitable input pin
//! and a delay can host it.

#![cfg_attr(not(test), no_std)]

mod calibrate;
mod config;
mod digitizer;
mod engine;
mod filter;
mod frame;
mod pressure;

pub use config::TouchConfig;
pub use digitizer::{Digitizer, Error};
pub use engine::PointerEvent;
pub use frame::RawSample;
