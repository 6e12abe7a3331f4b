//! Wire-level polling protocol: one command byte out, three response bytes
//! back, 12-bit ADC value recovered from the middle of the response.

use embedded_hal::spi::SpiDevice;
use log::trace;

// XPT2046 control words. Bit 0 selects 12-bit conversion, the PD bits keep
// the reference powered between conversions except for the final Y/PD0 word,
// which powers the converter down with PENIRQ enabled.
const CMD_X_READ: u8 = 0x91;
const CMD_Y_READ: u8 = 0xD1;
const CMD_Z1_READ: u8 = 0xB1;
const CMD_Z2_READ: u8 = 0xC1;
const CMD_Y_PD0_READ: u8 = 0xD0;

/// One instantaneous controller read, all channels 12-bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
    pub z1: u16,
    pub z2: u16,
}

fn decode_adc12(response: [u8; 3]) -> u16 {
    (((response[1] as u16) << 8) | response[2] as u16) >> 3
}

fn exchange<SPI: SpiDevice>(spi: &mut SPI, command: u8) -> Result<[u8; 3], SPI::Error> {
    let mut response = [0u8; 3];
    spi.transfer(&mut response, &[command, 0, 0])?;
    Ok(response)
}

fn read_channel<SPI: SpiDevice>(spi: &mut SPI, command: u8) -> Result<u16, SPI::Error> {
    exchange(spi, command).map(decode_adc12)
}

/// Acquire one full frame: both Z channels, then X twice and Y once. The
/// first X conversion lands while the panel drivers are still settling after
/// the Z reads and is discarded. The trailing Y/PD0 exchange powers the
/// converter down so PENIRQ stays armed between frames.
pub(crate) fn read_sample<SPI: SpiDevice>(spi: &mut SPI) -> Result<RawSample, SPI::Error> {
    let z1 = read_channel(spi, CMD_Z1_READ)?;
    let z2 = read_channel(spi, CMD_Z2_READ)?;
    let settling_x = read_channel(spi, CMD_X_READ)?;
    let x = read_channel(spi, CMD_X_READ)?;
    let y = read_channel(spi, CMD_Y_READ)?;
    exchange(spi, CMD_Y_PD0_READ)?;

    trace!(
        "frame x={} y={} z1={} z2={} settling_x={}",
        x,
        y,
        z1,
        z2,
        settling_x
    );
    Ok(RawSample { x, y, z1, z2 })
}

/// One Y/PD0 exchange on its own. Used as the init-time presence probe and
/// as the priming exchange when detection is armed.
pub(crate) fn power_down<SPI: SpiDevice>(spi: &mut SPI) -> Result<(), SPI::Error> {
    exchange(spi, CMD_Y_PD0_READ).map(|_| ())
}
