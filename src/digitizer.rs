//! Acquisition loop and driver lifecycle.

use embedded_hal::digital::InputPin;
use embedded_hal::spi::SpiDevice;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use log::{debug, trace, warn};

use crate::calibrate;
use crate::config::TouchConfig;
use crate::engine::{ContactEngine, EngineOutput, PointerEvent};
use crate::frame;
use crate::pressure;

/// Driver-level failures. Transient bus faults during a pressed run are not
/// errors; the affected sample is dropped and the run continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<P> {
    /// The controller did not answer the presence probe at construction.
    DeviceNotFound,
    /// Detection cannot be armed: no callback registered, the priming
    /// exchange failed, or the driver is serviced while disabled.
    Configuration,
    /// The configuration record was rejected.
    InvalidArgument,
    /// The detect line could not be read or awaited.
    DetectLine(P),
}

/// One resistive touch-panel digitizer.
///
/// Owns the bus, the detect line and the delay provider for its whole
/// lifetime. `service` runs one full contact cycle; spawn it in a loop from
/// a dedicated task:
///
/// ```ignore
/// digitizer.configure(|event| input_queue.push(event));
/// digitizer.enable()?;
/// loop {
///     digitizer.service().await?;
/// }
/// ```
pub struct Digitizer<SPI, IRQ, D, C> {
    spi: SPI,
    irq: IRQ,
    delay: D,
    config: TouchConfig,
    engine: ContactEngine,
    callback: Option<C>,
    enabled: bool,
}

impl<SPI, IRQ, D, C> Digitizer<SPI, IRQ, D, C>
where
    SPI: SpiDevice,
    IRQ: InputPin + Wait,
    D: DelayNs,
    C: FnMut(PointerEvent),
{
    /// Bind the bus and detect-line handles and probe for the controller.
    ///
    /// The probe is a single power-down exchange; it leaves the converter
    /// idle with PENIRQ enabled. A bus that does not complete it reports
    /// [`Error::DeviceNotFound`].
    pub fn new(
        mut spi: SPI,
        irq: IRQ,
        delay: D,
        config: TouchConfig,
    ) -> Result<Self, Error<IRQ::Error>> {
        if !config.is_valid() {
            return Err(Error::InvalidArgument);
        }

        if let Err(err) = frame::power_down(&mut spi) {
            warn!("controller probe failed: {:?}", err);
            return Err(Error::DeviceNotFound);
        }

        Ok(Self {
            spi,
            irq,
            delay,
            config,
            engine: ContactEngine::new(config.filter_depth),
            callback: None,
            enabled: false,
        })
    }

    /// Register the pointer event sink, replacing any previous registration.
    pub fn configure(&mut self, callback: C) {
        self.callback = Some(callback);
    }

    /// Arm touch detection. Requires a registered callback; issues one
    /// priming exchange so the controller sits powered down with PENIRQ
    /// active.
    pub fn enable(&mut self) -> Result<(), Error<IRQ::Error>> {
        if self.callback.is_none() {
            return Err(Error::Configuration);
        }
        if let Err(err) = frame::power_down(&mut self.spi) {
            warn!("priming exchange failed: {:?}", err);
            return Err(Error::Configuration);
        }
        self.enabled = true;
        Ok(())
    }

    /// Disarm touch detection. Idempotent.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Run one full contact cycle: wait for the detect line's falling edge,
    /// sample while the line stays low, then report the release.
    ///
    /// The `&mut self` borrow makes overlapping runs per instance
    /// unrepresentable, and the next edge is awaited only after the release
    /// event has been dispatched.
    pub async fn service(&mut self) -> Result<(), Error<IRQ::Error>> {
        if !self.enabled {
            return Err(Error::Configuration);
        }

        self.irq
            .wait_for_falling_edge()
            .await
            .map_err(Error::DetectLine)?;
        self.run_pressed().await
    }

    async fn run_pressed(&mut self) -> Result<(), Error<IRQ::Error>> {
        loop {
            match self.irq.is_low() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    // A dead detect line ends the run like a release would,
                    // so the consumer sees the contact close and the next
                    // run starts from a clean filter.
                    let output = self.engine.release();
                    self.dispatch(output);
                    return Err(Error::DetectLine(err));
                }
            }

            match frame::read_sample(&mut self.spi) {
                Ok(raw) => match pressure::contact_resistance(&raw, self.config.pressure_scale) {
                    Some(rt) => {
                        let (x, y) = calibrate::map_point(&self.config, raw.x, raw.y);
                        trace!("sample x={} y={} rt={}", x, y, rt);
                        let output = self.engine.sample(x, y);
                        self.dispatch(output);
                    }
                    None => debug!("z1 at floor, sample dropped"),
                },
                Err(err) => warn!("bus exchange failed, sample dropped: {:?}", err),
            }

            self.delay.delay_ms(self.config.sample_interval_ms).await;
        }

        let output = self.engine.release();
        self.dispatch(output);
        Ok(())
    }

    fn dispatch(&mut self, output: EngineOutput) {
        // `enable` refuses to arm without a callback, so a pressed run never
        // observes `None` here; the guard keeps the loop itself free of that
        // assumption.
        if let Some(callback) = self.callback.as_mut() {
            for event in output.events.into_iter().flatten() {
                callback(event);
            }
        }
    }
}
