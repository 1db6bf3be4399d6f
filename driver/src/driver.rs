use core::future::pending;

use defmt::{debug, info, warn};
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::{Duration, Instant, Ticker, Timer};
use rotary_encoder_logic::{ConfigWarning, EncoderType, RotaryEncoder};

use crate::pins::{EncoderPins, pulls};

/// How often [`Dispatcher::run`] dispatches the callbacks.
pub const DISPATCH_INTERVAL: Duration = Duration::from_millis(100);
/// Time the lines get to settle after the pulls and supply are switched on.
const SETTLE_TIME: Duration = Duration::from_millis(20);

/// An encoder that has not touched its pins yet.
pub struct RotaryEncoderDriver<'d> {
    encoder: &'d RotaryEncoder,
    pins: EncoderPins<'d>,
    encoder_type: EncoderType,
}

impl<'d> RotaryEncoderDriver<'d> {
    pub fn new(encoder: &'d RotaryEncoder, pins: EncoderPins<'d>) -> Self {
        Self {
            encoder,
            pins,
            encoder_type: EncoderType::default(),
        }
    }

    /// Select which internal pull-ups [`RotaryEncoderDriver::begin`] switches on.
    pub fn set_encoder_type(&mut self, encoder_type: EncoderType) {
        self.encoder_type = encoder_type;
    }

    /// Like [`RotaryEncoderDriver::set_encoder_type`] for a raw selection (`0..=2`).
    ///
    /// # Errors
    /// [`ConfigWarning::UnknownEncoderType`] for anything else, the previous type is kept.
    pub fn set_encoder_type_raw(&mut self, raw: u8) -> Result<(), ConfigWarning> {
        let encoder_type = EncoderType::try_from(raw).inspect_err(|warning| {
            warn!("keeping {}: {}", self.encoder_type, warning);
        })?;
        self.set_encoder_type(encoder_type);
        Ok(())
    }

    /// Configure the pins and start listening for edges.
    ///
    /// Resets the value and pending notifications, switches on the pulls and the supply
    /// pin, then waits for the lines to settle before the first edge is taken.
    pub async fn begin(self) -> ActiveEncoder<'d> {
        self.encoder.begin();

        let (channel_pull, button_pull) = pulls(self.encoder_type);
        let EncoderPins { a, b, button, vcc } = self.pins;
        let a = Input::new(a, channel_pull);
        let b = Input::new(b, channel_pull);
        let button = button.map(|pin| Input::new(pin, button_pull));
        let vcc = vcc.map(|pin| Output::new(pin, Level::High));

        Timer::after(SETTLE_TIME).await;

        info!(
            "rotary encoder started: {}, button {}",
            self.encoder_type,
            button.is_some()
        );
        ActiveEncoder {
            encoder: self.encoder,
            a,
            b,
            button,
            _vcc: vcc,
        }
    }
}

enum Event {
    Channel,
    Button,
}

/// A started encoder. Drive it with [`ActiveEncoder::run`].
///
/// Only feeds edges into the [`RotaryEncoder`], callbacks never run from here. Either call
/// [`RotaryEncoder::dispatch`] from the application or run a [`Dispatcher`] next to it.
///
/// Dropping it releases the pins, which stops their edge interrupts.
pub struct ActiveEncoder<'d> {
    encoder: &'d RotaryEncoder,
    a: Input<'d>,
    b: Input<'d>,
    button: Option<Input<'d>>,
    _vcc: Option<Output<'d>>,
}

impl<'d> ActiveEncoder<'d> {
    pub fn encoder(&self) -> &'d RotaryEncoder {
        self.encoder
    }

    /// Dispatches the callbacks of this encoder every [`DISPATCH_INTERVAL`].
    pub fn dispatcher(&self) -> Dispatcher<'d> {
        Dispatcher::new(self.encoder)
    }

    /// Feed edges into the encoder, forever.
    ///
    /// Run this from a higher priority executor than the [`Dispatcher`] to keep edge latency
    /// low while callbacks run.
    pub async fn run(&mut self) -> ! {
        loop {
            self.poll().await;
        }
    }

    /// Wait for and handle one edge.
    ///
    /// While the encoder is disabled the pins are not listened to, this waits for
    /// [`RotaryEncoder::enable`] first.
    pub async fn poll(&mut self) {
        self.encoder.wait_enabled().await;
        match self.next_edge().await {
            Event::Channel => {
                self.encoder
                    .handle_encoder_edge(self.a.is_high(), self.b.is_high(), Instant::now());
            }
            Event::Button => {
                if let Some(button) = &self.button {
                    // The switch pulls the line low while pressed.
                    self.encoder
                        .handle_button_edge(button.is_low(), Instant::now());
                }
            }
        }
    }

    async fn next_edge(&mut self) -> Event {
        let edge = select(
            channel_edge(&mut self.a, &mut self.b),
            button_edge(&mut self.button),
        );
        match edge.await {
            Either::First(()) => Event::Channel,
            Either::Second(()) => Event::Button,
        }
    }
}

impl Drop for ActiveEncoder<'_> {
    fn drop(&mut self) {
        debug!("rotary encoder stopped");
    }
}

async fn channel_edge(a: &mut Input<'_>, b: &mut Input<'_>) {
    select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
}

async fn button_edge(button: &mut Option<Input<'_>>) {
    match button {
        Some(button) => button.wait_for_any_edge().await,
        None => pending().await,
    }
}

/// Runs the registered callbacks on a fixed schedule, away from the edge handling.
pub struct Dispatcher<'d> {
    encoder: &'d RotaryEncoder,
    ticker: Ticker,
}

impl<'d> Dispatcher<'d> {
    pub fn new(encoder: &'d RotaryEncoder) -> Self {
        Self {
            encoder,
            ticker: Ticker::every(DISPATCH_INTERVAL),
        }
    }

    /// Call [`RotaryEncoder::dispatch`] every [`DISPATCH_INTERVAL`], forever.
    pub async fn run(&mut self) -> ! {
        loop {
            self.ticker.next().await;
            self.encoder.dispatch();
        }
    }
}
