//! embassy-rp glue for [`rotary_encoder_logic`].
//!
//! The pins are configured according to the [`EncoderType`] and their edges are fed into a shared
//! [`RotaryEncoder`]. A separate [`Dispatcher`] can run the registered callbacks on a fixed
//! schedule.
#![no_std]

mod driver;
mod pins;

pub use driver::{ActiveEncoder, DISPATCH_INTERVAL, Dispatcher, RotaryEncoderDriver};
pub use pins::EncoderPins;
pub use rotary_encoder_logic::{
    Bounds, ConfigWarning, DEFAULT_STEPS_PER_DETENT, Direction, EncoderType, PressCallback,
    RotaryEncoder, TurnCallback,
};
