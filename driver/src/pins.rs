use embassy_rp::{
    Peri,
    gpio::{AnyPin, Pull},
};
use rotary_encoder_logic::EncoderType;

/// The pins an encoder module is wired to.
pub struct EncoderPins<'d> {
    /// Channel A, sometimes marked `CLK`.
    pub a: Peri<'d, AnyPin>,
    /// Channel B, sometimes marked `DT`.
    pub b: Peri<'d, AnyPin>,
    /// Push button, sometimes marked `SW`.
    pub button: Option<Peri<'d, AnyPin>>,
    /// Supply for the module, driven high once the driver starts. Sometimes marked `+`.
    pub vcc: Option<Peri<'d, AnyPin>>,
}

impl<'d> EncoderPins<'d> {
    pub fn new(a: Peri<'d, AnyPin>, b: Peri<'d, AnyPin>) -> Self {
        Self {
            a,
            b,
            button: None,
            vcc: None,
        }
    }

    #[must_use]
    pub fn with_button(mut self, button: Peri<'d, AnyPin>) -> Self {
        self.button = Some(button);
        self
    }

    #[must_use]
    pub fn with_vcc(mut self, vcc: Peri<'d, AnyPin>) -> Self {
        self.vcc = Some(vcc);
        self
    }
}

/// Pulls for the channel inputs and the button input.
pub(crate) fn pulls(encoder_type: EncoderType) -> (Pull, Pull) {
    let pull = |up: bool| if up { Pull::Up } else { Pull::None };
    (
        pull(encoder_type.channel_pull_up()),
        pull(encoder_type.button_pull_up()),
    )
}
