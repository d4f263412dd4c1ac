use beep::beep;
use std::error::Error;

/// The buzzer. The run loop level-drives it from the sound timer, so
/// implementations are told the desired state rather than edges.
pub trait Sound {
    fn set_beeping(&mut self, on: bool) -> Result<(), Box<dyn Error>>;
}

const BEEP_PITCH_HZ: u16 = 2093; // C7

/// PC-speaker style beeper; only re-issues the tone when the state flips
pub struct TerminalBeep {
    beeping: bool,
}

impl TerminalBeep {
    pub fn new() -> Self {
        TerminalBeep { beeping: false }
    }
}

impl Default for TerminalBeep {
    fn default() -> Self {
        TerminalBeep::new()
    }
}

impl Sound for TerminalBeep {
    fn set_beeping(&mut self, on: bool) -> Result<(), Box<dyn Error>> {
        if on != self.beeping {
            beep(if on { BEEP_PITCH_HZ } else { 0 })?;
            self.beeping = on;
        }
        Ok(())
    }
}

/// for machines without a beeper, and for tests
pub struct Mute;

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Default for Mute {
    fn default() -> Self {
        Mute::new()
    }
}

impl Sound for Mute {
    fn set_beeping(&mut self, _on: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
