use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::io;
use std::time::{Duration, Instant};

/// the conventional mapping of the left-hand side of a qwerty keyboard onto
/// the 4x4 hex pad, laid out here as the keyboard rows
const CHIP8_QWERTY_KEYMAP: [(char, u8); 16] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xc),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xd),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xe),
    ('z', 0xa),
    ('x', 0x0),
    ('c', 0xb),
    ('v', 0xf),
];

/// Terminals report presses (and auto-repeats) but no release edge, so a
/// key counts as held for this long after its last event. Must outlast the
/// terminal's auto-repeat gap or held keys flicker.
const KEY_HELD_WINDOW: Duration = Duration::from_millis(200);

/// Collects keypad state for the interpreter.
pub trait Input {
    /// a fresh snapshot of all 16 key states
    fn poll_keys(&mut self) -> Result<[bool; 16], io::Error>;

    /// whether the user asked to quit the emulator
    fn should_close(&self) -> bool;
}

/// reads the terminal keyboard via crossterm; Escape requests quit
pub struct TermInput {
    last_seen: [Option<Instant>; 16],
    close: bool,
}

impl TermInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            last_seen: [None; 16],
            close: false,
        })
    }

    fn drain_events(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char(key) => match lookup(key) {
                        Some(mapped) => self.last_seen[usize::from(mapped)] = Some(Instant::now()),
                        None => log::warn!("no pad key for {:?}", key),
                    },
                    KeyCode::Esc => self.close = true,
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(())
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn poll_keys(&mut self) -> Result<[bool; 16], io::Error> {
        self.drain_events()?;
        let now = Instant::now();
        let mut keys = [false; 16];
        for (key, seen) in keys.iter_mut().zip(self.last_seen.iter()) {
            *key = matches!(seen, Some(at) if now.duration_since(*at) < KEY_HELD_WINDOW);
        }
        Ok(keys)
    }

    fn should_close(&self) -> bool {
        self.close
    }
}

fn lookup(key: char) -> Option<u8> {
    CHIP8_QWERTY_KEYMAP
        .iter()
        .find(|&&(ch, _)| ch == key)
        .map(|&(_, pad)| pad)
}

/// scripted Input implementation for testing
pub struct DummyInput {
    frames: Vec<[bool; 16]>,
}

impl DummyInput {
    pub fn new(frames: &[[bool; 16]]) -> Self {
        let mut frames = frames.to_vec();
        frames.reverse();
        DummyInput { frames }
    }
}

impl Input for DummyInput {
    fn poll_keys(&mut self) -> Result<[bool; 16], io::Error> {
        Ok(self.frames.pop().unwrap_or([false; 16]))
    }

    fn should_close(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_the_pad() {
        let mut pads: Vec<u8> = CHIP8_QWERTY_KEYMAP.iter().map(|&(_, pad)| pad).collect();
        pads.sort_unstable();
        assert_eq!(pads, (0x0..=0xf).collect::<Vec<u8>>());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup('x'), Some(0x0));
        assert_eq!(lookup('4'), Some(0xc));
        assert_eq!(lookup('p'), None);
    }

    #[test]
    fn test_dummy_input_plays_frames_then_closes() -> Result<(), io::Error> {
        let mut held = [false; 16];
        held[3] = true;
        let mut input = DummyInput::new(&[held, [false; 16]]);
        assert!(!input.should_close());
        assert_eq!(input.poll_keys()?, held);
        assert_eq!(input.poll_keys()?, [false; 16]);
        assert!(input.should_close());
        Ok(())
    }
}
