use std::env;
use std::error::Error;
use std::fs::File;
use std::process;
use std::time::{Duration, Instant};

use vip8::display::{Display, TermDisplay};
use vip8::input::{Input, TermInput};
use vip8::interpreter::Interpreter;
use vip8::sound::{Sound, TerminalBeep};

/// instruction rate; ~700/s suits most classic ROMs
const STEP_RATE_HZ: u32 = 700;
/// display/input refresh rate
const FRAME_RATE_HZ: u32 = 60;
const STEPS_PER_FRAME: u32 = STEP_RATE_HZ / FRAME_RATE_HZ;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = match env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: vip8 <rom.ch8>");
            process::exit(2);
        }
    };

    let mut interpreter = Interpreter::new();
    let mut f = File::open(&path)?;
    let loaded = interpreter.load_rom(&mut f)?;
    log::info!("loaded {} bytes from {}", loaded, path);

    let mut display = TermDisplay::new()?;
    let mut input = TermInput::new()?;
    let mut sound = TerminalBeep::new();

    let result = run(&mut interpreter, &mut display, &mut input, &mut sound);

    sound.set_beeping(false)?;
    // shove some newlines on stdout so the prompt lands below the frame
    for _ in 0..12 {
        println!();
    }
    result
}

fn run(
    interpreter: &mut Interpreter,
    display: &mut impl Display,
    input: &mut impl Input,
    sound: &mut impl Sound,
) -> Result<(), Box<dyn Error>> {
    let frame = Duration::from_secs(1) / FRAME_RATE_HZ;

    display.draw(interpreter.screen())?;
    let mut last_tick = Instant::now();
    loop {
        let frame_started = Instant::now();

        interpreter.set_keys(input.poll_keys()?);
        if input.should_close() {
            log::info!("quit requested");
            return Ok(());
        }

        for _ in 0..STEPS_PER_FRAME {
            if let Err(e) = interpreter.step() {
                log::error!("machine fault: {}", e);
                return Err(e.into());
            }
        }

        let now = Instant::now();
        interpreter.tick_timers(now.duration_since(last_tick).as_secs_f64());
        last_tick = now;

        if interpreter.screen_changed() {
            display.draw(interpreter.screen())?;
            interpreter.clear_screen_changed();
        }
        sound.set_beeping(interpreter.sound_timer() > 0)?;

        spin_sleep::sleep(frame.saturating_sub(frame_started.elapsed()));
    }
}
