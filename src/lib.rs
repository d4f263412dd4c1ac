//! A CHIP-8 interpreter with a terminal front-end.
//!
//! ## Design
//!
//! * one owned machine state, stepped by the caller; no globals
//! * every opcode decodes to an `Instruction` variant before dispatch, so
//!   the execute match is closed over the instruction set
//! * fatal conditions (bad fetch, stack misuse, unknown opcode, sprite
//!   reads off the end of RAM) come back as errors naming the PC and
//!   opcode; nothing is skipped or guessed
//! * the 60Hz timers run off caller-measured wall time through an
//!   accumulator, so host scheduling jitter doesn't warp emulated time
//! * display, input and sound sit behind traits so alternatives plug in;
//!   the core hands the renderer a read-only pixel grid and a changed flag
//! * quirks follow the modern set: 8xy6/8xyE shift Vx, Bnnn adds V0,
//!   Fx55/Fx65 leave I past the block
//!
//! Model
//!
//! ```text
//! main
//!  |-- display, input, sound
//!  |-- interpreter
//!  |    |-- memory (font + program)
//!  |    |-- instruction decode
//!  |    `-- framebuffer
//!  `-- loop: poll keys -> N steps -> tick timers -> draw if changed -> beep
//! ```

pub mod display;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;
