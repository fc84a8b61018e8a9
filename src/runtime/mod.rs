//! Runtime for rendering a score to the speaker or a file.
//!
//! This module provides scoped sessions: the sink is opened before the score
//! runs and is always finished afterwards.
//!
//! # Example
//!
//! ```ignore
//! use saavy_synth::{runtime::{self, Destination, StopSignal}, SessionConfig};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let config = SessionConfig::default();
//!     runtime::run(Destination::Device, &config, StopSignal::new(), |synth| {
//!         let a = synth.tone(440.0, 0.5)?;
//!         let e = synth.tone(659.25, 0.5)?;
//!         synth.play_mix(&[vec![a, e]])
//!     })?;
//!     Ok(())
//! }
//! ```

mod session;

pub use session::{run, with_session, Destination, Outcome, StopSignal};
