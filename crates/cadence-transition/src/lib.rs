//! Timed-transition primitives for cadence.
//!
//! A transition is a caller-supplied frame (the state change) run on a
//! timeline described by a [`TransitionSpec`]. The chain runner hands both to
//! a [`TransitionDriver`] and waits for the driver's completion flag; what
//! "running a transition" means (animating a view, fading audio, or just
//! waiting out a timer) belongs entirely to the driver.

mod driver;
mod pace;
mod spec;

pub use driver::{TimerDriver, TransitionDriver, TransitionFrame};
pub use pace::{DEFAULT_DURATION, Speed};
pub use spec::{Curve, TransitionOptions, TransitionSpec};
