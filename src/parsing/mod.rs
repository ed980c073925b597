//! Stateless building blocks of the parser.
//!
//! - [`classifier`] - line grammars returning a typed [`LineKind`]
//! - [`timestamp`] - clock-time resolution against the active date header
//!
//! The stateful driver that strings these together lives in
//! [`crate::parser`].

pub mod classifier;
pub mod timestamp;

pub use classifier::{Layout, LineKind, MessageLine, classify};
pub use timestamp::{Meridiem, resolve};
