//! Configuration sources, in increasing precedence.

pub mod defaults;
pub mod environment;
