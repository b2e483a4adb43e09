//! Error types for console operations.
//!
//! Nothing here is fatal: the console remains usable after every variant.
//! Callers surface `NotPowered` to the operator; `UnknownChannel` indicates
//! a control surface addressing a slot the layout does not have.

use thiserror::Error;

use crate::channel::ChannelId;

/// Errors reported by the console's control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A channel or master operation was invoked while powered off.
    /// The operation had no effect.
    #[error("console is powered off")]
    NotPowered,

    /// The addressed channel does not exist in the console layout.
    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),
}
