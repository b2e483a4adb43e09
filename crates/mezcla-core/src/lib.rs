//! Mezcla Core - audio node primitives for a virtual mixing console
//!
//! This crate provides the building blocks that the console wires into
//! per-channel signal chains: gain stages, a stereo panner, and shelving
//! equalizer filters, all processing stereo [`Frame`]s one at a time with
//! zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Node System
//!
//! - [`AudioNode`] - Object-safe trait for all signal-chain nodes
//! - [`NodeExt`] - Extension trait for node chaining
//! - [`Chain`] - Zero-cost two-node series combinator
//!
//! ## Parameter Smoothing
//!
//! Zipper-free parameter changes for click-free control moves:
//!
//! - [`SmoothedParam`] - Exponential smoothing (RC-like response)
//!
//! ## Nodes
//!
//! - [`GainNode`] - Smoothed linear gain (trim, fader, master)
//! - [`StereoPanner`] - Pan/balance stage with mono and stereo pan laws
//! - [`ShelfFilter`] - High/low shelving EQ at a fixed corner frequency
//!
//! ## Utilities
//!
//! - [`Biquad`] with RBJ shelf coefficient helpers
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//! - [`clamp01`] for normalized control values
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded front-of-house hardware.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mezcla-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in frame processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Fixed topology friendly**: Nodes carry their own state; the console
//!   decides the wiring once, at construction

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod frame;
pub mod gain;
pub mod math;
pub mod node;
pub mod panner;
pub mod param;
pub mod shelf;

// Re-export main types at crate root
pub use biquad::{Biquad, highshelf_coefficients, lowshelf_coefficients};
pub use frame::{Frame, SILENCE, mono, mono_sum};
pub use gain::GainNode;
pub use math::{clamp01, db_to_linear, linear_to_db};
pub use node::{AudioNode, Chain, NodeExt};
pub use panner::{PanLaw, StereoPanner};
pub use param::SmoothedParam;
pub use shelf::{ShelfFilter, ShelfKind};
