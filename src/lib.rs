//! Core logic for a two-player chess clock.
//!
//! The modules here are hardware-free: the firmware binary binds the
//! [`display::RenderSurface`] and [`alert::AlertEmitter`] seams to the
//! real peripherals, while unit tests bind them to recording mocks.
#![cfg_attr(not(test), no_std)]

pub mod alert;
pub mod clock;
pub mod display;
