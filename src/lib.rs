//! Station Easy Library
//!
//! The headless driver for the Station Easy navigation controller.

pub mod headless;

pub use headless::runner::run_headless;
