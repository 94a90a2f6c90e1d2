//! View Input Handling
//!
//! This crate turns keyboard presses into a view transform that is applied
//! to the rendering engine once per frame.

mod view_controller;

pub use view_controller::{ViewController, ViewTransform};
