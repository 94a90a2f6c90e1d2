//! Application systems
//!
//! Window and presentation plumbing kept out of main.rs.

mod present;
mod window;

pub use present::{PresentError, PresentSystem};
pub use window::{WindowError, WindowSystem};
