//! fractal3d - software-rendered 3D fractals
//!
//! Library half of the `fractal3d` binary: configuration, key mapping, the
//! demo scene and the window/presentation systems. The rendering itself
//! lives in `fractal3d_raster`.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
