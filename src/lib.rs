//! Yet Another Raycaster in Rust.
//!
//! A grid-based software raycaster: per-column DDA wall casting,
//! scanline floor/ceiling projection, billboard sprites with
//! depth-buffer occlusion, and a panorama sky, composited into a plain
//! `u32` framebuffer.

pub mod renderer;
pub mod sim;
pub mod world;
