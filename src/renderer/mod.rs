//! WebGPU rendering module
//!
//! Everything is procedural geometry: `scene` turns the game state into
//! colored triangles, `pipeline` uploads and draws them.

pub mod glyphs;
pub mod palette;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use palette::Palette;
pub use pipeline::{RenderError, RenderState};
pub use scene::{Frame, Layer, compose};
pub use vertex::{Color, Vertex};
