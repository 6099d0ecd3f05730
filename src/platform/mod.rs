//! Platform abstraction layer
//!
//! Terminal frontend built on crossterm:
//! - Input events (key mapping, held-direction tracking)
//! - Output (character-cell raster canvas)

pub mod input;
pub mod terminal;

pub use input::{Command, InputMapper};
pub use terminal::TermCanvas;
