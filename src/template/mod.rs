//! Configuration templating.
//!
//! - [`engine`]: the Tera-based template language and its reserved variables
//! - [`metadata`]: documentation-mode rendering and default harvesting
//! - [`renderer`]: rendering files and folders through the shared layout

pub mod engine;
pub mod metadata;
pub mod renderer;


pub use metadata::{TemplateDoc, TemplateVars, extract_metadata};
pub use renderer::{RenderedFile, Renderer};
