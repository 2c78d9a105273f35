//! Module lifecycle management.
//!
//! Each agent ships module templates in one or more areas (template folders).
//! A module is enabled or disabled purely by its file name, see [`state`].
//! Enabling or disabling is a rename inside the area folder; this subsystem
//! never creates or deletes module templates.

mod area;
mod info;
mod manager;
pub mod state;


pub use area::{AREAS, ModuleArea};
pub use info::{GlobalVar, GlobalVarCatalog, ModuleTemplateInfo};
pub use manager::{ModuleFile, ModuleListing, ModuleManager};
pub use state::ModuleState;
