//! Layered variable store for morio.
//!
//! Template variables are stored as flat files, one file per variable,
//! in two tiers:
//!
//! - `vars/defaults/NAME`: written by `morio template` from the defaults a
//!   template declares, or by explicit seeding (`init`, `vars set-default`)
//! - `vars/custom/NAME`: written only by explicit user action
//!
//! The effective value of a variable is its custom value if present, else its
//! default value, else the empty string. Values are always text; callers that
//! need booleans go through [`VarStore::set_flag`] and [`VarStore::flag`].

mod store;
mod value;


pub use store::{VarStore, VarTier, validate_name};
pub use value::stringify_value;
