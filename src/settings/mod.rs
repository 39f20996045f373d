//! Configuration loading and resolution.
//!
//! `load` layers built-in defaults, config files, `FRZY_*` environment
//! variables and command-line flags, then validates the result into a
//! [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
