//! Library components of the `importer` command-line tool.

pub mod logging;
pub mod overrides;
