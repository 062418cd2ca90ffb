//! Fermi-Dirac CLI library.
//!
//! Rendering helpers for the `fermidirac` binary: output formats, text
//! renderers for each evaluator result, and terminal styling.

pub mod output;
pub mod terminal;
