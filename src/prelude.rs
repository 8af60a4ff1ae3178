//! Derive macros shared by the value, kind and validity types.
//!
//! `Display` carries the canonical string forms and the DOM flag names, so every
//! module formats through the same `derive_more` attribute syntax.

pub use derive_more::Display;
