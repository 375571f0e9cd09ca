//! Data structures shared by every stage of the notices pipeline.
//!
//! A [`Component`] is built once per run by either the registry fetcher or
//! the bundled scanner, collected into a [`ComponentSet`] that deduplicates
//! on identity and iterates in report order, then rendered by the writers.

mod component;
mod license;

pub use component::*;
pub use license::*;
