//! The statistics views pgscope knows how to sample.
//!
//! Each view is a named query plus the metadata the engines need: which
//! columns become rates, how rows are matched across snapshots and the
//! default ordering. Views whose underlying system views changed between
//! server releases carry several variants; [`Catalog::configure`] picks the
//! right one for the connected server and renders its query.

mod definitions;
mod error;
mod options;
mod queries;
mod registry;
mod view;

#[cfg(test)]
mod tests;

pub use error::*;
pub use options::*;
pub use registry::*;
pub use view::*;
