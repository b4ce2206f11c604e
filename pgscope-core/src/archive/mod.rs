//! The on-disk time series: a tar archive with one JSON entry per view per
//! sample.
//!
//! [`Recorder`] appends samples, [`Reporter`] replays them pairwise through
//! the diff, sort and alignment engines and renders a text report.
//!
//! Entry names are `<view>.<YYYYMMDDThhmmss>.<mmm>.json`; see [`EntryName`].

mod entry;
mod error;
mod recorder;
mod render;
mod reporter;

#[cfg(test)]
mod tests;

pub use entry::*;
pub use error::*;
pub use recorder::*;
pub use render::*;
pub use reporter::*;
