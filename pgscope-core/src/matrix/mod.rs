//! Query results and the engines that operate on them.
//!
//! A [`Matrix`] is what one statistics query returns: column names plus rows
//! of nullable text cells. Two matrices taken some seconds apart are turned
//! into a rate-normalized delta by [`diff`], ordered by [`sort`] and sized
//! for tabular output by [`align`].
//!
//! The data flow for one rendered sample is:
//!
//! previous Matrix + current Matrix
//! diff
//! sort
//! align
//! rendered rows
//!

mod align;
mod diff;
mod error;
mod result;
mod sort;

#[cfg(test)]
pub(crate) mod tests;

pub use align::*;
pub use diff::*;
pub use error::*;
pub use result::*;
pub use sort::*;
