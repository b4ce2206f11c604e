//! The boundary to the database: an already-open handle that can run a
//! statistics query, plus the server metadata the catalog adapts to.

mod error;
mod pg_client;
mod server_info;


pub use error::*;
pub use server_info::*;

use crate::matrix::Matrix;

/// A query-capable handle. Every cell comes back as nullable text.
pub trait StatSource {
    fn query(&mut self, sql: &str) -> Result<Matrix, SourceError>;
}
