pub mod archive;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod matrix;
pub mod source;
