use crate::catalog::{Catalog, CatalogError};
use crate::cli::DescribeArgs;
use anyhow::{Result, anyhow};
use std::io::Write;

pub fn run<W: Write>(args: &DescribeArgs, out: &mut W) -> Result<()> {
    let catalog = Catalog::builtin();

    let Some(view) = &args.view else {
        for name in catalog.names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    };

    match catalog.describe(view) {
        Ok(text) => {
            write!(out, "{text}")?;
            Ok(())
        }
        Err(err @ CatalogError::UnknownView { .. }) => Err(anyhow!(
            "{err}, known views: {}",
            catalog.names().join(", ")
        )),
        Err(err) => Err(err.into()),
    }
}
