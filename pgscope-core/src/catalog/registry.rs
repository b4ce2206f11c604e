use crate::catalog::definitions::{BUILTIN_VIEWS, ViewDef};
use crate::catalog::{CatalogError, MIN_SUPPORTED_VERSION, QueryOptions, View, ViewSet};
use crate::source::{PgVersion, ServerInfo};
use std::fmt;
use tracing::debug;

/// Read-only registry of every view pgscope can sample.
#[derive(Clone, Copy)]
pub struct Catalog {
    defs: &'static [ViewDef],
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("views", &self.names())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            defs: BUILTIN_VIEWS,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.defs.iter().map(|d| d.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.def(name).is_ok()
    }

    fn def(&self, name: &str) -> Result<&'static ViewDef, CatalogError> {
        self.defs
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| CatalogError::UnknownView {
                name: name.to_string(),
            })
    }

    /// Human readable description of a view, including its minimum server version.
    pub fn describe(&self, name: &str) -> Result<String, CatalogError> {
        let def = self.def(name)?;
        let mut out = format!(
            "{}\n\n{}\n\nAvailable since PostgreSQL {}",
            def.name,
            def.description,
            PgVersion(def.since())
        );
        if def.needs_statements {
            out.push_str(", requires the pg_stat_statements extension");
        }
        out.push('\n');
        Ok(out)
    }

    /// Every column name any variant of `name` produces, in first-seen order.
    pub fn column_names(&self, name: &str) -> Result<Vec<&'static str>, CatalogError> {
        let def = self.def(name)?;
        let mut names: Vec<&'static str> = Vec::new();
        for column in def.variants.iter().flat_map(|v| v.columns.iter().copied()) {
            if !names.contains(&column) {
                names.push(column);
            }
        }
        Ok(names)
    }

    /// A session view built from the newest variant with default options.
    pub fn view(&self, name: &str) -> Result<View, CatalogError> {
        let def = self.def(name)?;
        let variant = def.newest().ok_or_else(|| CatalogError::InvalidView {
            view: name.to_string(),
            reason: "no variants".to_string(),
        })?;
        variant.build(def.name, &QueryOptions::default())
    }

    /// A session view matching columns read back from an archive.
    pub fn view_for_columns(&self, name: &str, columns: &[String]) -> Result<View, CatalogError> {
        let def = self.def(name)?;
        let variant = def
            .variant_with_columns(columns)
            .ok_or_else(|| CatalogError::UnknownLayout {
                view: name.to_string(),
                columns: columns.to_vec(),
            })?;
        variant.build(def.name, &QueryOptions::default())
    }

    /// Pick and render the variant of every view the server can answer.
    ///
    /// Views newer than the server, and statement views when
    /// `pg_stat_statements` is not installed, are left out.
    pub fn configure(
        &self,
        server: &ServerInfo,
        options: &QueryOptions,
    ) -> Result<ViewSet, CatalogError> {
        if server.version_num < MIN_SUPPORTED_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                version: server.version(),
                minimum: PgVersion(MIN_SUPPORTED_VERSION),
            });
        }

        let has_statements = options.statements_schema.is_some();
        let mut views = Vec::with_capacity(self.defs.len());

        for def in self.defs {
            if def.needs_statements && !has_statements {
                debug!(view = def.name, "pg_stat_statements is not installed, skipping view");
                continue;
            }

            let Some(variant) = def.variant_for(server.version_num) else {
                debug!(
                    view = def.name,
                    since = %PgVersion(def.since()),
                    server = %server.version(),
                    "view is not available on this server, skipping"
                );
                continue;
            };

            views.push(variant.build(def.name, options)?);
        }

        Ok(ViewSet::new(views))
    }
}
