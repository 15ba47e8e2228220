//! TOML configuration for the catalog.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::{EmptyYearPolicy, GroupOrder, GroupingOptions, SEMESTER_FIELD, YEAR_FIELD};
use crate::core::context::{CatalogContext, DEFAULT_ANCHOR_ID};
use crate::error::catalog::CatalogError;

pub const TOKEN_ENV: &str = "ENVASYLLABUS_TOKEN";

/// Moodle site settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL, also used for course links
    pub url: String,
    /// Web service token
    pub token: String,
}

/// Catalog page settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub anchor_id: String,
    /// Courses listed on the page
    pub course_ids: Vec<u64>,
    pub year_field: String,
    pub semester_field: String,
    pub empty_years: EmptyYearPolicy,
    pub order: GroupOrder,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// error, warn, info, debug or trace
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            url: "http://localhost".to_string(),
            token: String::new(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let context = CatalogContext::default();
        CatalogConfig {
            anchor_id: DEFAULT_ANCHOR_ID.to_string(),
            course_ids: context.course_ids,
            year_field: YEAR_FIELD.to_string(),
            semester_field: SEMESTER_FIELD.to_string(),
            empty_years: EmptyYearPolicy::default(),
            order: GroupOrder::default(),
        }
    }
}

impl Config {
    /// `~/.config/envasyllabus/config.toml` on Linux, the platform equivalent elsewhere.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("envasyllabus")
            .join("config.toml")
    }

    /// Loads an explicit file, or the default one when it exists, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("no config at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.site.token = token.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| CatalogError::new(&format!("cannot read {}: {}", path.display(), err)))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn grouping_options(&self) -> GroupingOptions {
        GroupingOptions {
            site_url: self.site.url.clone(),
            year_field: self.catalog.year_field.clone(),
            semester_field: self.catalog.semester_field.clone(),
            empty_years: self.catalog.empty_years,
            order: self.catalog.order,
        }
    }

    pub fn catalog_context(&self) -> CatalogContext {
        CatalogContext::new(&self.catalog.anchor_id, self.catalog.course_ids.clone())
    }
}
