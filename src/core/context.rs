use serde::Serialize;

use crate::core::render;
use crate::error::catalog::CatalogError;

pub const DEFAULT_ANCHOR_ID: &str = "local-envasyllabus-catalog";

/// Server side part of the catalog page: which courses to show.
#[derive(Debug, Clone)]
pub struct CatalogContext {
    pub anchor_id: String,
    pub course_ids: Vec<u64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CatalogTemplateContext {
    /// JSON list literal, as read back by the page initializer.
    pub courses: String,
}

impl Default for CatalogContext {
    fn default() -> Self {
        CatalogContext {
            anchor_id: DEFAULT_ANCHOR_ID.to_string(),
            course_ids: vec![759, 763],
        }
    }
}

impl CatalogContext {
    pub fn new(anchor_id: &str, course_ids: Vec<u64>) -> Self {
        CatalogContext {
            anchor_id: anchor_id.to_string(),
            course_ids,
        }
    }

    pub fn export_for_template(&self) -> Result<CatalogTemplateContext, CatalogError> {
        // ids go out as strings, the way the page has always received them
        let ids: Vec<String> = self.course_ids.iter().map(u64::to_string).collect();
        Ok(CatalogTemplateContext {
            courses: serde_json::to_string(&ids)?,
        })
    }

    pub fn render_page(&self) -> Result<String, CatalogError> {
        let context = self.export_for_template()?;
        render::render_page(&self.anchor_id, &context.courses)
    }
}
