//! askama templates for the catalog pages.

use askama::Template;

use crate::error::catalog::CatalogError;
use crate::model::category::Category;
use crate::model::sorted_courses::YearGroup;

#[derive(Template)]
#[template(path = "catalog_courses.html")]
struct CatalogCoursesTemplate<'a> {
    sorted_courses: &'a [YearGroup],
}

#[derive(Template)]
#[template(path = "catalog_categories.html")]
struct CatalogCategoriesTemplate<'a> {
    categories: &'a [Category],
}

#[derive(Template)]
#[template(path = "catalog.html")]
struct CatalogPageTemplate<'a> {
    anchor_id: &'a str,
    courses: &'a str,
}

pub fn render_courses(sorted_courses: &[YearGroup]) -> Result<String, CatalogError> {
    Ok(CatalogCoursesTemplate { sorted_courses }.render()?)
}

pub fn render_categories(categories: &[Category]) -> Result<String, CatalogError> {
    Ok(CatalogCategoriesTemplate { categories }.render()?)
}

/// Initial page: an empty anchor carrying the course ids to load.
pub fn render_page(anchor_id: &str, courses: &str) -> Result<String, CatalogError> {
    Ok(CatalogPageTemplate { anchor_id, courses }.render()?)
}
