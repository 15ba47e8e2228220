use crate::core::catalog::{self, GroupingOptions};
use crate::core::html_parser;
use crate::core::moodle::CourseRepository;
use crate::core::render;
use crate::error::catalog::CatalogError;
use crate::model::sorted_courses::SortedCourses;

/// Fills the catalog anchor of a page: fetch, group, render, replace.
pub struct CatalogPage<'a> {
    repository: &'a dyn CourseRepository,
    options: &'a GroupingOptions,
}

impl<'a> CatalogPage<'a> {
    pub fn new(repository: &'a dyn CourseRepository, options: &'a GroupingOptions) -> Self {
        CatalogPage { repository, options }
    }

    /// Fetches and groups the given courses without rendering them.
    pub async fn load(&self, course_ids: &[u64]) -> Result<SortedCourses, CatalogError> {
        let courses = self.repository.get_courses_by_ids(course_ids).await?;
        let sorted_courses = catalog::sort_courses(&courses, self.options);
        log::info!(
            "{} of {} courses grouped into {} years",
            sorted_courses
                .iter()
                .flat_map(|year| year.semesters.iter())
                .map(|semester| semester.courses.len())
                .sum::<usize>(),
            courses.len(),
            sorted_courses.len()
        );
        Ok(SortedCourses { sorted_courses })
    }

    pub async fn init(&self, document: &str, anchor_id: &str) -> Result<String, CatalogError> {
        let course_ids = html_parser::extract_course_ids(document, anchor_id)?;
        log::debug!("anchor #{} lists courses {:?}", anchor_id, course_ids);

        let sorted = self.load(&course_ids).await?;
        let markup = render::render_courses(&sorted.sorted_courses)?;
        html_parser::replace_node_contents(document, anchor_id, &markup)
    }

    pub async fn init_categories(
        &self,
        document: &str,
        anchor_id: &str,
        parent_id: u64,
    ) -> Result<String, CatalogError> {
        let categories = self.repository.get_categories(parent_id).await?;
        let markup = render::render_categories(&categories)?;
        html_parser::replace_node_contents(document, anchor_id, &markup)
    }
}
