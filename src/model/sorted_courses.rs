use serde::Serialize;

use crate::model::course::Course;

/// A fetched course plus the two presentation-only fields.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourse {
    #[serde(flatten)]
    pub course: Course,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub course_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SemesterGroup {
    pub semester: String,
    pub courses: Vec<CatalogCourse>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct YearGroup {
    pub year: String,
    pub semesters: Vec<SemesterGroup>,
}

/// Template context for the course catalog.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SortedCourses {
    pub sorted_courses: Vec<YearGroup>,
}
