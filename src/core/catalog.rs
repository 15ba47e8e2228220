//! Groups fetched courses by year and semester for the catalog page.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::model::course::Course;
use crate::model::sorted_courses::{CatalogCourse, SemesterGroup, YearGroup};

pub const YEAR_FIELD: &str = "uc_annee";
pub const SEMESTER_FIELD: &str = "uc_semestre";

/// What happens to a year whose only courses have no semester.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyYearPolicy {
    /// Year groups are only created for courses that have a semester too.
    #[default]
    Drop,
    /// The year group is created as soon as a year is seen, and may stay empty.
    Keep,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    /// Years and semesters in order of first appearance.
    #[default]
    FirstSeen,
    /// Integer keys in numeric order, then the other keys in lexical order.
    Sorted,
}

#[derive(Debug, Clone)]
pub struct GroupingOptions {
    pub site_url: String,
    pub year_field: String,
    pub semester_field: String,
    pub empty_years: EmptyYearPolicy,
    pub order: GroupOrder,
}

impl GroupingOptions {
    pub fn new(site_url: &str) -> Self {
        GroupingOptions {
            site_url: site_url.to_string(),
            year_field: YEAR_FIELD.to_string(),
            semester_field: SEMESTER_FIELD.to_string(),
            empty_years: EmptyYearPolicy::default(),
            order: GroupOrder::default(),
        }
    }
}

pub fn sort_courses(courses: &[Course], options: &GroupingOptions) -> Vec<YearGroup> {
    let mut years: Vec<YearGroup> = Vec::new();

    for course in courses {
        let Some(year) = course.custom_field(&options.year_field) else {
            log::debug!("course {} has no {}, skipped", course.id, options.year_field);
            continue;
        };
        let semester = course.custom_field(&options.semester_field);

        if semester.is_none() && options.empty_years == EmptyYearPolicy::Drop {
            log::debug!("course {} has no {}, skipped", course.id, options.semester_field);
            continue;
        }

        let year_index = match years.iter().position(|group| group.year == year) {
            Some(index) => index,
            None => {
                years.push(YearGroup {
                    year: year.to_string(),
                    semesters: Vec::new(),
                });
                years.len() - 1
            }
        };

        let Some(semester) = semester else {
            log::debug!("course {} has no {}, skipped", course.id, options.semester_field);
            continue;
        };

        let semesters = &mut years[year_index].semesters;
        let semester_index = match semesters.iter().position(|group| group.semester == semester) {
            Some(index) => index,
            None => {
                semesters.push(SemesterGroup {
                    semester: semester.to_string(),
                    courses: Vec::new(),
                });
                semesters.len() - 1
            }
        };

        semesters[semester_index].courses.push(CatalogCourse {
            course: course.clone(),
            image_url: display_image_url(course),
            course_url: display_link_url(&options.site_url, course.id),
        });
    }

    if options.order == GroupOrder::Sorted {
        // stable sort, so equal keys keep first-seen order
        years.sort_by(|a, b| compare_keys(&a.year, &b.year));
        for year in &mut years {
            year.semesters.sort_by(|a, b| compare_keys(&a.semester, &b.semester));
        }
    }

    years
}

/// First overview file with the `/webservice` segment removed, so the
/// browser hits the regular pluginfile endpoint.
pub fn display_image_url(course: &Course) -> Option<String> {
    course
        .overviewfiles
        .first()
        .map(|file| file.fileurl.replacen("/webservice", "", 1))
}

pub fn display_link_url(site_url: &str, course_id: u64) -> String {
    format!("{}/course/view.php?id={}", site_url.trim_end_matches('/'), course_id)
}

// integers first in numeric order, then everything else lexically
fn sort_key(key: &str) -> (bool, i64, &str) {
    match key.trim().parse::<i64>() {
        Ok(number) => (false, number, key),
        Err(_) => (true, 0, key),
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}
