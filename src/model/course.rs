use serde::{Deserialize, Serialize};

/// `core_course_get_courses_by_field` response
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CoursesResponse {
    #[serde(default)]
    pub courses: Vec<Course>,

    #[serde(default)]
    pub warnings: Vec<Warning>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Course {
    pub id: u64,

    #[serde(default)]
    pub fullname: String,

    #[serde(default)]
    pub shortname: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub categoryid: Option<u64>,

    #[serde(default)]
    pub overviewfiles: Vec<OverviewFile>,

    #[serde(default)]
    pub customfields: Vec<CustomField>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverviewFile {
    #[serde(default)]
    pub filename: String,

    pub fileurl: String,

    #[serde(default)]
    pub mimetype: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CustomField {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub shortname: String,

    /// Raw field name is "type"
    #[serde(rename = "type", default)]
    pub type_field: String,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub valueraw: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Warning {
    #[serde(default)]
    pub item: Option<String>,

    #[serde(default)]
    pub itemid: Option<u64>,

    #[serde(rename = "warningcode", default)]
    pub warning_code: String,

    #[serde(default)]
    pub message: String,
}

impl Course {
    pub fn new(id: u64, fullname: &str) -> Self {
        Course {
            id,
            fullname: fullname.to_string(),
            shortname: String::new(),
            summary: String::new(),
            categoryid: None,
            overviewfiles: Vec::new(),
            customfields: Vec::new(),
        }
    }

    /// Looks up a custom field value by shortname, then by display name.
    ///
    /// Moodle sends unset fields with an empty value, so blank values are
    /// reported as `None` just like missing fields.
    pub fn custom_field(&self, name: &str) -> Option<&str> {
        self.customfields
            .iter()
            .find(|field| field.shortname == name)
            .or_else(|| self.customfields.iter().find(|field| field.name == name))
            .and_then(|field| field.value.as_deref())
            .filter(|value| !value.trim().is_empty())
    }

    pub fn with_custom_field(mut self, shortname: &str, value: &str) -> Self {
        self.customfields.push(CustomField {
            name: shortname.to_string(),
            shortname: shortname.to_string(),
            type_field: "text".to_string(),
            value: Some(value.to_string()),
            valueraw: Some(serde_json::Value::String(value.to_string())),
        });
        self
    }

    pub fn with_overview_file(mut self, fileurl: &str) -> Self {
        let filename = fileurl.rsplit('/').next().unwrap_or_default().to_string();
        self.overviewfiles.push(OverviewFile {
            filename,
            fileurl: fileurl.to_string(),
            mimetype: None,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_web_service_payload() {
        let json = r#"{
            "courses": [{
                "id": 759,
                "fullname": "Anatomie 1",
                "shortname": "ANAT1",
                "categoryid": 124,
                "overviewfiles": [{
                    "filename": "cover.png",
                    "fileurl": "https://moodle.example/webservice/pluginfile.php/1/course/overviewfiles/cover.png",
                    "mimetype": "image/png"
                }],
                "customfields": [
                    {"name": "Année", "shortname": "uc_annee", "type": "select", "value": "2021", "valueraw": 1},
                    {"name": "Semestre", "shortname": "uc_semestre", "type": "text", "value": "1", "valueraw": "1"}
                ]
            }],
            "warnings": []
        }"#;

        let response: CoursesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.courses.len(), 1);
        let course = &response.courses[0];
        assert_eq!(course.id, 759);
        assert_eq!(course.custom_field("uc_annee"), Some("2021"));
        assert_eq!(course.custom_field("uc_semestre"), Some("1"));
        assert_eq!(course.overviewfiles[0].filename, "cover.png");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let course: Course = serde_json::from_str(r#"{"id": 3, "fullname": "Bare"}"#).unwrap();
        assert!(course.customfields.is_empty());
        assert!(course.overviewfiles.is_empty());
        assert_eq!(course.custom_field("uc_annee"), None);
    }

    #[test]
    fn custom_field_falls_back_to_display_name() {
        let mut course = Course::new(1, "A");
        course.customfields.push(CustomField {
            name: "uc_annee".to_string(),
            shortname: "year".to_string(),
            type_field: "text".to_string(),
            value: Some("2022".to_string()),
            valueraw: None,
        });
        assert_eq!(course.custom_field("uc_annee"), Some("2022"));
        assert_eq!(course.custom_field("year"), Some("2022"));
    }

    #[test]
    fn blank_custom_field_is_absent() {
        let course = Course::new(1, "A")
            .with_custom_field("uc_annee", "2021")
            .with_custom_field("uc_semestre", "  ");
        assert_eq!(course.custom_field("uc_annee"), Some("2021"));
        assert_eq!(course.custom_field("uc_semestre"), None);
    }
}
