use serde::{Deserialize, Serialize};

/// One entry of `core_course_get_categories`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub idnumber: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub parent: u64,

    #[serde(default)]
    pub sortorder: u64,

    #[serde(default)]
    pub coursecount: u64,

    #[serde(default)]
    pub visible: Option<u8>,

    #[serde(default)]
    pub depth: u32,

    #[serde(default)]
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_category_list() {
        let json = r#"[
            {"id": 125, "name": "Première année", "idnumber": "", "description": "<p>A1</p>",
             "descriptionformat": 1, "parent": 124, "sortorder": 10000, "coursecount": 12,
             "visible": 1, "visibleold": 1, "timemodified": 1650000000, "depth": 2,
             "path": "/124/125", "theme": ""}
        ]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].parent, 124);
        assert_eq!(categories[0].coursecount, 12);
        assert_eq!(categories[0].path, "/124/125");
    }
}
