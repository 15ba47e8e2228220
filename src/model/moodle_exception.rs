use serde::{Deserialize, Serialize};

/// Body Moodle returns (with HTTP 200) when a web service call fails.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MoodleException {
    pub exception: String,

    #[serde(default)]
    pub errorcode: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub debuginfo: Option<String>,
}
