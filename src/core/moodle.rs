use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::catalog::CatalogError;
use crate::http::moodle_exception_middleware::MoodleExceptionMiddleware;
use crate::http::token_middleware::TokenMiddleware;
use crate::model::category::Category;
use crate::model::course::{Course, CoursesResponse};

const REST_ENDPOINT: &str = "webservice/rest/server.php";

/// Where the catalog gets its courses and categories from.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn get_courses_by_ids(&self, ids: &[u64]) -> Result<Vec<Course>, CatalogError>;

    async fn get_courses_from_category_id(&self, category_id: u64) -> Result<Vec<Course>, CatalogError>;

    async fn get_categories(&self, parent_id: u64) -> Result<Vec<Category>, CatalogError>;
}

/// Moodle REST web service client.
pub struct MoodleClient {
    client: ClientWithMiddleware,
    site_url: String,
}

impl MoodleClient {
    pub fn new(site_url: &str, token: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(concat!("envasyllabus/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(site_url, token, client)
    }

    pub fn with_client(site_url: &str, token: &str, client: Client) -> Result<Self, CatalogError> {
        // validated once here so endpoint() can only fail on a broken join
        Url::parse(site_url)?;

        let client = ClientBuilder::new(client)
            .with(TokenMiddleware::new(token))
            .with(MoodleExceptionMiddleware)
            .build();

        Ok(MoodleClient {
            client,
            site_url: site_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    fn endpoint(&self, function: &str, args: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}/{}", self.site_url, REST_ENDPOINT))?;
        url.query_pairs_mut()
            .append_pair("wsfunction", function)
            .append_pair("moodlewsrestformat", "json");
        for (key, value) in args {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(function, args)?;
        log::debug!("calling {}", function);

        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn get_courses_by_field(&self, field: &str, value: String) -> Result<Vec<Course>, CatalogError> {
        let response: CoursesResponse = self
            .call(
                "core_course_get_courses_by_field",
                &[("field", field.to_string()), ("value", value)],
            )
            .await?;

        for warning in &response.warnings {
            log::warn!("{}: {}", warning.warning_code, warning.message);
        }
        log::info!("fetched {} courses", response.courses.len());
        Ok(response.courses)
    }
}

#[async_trait]
impl CourseRepository for MoodleClient {
    async fn get_courses_by_ids(&self, ids: &[u64]) -> Result<Vec<Course>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let value = ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
        self.get_courses_by_field("ids", value).await
    }

    async fn get_courses_from_category_id(&self, category_id: u64) -> Result<Vec<Course>, CatalogError> {
        self.get_courses_by_field("category", category_id.to_string()).await
    }

    async fn get_categories(&self, parent_id: u64) -> Result<Vec<Category>, CatalogError> {
        let categories: Vec<Category> = self
            .call(
                "core_course_get_categories",
                &[
                    ("criteria[0][key]", "parent".to_string()),
                    ("criteria[0][value]", parent_id.to_string()),
                ],
            )
            .await?;
        log::info!("fetched {} categories under {}", categories.len(), parent_id);
        Ok(categories)
    }
}
