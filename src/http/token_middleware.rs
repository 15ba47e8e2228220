use std::sync::Arc;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use http::Extensions;

/// Moodle reads the web service token from the `wstoken` query parameter.
pub struct TokenMiddleware {
    pub token_fn: Arc<dyn Fn() -> Option<String> + Send + Sync>,
}

impl TokenMiddleware {
    pub fn new(token: &str) -> Self {
        let token = token.to_string();
        TokenMiddleware {
            token_fn: Arc::new(move || Some(token.clone()).filter(|t| !t.is_empty())),
        }
    }
}

#[async_trait::async_trait]
impl Middleware for TokenMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(token) = (self.token_fn)() {
            let already_set = req.url().query_pairs().any(|(key, _)| key == "wstoken");
            if !already_set {
                req.url_mut().query_pairs_mut().append_pair("wstoken", &token);
            }
        }
        next.run(req, extensions).await
    }
}
