use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use http::Extensions;
use crate::model::moodle_exception::MoodleException;

// Moodle answers failed calls with HTTP 200 and an exception object as body
fn is_json_response(content_type: Option<&str>) -> bool {
    content_type.map_or(false, |ct| ct.starts_with("application/json"))
}

fn parse_exception(body: &[u8]) -> Option<MoodleException> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("exception")?;
    serde_json::from_value(value).ok()
}

pub struct MoodleExceptionMiddleware;

#[async_trait::async_trait]
impl Middleware for MoodleExceptionMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let response = next.run(req, extensions).await?;
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok());

        if !is_json_response(content_type) {
            return Ok(response);
        }

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let extensions_clone = response.extensions().clone();

        let body_bytes = response.bytes().await?;

        if let Some(exception) = parse_exception(&body_bytes) {
            log::warn!(
                "web service exception {} ({}): {}",
                exception.exception,
                exception.errorcode,
                exception.message
            );
            if let Some(debuginfo) = &exception.debuginfo {
                log::debug!("web service debug info: {}", debuginfo);
            }
            return Err(reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                "{} ({})",
                exception.message,
                exception.errorcode
            )));
        }

        // body was consumed, hand the caller an equivalent response
        let mut builder = http::Response::builder()
            .status(status)
            .version(version);

        if let Some(headers_map) = builder.headers_mut() {
            for (key, value) in headers.iter() {
                headers_map.insert(key, value.clone());
            }
        }

        let http_response = builder
            .body(body_bytes.to_vec())
            .map_err(|err| reqwest_middleware::Error::Middleware(err.into()))?;

        let mut final_response = Response::from(http_response);
        final_response.extensions_mut().extend(extensions_clone);

        Ok(final_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_exception_body() {
        let body = br#"{"exception":"webservice_access_exception","errorcode":"accessexception","message":"Access control exception"}"#;
        let exception = parse_exception(body).unwrap();
        assert_eq!(exception.errorcode, "accessexception");
        assert_eq!(exception.message, "Access control exception");
        assert!(exception.debuginfo.is_none());
    }

    #[test]
    fn keeps_debug_info() {
        let body = br#"{"exception":"dml_read_exception","errorcode":"dmlreadexception","message":"Error reading from database","debuginfo":"Table 'mdl_course' doesn't exist"}"#;
        let exception = parse_exception(body).unwrap();
        assert_eq!(exception.debuginfo.as_deref(), Some("Table 'mdl_course' doesn't exist"));
    }

    #[test]
    fn regular_payload_is_not_an_exception() {
        assert!(parse_exception(br#"{"courses":[],"warnings":[]}"#).is_none());
        assert!(parse_exception(br#"[{"id":1}]"#).is_none());
        assert!(parse_exception(b"not json").is_none());
    }

    #[test]
    fn only_json_content_is_inspected() {
        assert!(is_json_response(Some("application/json; charset=utf-8")));
        assert!(!is_json_response(Some("text/html")));
        assert!(!is_json_response(None));
    }
}
