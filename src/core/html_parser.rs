use scraper::{ElementRef, Html, Selector};

use crate::error::catalog::CatalogError;

fn selector(css: &str) -> Result<Selector, CatalogError> {
    Selector::parse(css).map_err(|err| CatalogError::new(&format!("bad selector {}: {}", css, err)))
}

fn find_by_id<'a>(document: &'a Html, id: &str) -> Result<Option<ElementRef<'a>>, CatalogError> {
    let with_id = selector("[id]")?;
    Ok(document
        .select(&with_id)
        .find(|element| element.value().id() == Some(id)))
}

/// Reads the course ids from the `data-courses` attribute nested in the anchor.
pub fn extract_course_ids(html: &str, anchor_id: &str) -> Result<Vec<u64>, CatalogError> {
    let document = Html::parse_document(html);
    let anchor = find_by_id(&document, anchor_id)?
        .ok_or_else(|| CatalogError::new(&format!("anchor #{} not found", anchor_id)))?;

    let data_selector = selector("[data-courses]")?;
    let raw = anchor
        .select(&data_selector)
        .next()
        .and_then(|element| element.value().attr("data-courses"))
        .ok_or_else(|| CatalogError::new(&format!("no data-courses inside #{}", anchor_id)))?;

    parse_course_ids(raw)
}

/// Accepts a JSON list of ids, written either as strings or as numbers.
pub fn parse_course_ids(raw: &str) -> Result<Vec<u64>, CatalogError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    values
        .iter()
        .map(|value| match value {
            serde_json::Value::Number(number) => number.as_u64(),
            serde_json::Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| CatalogError::new(&format!("invalid course id {}", value))))
        .collect()
}

/// Replaces everything inside the anchor element with `markup` and returns
/// the serialized document. The output is always a full `<html>` document;
/// it starts with a doctype only when the input did.
pub fn replace_node_contents(html: &str, anchor_id: &str, markup: &str) -> Result<String, CatalogError> {
    let document = Html::parse_document(html);
    let anchor = find_by_id(&document, anchor_id)?
        .ok_or_else(|| CatalogError::new(&format!("anchor #{} not found", anchor_id)))?;

    let outer = anchor.html();
    let inner = anchor.inner_html();
    let closing = format!("</{}>", anchor.value().name());
    let opening = outer
        .strip_suffix(&closing)
        .and_then(|rest| rest.strip_suffix(&inner))
        .ok_or_else(|| CatalogError::new(&format!("anchor #{} has no content to replace", anchor_id)))?;

    let serialized = document.root_element().html();
    if !serialized.contains(&outer) {
        return Err(CatalogError::new(&format!("anchor #{} could not be replaced", anchor_id)));
    }
    let replacement = format!("{}{}{}", opening, markup, closing);
    let replaced = serialized.replacen(&outer, &replacement, 1);
    if has_doctype(html) {
        Ok(format!("<!DOCTYPE html>\n{}", replaced))
    } else {
        Ok(replaced)
    }
}

fn has_doctype(html: &str) -> bool {
    html.trim_start()
        .get(..9)
        .map_or(false, |start| start.eq_ignore_ascii_case("<!doctype"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html><html><head><title>Catalog</title></head><body>
        <div id="local-envasyllabus-catalog"><div data-courses="[&quot;759&quot;,&quot;763&quot;]"></div></div>
        <div id="footer">footer</div>
    </body></html>"#;

    #[test]
    fn extracts_string_ids() {
        let ids = extract_course_ids(PAGE, "local-envasyllabus-catalog").unwrap();
        assert_eq!(ids, vec![759, 763]);
    }

    #[test]
    fn extracts_numeric_ids() {
        let html = r#"<div id="catalog"><span data-courses='[1, 2, 3]'></span></div>"#;
        assert_eq!(extract_course_ids(html, "catalog").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let err = extract_course_ids(PAGE, "nope").unwrap_err();
        assert!(err.message.contains("#nope"));
    }

    #[test]
    fn data_attribute_must_be_inside_anchor() {
        let html = r#"<div id="catalog"></div><div data-courses='["1"]'></div>"#;
        assert!(extract_course_ids(html, "catalog").is_err());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_course_ids(r#"["12", "abc"]"#).is_err());
        assert!(parse_course_ids(r#"[true]"#).is_err());
        assert!(parse_course_ids("759,763").is_err());
    }

    #[test]
    fn empty_list_is_fine() {
        assert!(parse_course_ids("[]").unwrap().is_empty());
    }

    #[test]
    fn replaces_only_anchor_contents() {
        let result =
            replace_node_contents(PAGE, "local-envasyllabus-catalog", "<p class=\"x\">rendered</p>").unwrap();

        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains(r#"<div id="local-envasyllabus-catalog"><p class="x">rendered</p></div>"#));
        assert!(!result.contains("data-courses"));
        assert!(result.contains(r#"<div id="footer">footer</div>"#));
        assert!(result.contains("<title>Catalog</title>"));
    }

    #[test]
    fn fragment_gets_no_doctype() {
        let html = r#"<div id="catalog"><div data-courses='["1"]'></div></div>"#;
        let result = replace_node_contents(html, "catalog", "<p>rendered</p>").unwrap();
        assert!(!result.to_ascii_lowercase().contains("<!doctype"));
        assert!(result.contains(r#"<div id="catalog"><p>rendered</p></div>"#));
    }

    #[test]
    fn lowercase_doctype_is_kept() {
        let html = "<!doctype html><html><body><div id=\"catalog\">old</div></body></html>";
        let result = replace_node_contents(html, "catalog", "new").unwrap();
        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains(r#"<div id="catalog">new</div>"#));
    }

    #[test]
    fn replace_fails_without_anchor() {
        assert!(replace_node_contents(PAGE, "missing", "<p></p>").is_err());
    }
}
