use crate::error::catalog::CatalogError;

/// The one place failures are reported: fetch or render, nothing is retried.
pub fn display_exception(err: &CatalogError) {
    log::error!("{}", err);
    if let Some(source) = err.source_error() {
        log::debug!("caused by: {:?}", source);
    }
    eprintln!("✗ {}", err.message);
}
