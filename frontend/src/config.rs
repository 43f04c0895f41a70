use shared::ApiConfig;
use web_sys::UrlSearchParams;

/// Build-time `CLOCK_API_BASE` / `CLOCK_API_TIMEOUT_MS`, then the page's
/// `?api_base=` / `?timeout_ms=` query parameters.
pub fn resolve_api_config() -> ApiConfig {
    let mut config = ApiConfig::default();

    if let Some(base) = option_env!("CLOCK_API_BASE") {
        config = config.with_base_url(base);
    }
    if let Some(timeout) = option_env!("CLOCK_API_TIMEOUT_MS") {
        config = config.with_timeout(timeout);
    }

    if let Some(params) = query_params() {
        if let Some(base) = params.get("api_base") {
            config = config.with_base_url(&base);
        }
        if let Some(timeout) = params.get("timeout_ms") {
            config = config.with_timeout(&timeout);
        }
    }

    log::info!(
        "Detection service: {} (timeout: {:?} ms)",
        config.detect_time_url(),
        config.request_timeout_ms
    );
    config
}

fn query_params() -> Option<UrlSearchParams> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}
