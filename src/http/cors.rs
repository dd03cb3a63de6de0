//! Cross-origin resource sharing.
//!
//! The browser front end is served from a different origin than the API. The
//! default configuration accepts any origin with credentials. A literal `*`
//! cannot be sent alongside `Access-Control-Allow-Credentials`, so in that case
//! the origin, method and headers are mirrored back from the request instead.

use http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer for `config`.
///
/// Origins that are not valid header values are skipped; `AppConfig::validate`
/// rejects them before the server starts.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = match (config.allows_any_origin(), config.allow_credentials) {
        (true, true) => AllowOrigin::mirror_request(),
        (true, false) => AllowOrigin::any(),
        (false, _) => AllowOrigin::list(
            config
                .allow_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        ),
    };

    let layer = CorsLayer::new().allow_origin(origin);
    if config.allow_credentials {
        layer
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    } else {
        layer.allow_methods(Any).allow_headers(Any)
    }
}
