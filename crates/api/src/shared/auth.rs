use crate::error::TicklerError;
use actix_web::HttpRequest;
use tickler_infra::TicklerContext;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects the request unless it carries the configured api key.
/// When no api key is configured every request is let through.
pub fn protect_route(http_req: &HttpRequest, ctx: &TicklerContext) -> Result<(), TicklerError> {
    let api_key = match &ctx.config.api_key {
        Some(api_key) => api_key,
        None => return Ok(()),
    };

    match http_req.headers().get(API_KEY_HEADER) {
        Some(value) if value.as_bytes() == api_key.as_bytes() => Ok(()),
        Some(_) => Err(TicklerError::Unauthorized(format!(
            "Invalid `{}` header provided",
            API_KEY_HEADER
        ))),
        None => Err(TicklerError::Unauthorized(format!(
            "Missing `{}` header",
            API_KEY_HEADER
        ))),
    }
}
