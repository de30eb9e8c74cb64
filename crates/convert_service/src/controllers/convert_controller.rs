use actix_web::{http::header::ContentType, web, HttpResponse};

use crate::dto::{ConversionRequest, ConversionResponse};
use crate::error::AppError;
use crate::server::AppState;

/// The body is decoded by hand so malformed JSON gets the same JSON error
/// envelope as every other failure.
async fn convert(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, AppError> {
    let request: ConversionRequest =
        serde_json::from_slice(&body).map_err(AppError::InvalidRequestFormat)?;

    let code = state.converter.convert(&request)?;

    let payload = serde_json::to_string(&ConversionResponse::success(code))
        .map_err(AppError::Encoding)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(payload))
}

async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    for path in ["/convert", "/api/convert"] {
        cfg.service(
            web::resource(path)
                .route(web::post().to(convert))
                .default_service(web::to(method_not_allowed)),
        );
    }
}
