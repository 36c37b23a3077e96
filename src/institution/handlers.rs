use actix_web::{web, HttpRequest, HttpResponse};

use super::{ModeView, SchoolBranding};
use crate::error::Result;
use crate::session::bearer_token;
use crate::state::AppState;

#[utoipa::path(
    context_path = "/api",
    tag = "Institution",
    get,
    path = "/institution/mode",
    responses(
        (status = 200, description = "Institution type, language, tabs, labels and quick picks"),
        (status = 401, description = "Missing bearer token", body = crate::ErrorResponse)
    )
)]
pub async fn get_mode(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let mode = state.institution_mode(&token).await;
    Ok(HttpResponse::Ok().json(ModeView::from(mode)))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Institution",
    get,
    path = "/branding",
    responses(
        (status = 200, description = "Merged institution branding", body = SchoolBranding),
        (status = 401, description = "Missing bearer token", body = crate::ErrorResponse)
    )
)]
pub async fn get_branding(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    Ok(HttpResponse::Ok().json(state.branding(&token).await))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/institution/mode").route(web::get().to(get_mode)))
        .service(web::resource("/branding").route(web::get().to(get_branding)));
}
