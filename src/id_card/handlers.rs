use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{CardType, IdCard};
use crate::error::Result;
use crate::session::{bearer_token, lock_for_mutation, CardsView};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CardsResponse {
    pub view: CardsView,
    pub cards: Vec<IdCard>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateCardsRequest {
    pub card_type: CardType,
    pub person_ids: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardsViewRequest {
    pub view: CardsView,
}

#[derive(Debug, Deserialize)]
pub struct PrintCardsQuery {
    pub id: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    tag = "ID Cards",
    get,
    path = "/id-cards",
    responses(
        (status = 200, description = "Current view and every generated card", body = CardsResponse)
    )
)]
pub async fn list_cards(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let view = workspace.lock().await.cards_view;
    Ok(HttpResponse::Ok().json(CardsResponse {
        view,
        cards: state.cards.cards(),
    }))
}

#[utoipa::path(
    context_path = "/api",
    tag = "ID Cards",
    put,
    path = "/id-cards/view",
    request_body = CardsViewRequest,
    responses((status = 200, description = "View switched", body = CardsResponse))
)]
pub async fn set_cards_view(
    req: HttpRequest,
    body: web::Json<CardsViewRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    workspace.lock().await.cards_view = body.view;
    Ok(HttpResponse::Ok().json(CardsResponse {
        view: body.view,
        cards: state.cards.cards(),
    }))
}

#[utoipa::path(
    context_path = "/api",
    tag = "ID Cards",
    post,
    path = "/id-cards",
    request_body = GenerateCardsRequest,
    responses(
        (status = 201, description = "Cards generated for every known person", body = [IdCard]),
        (status = 409, description = "Another generation is in progress", body = crate::ErrorResponse),
        (status = 500, description = "Cards could not be persisted", body = crate::ErrorResponse)
    )
)]
pub async fn generate_cards(
    req: HttpRequest,
    body: web::Json<GenerateCardsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let branding = state.branding(&token).await;
    let workspace = state.workspace(&token).await;
    let mut workspace = lock_for_mutation(&workspace).await?;

    let cards = state.cards.generate(
        workspace.certificates.people(),
        body.card_type,
        &body.person_ids,
        &branding,
        Utc::now(),
    )?;
    workspace.cards_view = CardsView::Generated;
    Ok(HttpResponse::Created().json(cards))
}

#[utoipa::path(
    context_path = "/api",
    tag = "ID Cards",
    get,
    path = "/id-cards/print",
    params(("id" = Option<String>, Query, description = "Card to print; all cards when absent")),
    responses(
        (status = 200, description = "Print-ready HTML", body = String, content_type = "text/html"),
        (status = 400, description = "No cards to print", body = crate::ErrorResponse),
        (status = 404, description = "Card not found", body = crate::ErrorResponse)
    )
)]
pub async fn print_cards(
    req: HttpRequest,
    query: web::Query<PrintCardsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let mode = state.institution_mode(&token).await;
    let html = state.cards.print(query.id.as_deref(), mode)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/id-cards")
            .route(web::get().to(list_cards))
            .route(web::post().to(generate_cards)),
    )
    .service(web::resource("/id-cards/view").route(web::put().to(set_cards_view)))
    .service(web::resource("/id-cards/print").route(web::get().to(print_cards)));
}
