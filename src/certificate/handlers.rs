use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Local;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::controller::ViewMode;
use super::filter::StatusFilter;
use super::model::{CertificateKind, CertificateStatus};
use crate::error::{CertificateError, Result};
use crate::institution::QuickPick;
use crate::render::{certificate_document, RenderContext};
use crate::session::{bearer_token, lock_for_mutation};
use crate::state::AppState;
use crate::store::DashboardCounts;

fn parse_kind(raw: &str) -> Result<CertificateKind> {
    raw.parse()
        .map_err(|_| CertificateError::NotFound(format!("certificate kind '{raw}'")))
}

/// Raw field values for a form patch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct FormPatch(pub Value);

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    pub search: Option<String>,
    /// `all` or one status.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ViewRequest {
    pub view: ViewMode,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectStudentRequest {
    pub student_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuickPickRequest {
    pub pick: QuickPick,
    pub index: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCertificateRequest {
    #[serde(default = "default_requested_status")]
    pub status: CertificateStatus,
    /// Field values applied to the form before it is submitted.
    #[schema(value_type = Option<Object>)]
    pub form: Option<Value>,
}

fn default_requested_status() -> CertificateStatus {
    CertificateStatus::Draft
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusChangeRequest {
    pub status: CertificateStatus,
}

#[derive(Debug, Deserialize)]
pub struct PrintQuery {
    pub print: Option<bool>,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    get,
    path = "/certificates/dashboard",
    responses(
        (status = 200, description = "Issued and pending totals", body = DashboardCounts),
        (status = 401, description = "Missing bearer token", body = crate::ErrorResponse)
    )
)]
pub async fn dashboard(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let counts = workspace.lock().await.certificates.dashboard().await;
    Ok(HttpResponse::Ok().json(counts))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    get,
    path = "/certificates/{kind}",
    params(
        ("kind" = String, Path, description = "transfer, course, progress, bonafide, adhar, appreciation or character"),
        ("search" = Option<String>, Query, description = "Case-insensitive search text"),
        ("status" = Option<String>, Query, description = "`all` or a certificate status")
    ),
    responses(
        (status = 200, description = "Refreshed and filtered certificates in store order"),
        (status = 400, description = "Unknown status filter", body = crate::ErrorResponse),
        (status = 502, description = "Document store failure", body = crate::ErrorResponse)
    )
)]
pub async fn list_certificates(
    req: HttpRequest,
    kind: web::Path<String>,
    query: web::Query<ListQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let status: StatusFilter = query
        .status
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(CertificateError::InvalidForm)?;
    let token = bearer_token(&req)?;

    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    workspace.certificates.refresh(kind).await?;
    let records = workspace.certificates.filter(
        kind,
        query.search.as_deref().unwrap_or_default(),
        status,
    );
    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    get,
    path = "/certificates/{kind}/workspace",
    params(("kind" = String, Path, description = "Certificate kind")),
    responses((status = 200, description = "View, records, form and selected student of the kind"))
)]
pub async fn get_workspace(
    req: HttpRequest,
    kind: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let workspace = workspace.lock().await;
    Ok(HttpResponse::Ok().json(workspace.certificates.state(kind)))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    put,
    path = "/certificates/{kind}/view",
    params(("kind" = String, Path, description = "Certificate kind")),
    request_body = ViewRequest,
    responses((status = 200, description = "Switched view; opening the form starts a fresh one"))
)]
pub async fn set_view(
    req: HttpRequest,
    kind: web::Path<String>,
    body: web::Json<ViewRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    let kind_state = match body.view {
        ViewMode::Form => workspace.certificates.open_form(kind),
        ViewMode::List => workspace.certificates.show_list(kind),
    };
    Ok(HttpResponse::Ok().json(kind_state))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    patch,
    path = "/certificates/{kind}/form",
    params(("kind" = String, Path, description = "Certificate kind")),
    request_body = FormPatch,
    responses(
        (status = 200, description = "Updated form"),
        (status = 400, description = "Field values of the wrong shape", body = crate::ErrorResponse)
    )
)]
pub async fn update_form(
    req: HttpRequest,
    kind: web::Path<String>,
    patch: web::Json<FormPatch>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    let form = workspace.certificates.update_form(kind, &patch.0 .0)?;
    Ok(HttpResponse::Ok().json(form))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    post,
    path = "/certificates/{kind}/form/reset",
    params(("kind" = String, Path, description = "Certificate kind")),
    responses((status = 200, description = "Empty form"))
)]
pub async fn reset_form(
    req: HttpRequest,
    kind: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    Ok(HttpResponse::Ok().json(workspace.certificates.reset_form(kind)))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    post,
    path = "/certificates/{kind}/form/student",
    params(("kind" = String, Path, description = "Certificate kind")),
    request_body = SelectStudentRequest,
    responses(
        (status = 200, description = "Form filled from the student record"),
        (status = 404, description = "Student not loaded", body = crate::ErrorResponse)
    )
)]
pub async fn select_student(
    req: HttpRequest,
    kind: web::Path<String>,
    body: web::Json<SelectStudentRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    let form = workspace
        .certificates
        .select_student_by_id(kind, &body.student_id)?;
    Ok(HttpResponse::Ok().json(form))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    post,
    path = "/certificates/{kind}/form/quick-pick",
    params(("kind" = String, Path, description = "Certificate kind")),
    request_body = QuickPickRequest,
    responses(
        (status = 200, description = "Form with the suggestion applied"),
        (status = 400, description = "No such suggestion for this form", body = crate::ErrorResponse)
    )
)]
pub async fn apply_quick_pick(
    req: HttpRequest,
    kind: web::Path<String>,
    body: web::Json<QuickPickRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = workspace.lock().await;
    let form = workspace
        .certificates
        .apply_quick_pick(kind, body.pick, body.index)?;
    Ok(HttpResponse::Ok().json(form))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    post,
    path = "/certificates/{kind}",
    params(("kind" = String, Path, description = "Certificate kind")),
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate created"),
        (status = 400, description = "Required fields missing", body = crate::ErrorResponse),
        (status = 409, description = "Another submission is in progress", body = crate::ErrorResponse)
    )
)]
pub async fn create_certificate(
    req: HttpRequest,
    kind: web::Path<String>,
    body: web::Json<CreateCertificateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = lock_for_mutation(&workspace).await?;

    if let Some(ref patch) = body.form {
        workspace.certificates.update_form(kind, patch)?;
    }
    let record = workspace.certificates.create(kind, body.status).await?;
    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    patch,
    path = "/certificates/{kind}/{id}/status",
    params(
        ("kind" = String, Path, description = "Certificate kind; only transfer supports this"),
        ("id" = String, Path, description = "Certificate id")
    ),
    request_body = StatusChangeRequest,
    responses(
        (status = 200, description = "Updated certificate"),
        (status = 400, description = "Kind does not support status changes", body = crate::ErrorResponse),
        (status = 409, description = "Another submission is in progress", body = crate::ErrorResponse),
        (status = 422, description = "Transition not allowed", body = crate::ErrorResponse)
    )
)]
pub async fn change_status(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Json<StatusChangeRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, id) = path.into_inner();
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let mut workspace = lock_for_mutation(&workspace).await?;
    let record = workspace
        .certificates
        .change_status(kind, &id, body.status)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    get,
    path = "/certificates/{kind}/{id}/print",
    params(
        ("kind" = String, Path, description = "Certificate kind"),
        ("id" = String, Path, description = "Certificate id"),
        ("print" = Option<bool>, Query, description = "Open the print dialog on load (default true)")
    ),
    responses(
        (status = 200, description = "Printable HTML document", body = String, content_type = "text/html"),
        (status = 404, description = "Certificate not found", body = crate::ErrorResponse)
    )
)]
pub async fn print_certificate(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    query: web::Query<PrintQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, id) = path.into_inner();
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let branding = state.branding(&token).await;
    let workspace = state.workspace(&token).await;
    let workspace = workspace.lock().await;

    let record = workspace.certificates.record(kind, &id).await?;
    let ctx = RenderContext::new(
        &branding,
        workspace.certificates.mode(),
        Local::now().date_naive(),
    );
    let html = certificate_document(&record, &ctx, query.print.unwrap_or(true));
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Certificates",
    get,
    path = "/certificates/{kind}/{id}/pdf",
    params(
        ("kind" = String, Path, description = "Certificate kind"),
        ("id" = String, Path, description = "Certificate id")
    ),
    responses(
        (status = 200, description = "PDF rendered by the document store", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Certificate not found", body = crate::ErrorResponse)
    )
)]
pub async fn download_pdf(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, id) = path.into_inner();
    let kind = parse_kind(&kind)?;
    let token = bearer_token(&req)?;
    let workspace = state.workspace(&token).await;
    let workspace = workspace.lock().await;

    let (filename, bytes) = workspace.certificates.download_pdf(kind, &id).await?;
    log::info!("Serving {} ({} bytes)", filename, bytes.len());
    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/certificates/dashboard").route(web::get().to(dashboard)))
        .service(
            web::resource("/certificates/{kind}")
                .route(web::get().to(list_certificates))
                .route(web::post().to(create_certificate)),
        )
        .service(web::resource("/certificates/{kind}/workspace").route(web::get().to(get_workspace)))
        .service(web::resource("/certificates/{kind}/view").route(web::put().to(set_view)))
        .service(web::resource("/certificates/{kind}/form").route(web::patch().to(update_form)))
        .service(web::resource("/certificates/{kind}/form/reset").route(web::post().to(reset_form)))
        .service(
            web::resource("/certificates/{kind}/form/student").route(web::post().to(select_student)),
        )
        .service(
            web::resource("/certificates/{kind}/form/quick-pick")
                .route(web::post().to(apply_quick_pick)),
        )
        .service(
            web::resource("/certificates/{kind}/{id}/status").route(web::patch().to(change_status)),
        )
        .service(
            web::resource("/certificates/{kind}/{id}/print")
                .route(web::get().to(print_certificate)),
        )
        .service(web::resource("/certificates/{kind}/{id}/pdf").route(web::get().to(download_pdf)));
}
