use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod certificate;
pub mod config;
pub mod error;
pub mod fields;
pub mod id_card;
pub mod institution;
pub mod people;
pub mod render;
pub mod session;
pub mod state;
pub mod store;

pub use crate::config::AppConfig;
pub use crate::error::CertificateError;
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::institution::handlers::get_mode,
        crate::institution::handlers::get_branding,
        crate::certificate::handlers::dashboard,
        crate::certificate::handlers::list_certificates,
        crate::certificate::handlers::get_workspace,
        crate::certificate::handlers::set_view,
        crate::certificate::handlers::update_form,
        crate::certificate::handlers::reset_form,
        crate::certificate::handlers::select_student,
        crate::certificate::handlers::apply_quick_pick,
        crate::certificate::handlers::create_certificate,
        crate::certificate::handlers::change_status,
        crate::certificate::handlers::print_certificate,
        crate::certificate::handlers::download_pdf,
        crate::id_card::handlers::list_cards,
        crate::id_card::handlers::set_cards_view,
        crate::id_card::handlers::generate_cards,
        crate::id_card::handlers::print_cards
    ),
    components(
        schemas(
            ErrorResponse,
            certificate::CertificateKind,
            certificate::CertificateStatus,
            certificate::ViewMode,
            certificate::handlers::FormPatch,
            certificate::handlers::ListQuery,
            certificate::handlers::ViewRequest,
            certificate::handlers::SelectStudentRequest,
            certificate::handlers::QuickPickRequest,
            certificate::handlers::CreateCertificateRequest,
            certificate::handlers::StatusChangeRequest,
            store::DashboardCounts,
            institution::SchoolBranding,
            institution::InstitutionMode,
            institution::InstitutionType,
            institution::UiMode,
            institution::Lang,
            institution::Tab,
            institution::QuickPick,
            id_card::CardType,
            id_card::IdCard,
            id_card::model::StudentCardData,
            id_card::model::StaffCardData,
            id_card::handlers::CardsResponse,
            id_card::handlers::GenerateCardsRequest,
            id_card::handlers::CardsViewRequest,
            session::CardsView,
        )
    ),
    tags(
        (name = "Certificates", description = "Certificate lists, forms, lifecycle and documents."),
        (name = "ID Cards", description = "Student and staff ID card generation and printing."),
        (name = "Institution", description = "Institution mode and branding.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost")
    )
)]
pub struct ApiDoc;

/// Register every `/api` route.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(institution::handlers::config)
        .configure(certificate::handlers::config)
        .configure(id_card::handlers::config);
}

pub async fn run() -> std::io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    let app_state = match AppState::new(&config) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialise application state: {:#}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Document store at {}, {} cached ID cards in {}",
        config.school_api_url,
        app_state.cards.len(),
        config.card_cache_dir.display()
    );

    let prometheus = PrometheusMetricsBuilder::new("school_certificates")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let allowed_origins = config.allowed_origins.clone();
    log::info!("Starting server at http://{}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .service(web::scope("/api").configure(configure_api))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .max_connections(25000)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
