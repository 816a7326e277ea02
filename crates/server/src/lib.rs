//! Call assistant HTTP server
//!
//! Actix-web REST API: upload a call recording, get back its transcript and
//! a drafted follow-up email.

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use callassist_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod error;
pub mod intake;
pub mod routes;
pub mod state;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use state::AppState;
pub use workflow::{PipelineReport, WorkflowExecutor, WorkflowStep};

/// CORS policy for the configured frontend origins
///
/// `*` allows any origin, without credentials.
pub fn cors(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Bind and run the HTTP server until shutdown
pub async fn start_server(config: AppConfig, workflow: Arc<WorkflowExecutor>) -> Result<()> {
    let state = Arc::new(AppState::new(config, workflow)?);
    let bind_addr = state.config.server_bind_address();

    info!("Upload directory: {}", state.config.upload_dir.display());
    info!("CORS origins: {}", state.config.cors_origins.join(", "));
    info!("HTTP server listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&state.config.cors_origins))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::test;

    #[actix_web::test]
    async fn test_cors_allows_configured_origin() {
        let origins = vec!["http://localhost:5173".to_string()];
        let app = test::init_service(
            App::new()
                .wrap(cors(&origins))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
    }
}
