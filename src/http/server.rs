use actix_web::{middleware::NormalizePath, web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use super::{controllers, util::QuieterRootSpanBuilder};
use crate::{config, App};

#[derive(Debug, Error)]
#[error("Failed to start the HTTP server")]
pub struct StartServerError;

/// Serves the API until the process receives a shutdown signal.
pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    let (ip, port, workers) = (config.ip, config.port, config.workers);
    let app = App::new(config).await.change_context(StartServerError)?;

    let mut server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(web::Data::new(app.clone()))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::<QuieterRootSpanBuilder>::new())
            .configure(controllers::configure)
    });

    if let Some(workers) = workers {
        server = server.workers(workers.get());
    }

    let server = server
        .bind((ip, port))
        .change_context(StartServerError)
        .attach_printable_lazy(|| format!("could not bind to {ip}:{port}"))?;

    tracing::info!("Listening on http://{ip}:{port}");
    server.run().await.change_context(StartServerError)
}
