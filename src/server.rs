//! JSON proxy endpoint in front of the NIM image generation API. Every
//! generation failure is recovered here into a uniform `{"error": ...}`
//! body; nothing propagates as an unhandled fault past the handler.

use actix_web::{http::StatusCode, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};

use crate::{config::Config, logger, nim::NimClient, prompt};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[post("/api/generate")]
pub async fn generate_image(
    client: web::Data<NimClient>,
    body: web::Json<GenerateRequest>,
) -> impl Responder {
    let subject = body.prompt.as_deref().unwrap_or_default();
    let payload = prompt::compile(subject);

    match client.image().generate(&payload).await {
        Ok(image) => HttpResponse::Ok().json(image),
        Err(e) => {
            log::error!("Generation failed: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(ErrorBody {
                error: e.response_message(),
            })
        }
    }
}

/// Binds the proxy endpoint and serves until shutdown.
pub async fn run(config: &Config, client: NimClient) -> std::io::Result<()> {
    let port = config.port.unwrap_or(DEFAULT_PORT);
    logger::log_startup_info("svgen", env!("CARGO_PKG_VERSION"), port);

    let data = web::Data::new(client);
    HttpServer::new(move || App::new().app_data(data.clone()).service(generate_image))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
