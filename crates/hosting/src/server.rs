use super::handlers::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use dlm_core::SERVER_WORKERS;
use dlm_gameroom::Coordinator;
use std::sync::Arc;

pub struct Server;

impl Server {
    /// Serves every route against `coordinator` on `BIND_ADDR`.
    pub async fn run(coordinator: Arc<Coordinator>) -> Result<(), std::io::Error> {
        let state = web::Data::from(coordinator);
        let addr = std::env::var("BIND_ADDR").map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "BIND_ADDR must be set")
        })?;
        log::info!("starting hosting server on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .configure(routes)
        })
        .workers(SERVER_WORKERS)
        .bind(addr)?
        .run()
        .await
    }
}

/// Route table shared by the server and its tests.
#[rustfmt::skip]
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/",                    web::get().to(root))
        .route("/health",              web::get().to(health))
        .route("/ws/{player_id}",      web::get().to(enter))
        .service(
            web::scope("/api")
                .route("/players",             web::get().to(players))
                .route("/players/{player_id}", web::get().to(player))
                .route("/leaderboard",         web::get().to(leaderboard))
                .route("/admin/stats",         web::get().to(stats)),
        );
}
