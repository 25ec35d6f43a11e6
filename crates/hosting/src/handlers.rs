use super::bridge;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use dlm_core::LEADERBOARD_SIZE;
use dlm_core::PlayerId;
use dlm_gameroom::Coordinator;

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Welcome to Prisoner's Dilemma Game API" }))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub async fn enter(
    coordinator: web::Data<Coordinator>,
    path: web::Path<String>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let id = PlayerId::from(path.into_inner());
    log::info!("participant {} entering", id);
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            bridge(coordinator.into_inner(), id, session, stream).await;
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::BadRequest()
            .body(e.to_string())
            .map_into_right_body(),
    }
}

pub async fn players(coordinator: web::Data<Coordinator>) -> impl Responder {
    match coordinator.archive().players().await {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub async fn player(coordinator: web::Data<Coordinator>, path: web::Path<String>) -> impl Responder {
    let id = PlayerId::from(path.into_inner());
    match coordinator.archive().player(&id).await {
        Ok(Some(standing)) => HttpResponse::Ok().json(standing),
        Ok(None) => HttpResponse::NotFound().body(format!("player {} not found", id)),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub async fn leaderboard(coordinator: web::Data<Coordinator>) -> impl Responder {
    match coordinator.archive().leaderboard(LEADERBOARD_SIZE).await {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub async fn stats(coordinator: web::Data<Coordinator>) -> impl Responder {
    HttpResponse::Ok().json(coordinator.stats().await)
}
