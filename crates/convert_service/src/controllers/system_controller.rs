use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::server::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathfinderStatus {
    status: &'static str,
    message: &'static str,
    public_dir: Option<String>,
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

async fn pathfinder(state: web::Data<AppState>) -> impl Responder {
    let public_dir = state
        .assets
        .locate()
        .map(|dir| dir.display().to_string());
    HttpResponse::Ok().json(PathfinderStatus {
        status: "ok",
        message: "Pathfinder utility is working",
        public_dir,
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)))
        .service(web::resource("/pathfinder").route(web::get().to(pathfinder)));
}
