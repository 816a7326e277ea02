use actix_web::web;

pub mod system;
pub mod upload;

/// Mount every route on the app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system::root)
        .service(system::health)
        .service(web::scope("/api/calls").service(upload::upload));
}
