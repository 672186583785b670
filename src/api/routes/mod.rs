use actix_web::web;

mod health;
mod relay;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health);
    cfg.service(relay::submit_relay);
    cfg.service(relay::get_relay_status);
}
