pub mod analyze;
pub mod assets;
pub mod common;
pub mod health;
pub mod login;
pub mod reports;
pub mod resources;
pub mod status;
pub mod teams;
pub mod ws;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(status::status)
        .service(login::login)
        .service(reports::list_reports)
        .service(reports::create_report)
        .service(reports::update_report)
        .service(resources::list_resources)
        .service(teams::create_team)
        .service(teams::delete_team)
        .service(teams::deploy_team)
        .service(teams::notify_team)
        .service(assets::create_asset)
        .service(assets::delete_asset)
        .service(assets::deploy_asset)
        .service(assets::notify_asset)
        .service(analyze::analyze)
        .service(ws::ws_route);
}
