use actix_web::web;

pub mod backend_health;
pub mod matches;
pub mod standings;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(matches::create_match)
        .service(matches::list_matches)
        .service(matches::get_match)
        .service(matches::update_match)
        .service(matches::delete_match)
        .service(standings::recalculate_standings)
        .service(standings::get_standings)
        .service(standings::get_team_standing);
}
