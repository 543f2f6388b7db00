use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::config::settings::AggregationSettings;
use crate::handlers::standings_handler;
use crate::handlers::standings_handler::StandingsQuery;

/// League table sorted by points
#[get("/standings")]
pub(crate) async fn get_standings(
    query: web::Query<StandingsQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    standings_handler::get_standings(query, pool).await
}

/// Full recompute of all standings from the match set
#[post("/standings/recalculate")]
pub(crate) async fn recalculate_standings(
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    standings_handler::recalculate_standings(pool, aggregation).await
}

/// Cumulative record for one team
#[get("/standings/{team_name}")]
pub(crate) async fn get_team_standing(
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    standings_handler::get_team_standing(path, pool).await
}
