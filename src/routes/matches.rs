use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::SqlitePool;

use crate::config::settings::AggregationSettings;
use crate::handlers::match_handler;
use crate::handlers::match_handler::MatchListQuery;
use crate::models::match_record::MatchRequest;

/// Record a new match result
#[post("/matches")]
pub(crate) async fn create_match(
    request: web::Json<MatchRequest>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    match_handler::create_match(request, pool, aggregation).await
}

/// List matches, optionally filtered by team
#[get("/matches")]
pub(crate) async fn list_matches(
    query: web::Query<MatchListQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    match_handler::list_matches(query, pool).await
}

/// Get a single match by id
#[get("/matches/{match_id}")]
pub(crate) async fn get_match(path: web::Path<i64>, pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    match_handler::get_match(path, pool).await
}

/// Replace a stored match and reconcile standings
#[put("/matches/{match_id}")]
pub(crate) async fn update_match(
    path: web::Path<i64>,
    request: web::Json<MatchRequest>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    match_handler::update_match(path, request, pool, aggregation).await
}

/// Delete a match and reconcile standings
#[delete("/matches/{match_id}")]
pub(crate) async fn delete_match(
    path: web::Path<i64>,
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    match_handler::delete_match(path, pool, aggregation).await
}
