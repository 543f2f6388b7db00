use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::config::settings::AggregationSettings;
use crate::db::standings_queries;
use crate::handlers::league_error_response;
use crate::league::aggregation::AggregationService;

#[derive(Debug, Deserialize)]
pub struct StandingsQuery {
    pub ascending: Option<bool>,
}

/// League table, sorted by points (descending unless asked otherwise).
#[tracing::instrument(name = "Get standings", skip(query, pool), fields(ascending = ?query.ascending))]
pub async fn get_standings(
    query: web::Query<StandingsQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let descending = !query.ascending.unwrap_or(false);

    match standings_queries::get_all_standings(pool.get_ref(), descending).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings,
            "total_count": standings.len()
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch standings: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}

/// One team's cumulative record.
#[tracing::instrument(name = "Get team standing", skip(pool), fields(team_name = %path))]
pub async fn get_team_standing(
    path: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse> {
    let team_name = path.into_inner();

    match standings_queries::get_standing_by_name(pool.get_ref(), &team_name).await {
        Ok(Some(standing)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standing
        }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": format!("No standings for team '{}'", team_name)
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch standing for '{}': {}", team_name, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })))
        }
    }
}

/// Authoritative drift recovery: zero every row and reapply every match.
#[tracing::instrument(name = "Recalculate standings", skip(pool, aggregation))]
pub async fn recalculate_standings(
    pool: web::Data<SqlitePool>,
    aggregation: web::Data<AggregationSettings>,
) -> Result<HttpResponse> {
    let service = AggregationService::new(pool.get_ref().clone(), aggregation.zeroed_policy());

    match service.rebuild_all().await {
        Ok(matches_applied) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "matches_applied": matches_applied }
        }))),
        Err(e) => {
            tracing::error!("Failed to rebuild standings: {}", e);
            Ok(league_error_response(&e))
        }
    }
}
