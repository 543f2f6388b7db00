pub mod match_handler;
pub mod standings_handler;

use actix_web::HttpResponse;
use serde_json::json;

use crate::league::LeagueError;

/// Map engine errors to responses. The two write failures carry distinct
/// remediation: a match record failure means re-submit the data, a
/// standings failure means the table may have drifted and a
/// recalculation is the fix.
pub(crate) fn league_error_response(error: &LeagueError) -> HttpResponse {
    match error {
        LeagueError::MatchNotFound(match_id) => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": format!("Match {} not found", match_id)
        })),
        LeagueError::MatchWrite(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to save match record, please re-submit"
        })),
        LeagueError::StandingsWrite(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Failed to update team standings, run a recalculation"
        })),
        LeagueError::Database(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Database error"
        })),
    }
}
