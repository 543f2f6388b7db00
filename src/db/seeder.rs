//! First-run sample data. Matches are inserted through the aggregation
//! engine so standings are consistent from the start. Every failed
//! sub-step propagates; nothing is logged-and-swallowed.

use sqlx::SqlitePool;

use crate::db::match_queries;
use crate::league::aggregation::{AggregationService, ZeroedStandingPolicy};
use crate::league::LeagueError;
use crate::models::match_record::MatchRequest;

const SAMPLE_MATCHES: &[(&str, &str, &str, &str, i64, i64)] = &[
    ("01/03/2025", "Manchester", "Manchester United", "Liverpool", 2, 1),
    ("02/03/2025", "London", "Arsenal", "Chelsea", 1, 1),
    ("08/03/2025", "Liverpool", "Liverpool", "Arsenal", 3, 0),
    ("09/03/2025", "London", "Chelsea", "Manchester United", 0, 2),
    ("15/03/2025", "Manchester", "Manchester City", "Arsenal", 2, 2),
    ("16/03/2025", "London", "Tottenham", "Liverpool", 1, 2),
];

/// Seed the database with sample matches if it holds none. Returns the
/// number of matches inserted (zero when seeding was skipped).
pub async fn seed_if_empty(
    pool: &SqlitePool,
    zeroed_policy: ZeroedStandingPolicy,
) -> Result<usize, LeagueError> {
    let existing = match_queries::count_matches(pool).await?;
    if existing > 0 {
        tracing::info!(
            "Database already contains {} matches, skipping seeding",
            existing
        );
        return Ok(0);
    }

    tracing::info!("Database is empty, seeding with sample matches");
    let service = AggregationService::new(pool.clone(), zeroed_policy);

    for &(match_date, city, team_a, team_b, team_a_goals, team_b_goals) in SAMPLE_MATCHES {
        let request = MatchRequest {
            match_date: match_date.to_string(),
            city: city.to_string(),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            team_a_goals,
            team_b_goals,
        };
        service.record_match(&request).await?;
    }

    tracing::info!("Seeded {} sample matches", SAMPLE_MATCHES.len());
    Ok(SAMPLE_MATCHES.len())
}
