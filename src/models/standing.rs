use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cumulative aggregate record for one team, keyed by team name.
///
/// After every aggregation operation the counters satisfy
/// `matches_played == wins + draws + losses` and
/// `points == 3 * wins + draws`.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct TeamStanding {
    pub id: i64,
    pub team_name: String,
    pub matches_played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_scored: i64,
    pub goals_against: i64,
    pub points: i64,
}

/// Per-team contribution of a single match result. `matches_played`
/// always moves by one, so only the outcome and goal counters vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingDelta {
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub goals_scored: i64,
    pub goals_against: i64,
    pub points: i64,
}
