use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single persisted match result. The id is assigned by the store on
/// insert and never changes; every other field is replaced wholesale on
/// update.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchRecord {
    pub id: i64,
    /// Day-precision date in `DD/MM/YYYY` form, validated at the API
    /// boundary (see `utils::date_format`).
    pub match_date: String,
    pub city: String,
    pub team_a: String,
    pub team_b: String,
    pub team_a_goals: i64,
    pub team_b_goals: i64,
}

/// Caller-supplied match value, used for both create and update.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchRequest {
    pub match_date: String,
    pub city: String,
    pub team_a: String,
    pub team_b: String,
    pub team_a_goals: i64,
    pub team_b_goals: i64,
}

impl MatchRequest {
    pub fn into_record(self, id: i64) -> MatchRecord {
        MatchRecord {
            id,
            match_date: self.match_date,
            city: self.city,
            team_a: self.team_a,
            team_b: self.team_b,
            team_a_goals: self.team_a_goals,
            team_b_goals: self.team_b_goals,
        }
    }
}
