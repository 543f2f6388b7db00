//! Match store: CRUD over the `matches` table.
//!
//! Every function is executor-generic so the aggregation engine can run
//! them inside its transactions while handlers run them straight against
//! the pool.

use sqlx::SqliteExecutor;

use crate::models::match_record::{MatchRecord, MatchRequest};

/// Insert a new match record and return its store-assigned id.
pub async fn insert_match(
    executor: impl SqliteExecutor<'_>,
    request: &MatchRequest,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO matches (match_date, city, team_a, team_b, team_a_goals, team_b_goals)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&request.match_date)
    .bind(&request.city)
    .bind(&request.team_a)
    .bind(&request.team_b)
    .bind(request.team_a_goals)
    .bind(request.team_b_goals)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_match_by_id(
    executor: impl SqliteExecutor<'_>,
    match_id: i64,
) -> Result<Option<MatchRecord>, sqlx::Error> {
    sqlx::query_as::<_, MatchRecord>("SELECT * FROM matches WHERE id = ?1")
        .bind(match_id)
        .fetch_optional(executor)
        .await
}

pub async fn get_all_matches(
    executor: impl SqliteExecutor<'_>,
) -> Result<Vec<MatchRecord>, sqlx::Error> {
    sqlx::query_as::<_, MatchRecord>("SELECT * FROM matches ORDER BY id")
        .fetch_all(executor)
        .await
}

/// Matches where the team appears in either slot.
pub async fn get_matches_by_team(
    executor: impl SqliteExecutor<'_>,
    team_name: &str,
) -> Result<Vec<MatchRecord>, sqlx::Error> {
    sqlx::query_as::<_, MatchRecord>(
        "SELECT * FROM matches WHERE team_a = ?1 OR team_b = ?1 ORDER BY id",
    )
    .bind(team_name)
    .fetch_all(executor)
    .await
}

/// Full replacement of every field except the id. Returns false when no
/// row with that id exists.
pub async fn update_match(
    executor: impl SqliteExecutor<'_>,
    record: &MatchRecord,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE matches
        SET match_date = ?2, city = ?3, team_a = ?4, team_b = ?5,
            team_a_goals = ?6, team_b_goals = ?7
        WHERE id = ?1
        "#,
    )
    .bind(record.id)
    .bind(&record.match_date)
    .bind(&record.city)
    .bind(&record.team_a)
    .bind(&record.team_b)
    .bind(record.team_a_goals)
    .bind(record.team_b_goals)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_match(
    executor: impl SqliteExecutor<'_>,
    match_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM matches WHERE id = ?1")
        .bind(match_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_matches(executor: impl SqliteExecutor<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM matches")
        .fetch_one(executor)
        .await
}
