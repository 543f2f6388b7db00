//! Team standings store: one row per team name, counters only.
//!
//! The increment/decrement arithmetic lives in the write path (single
//! UPSERT/UPDATE statements) so a standings mutation is atomic at the
//! store level rather than computed in caller memory.

use sqlx::SqliteExecutor;

use crate::models::standing::{StandingDelta, TeamStanding};

pub async fn get_standing_by_name(
    executor: impl SqliteExecutor<'_>,
    team_name: &str,
) -> Result<Option<TeamStanding>, sqlx::Error> {
    sqlx::query_as::<_, TeamStanding>("SELECT * FROM team_standings WHERE team_name = ?1")
        .bind(team_name)
        .fetch_optional(executor)
        .await
}

/// All standings ordered by points; descending gives the league table.
pub async fn get_all_standings(
    executor: impl SqliteExecutor<'_>,
    descending: bool,
) -> Result<Vec<TeamStanding>, sqlx::Error> {
    let order = if descending { "DESC" } else { "ASC" };
    let query = format!(
        "SELECT * FROM team_standings ORDER BY points {}, team_name ASC",
        order
    );
    sqlx::query_as::<_, TeamStanding>(&query)
        .fetch_all(executor)
        .await
}

/// Add a match's contribution to one team, auto-vivifying the row at zero
/// if the team has never been seen before.
pub async fn apply_delta(
    executor: impl SqliteExecutor<'_>,
    team_name: &str,
    delta: &StandingDelta,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO team_standings (
            team_name, matches_played, wins, draws, losses,
            goals_scored, goals_against, points
        ) VALUES (?1, 1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(team_name) DO UPDATE SET
            matches_played = matches_played + 1,
            wins = wins + ?2,
            draws = draws + ?3,
            losses = losses + ?4,
            goals_scored = goals_scored + ?5,
            goals_against = goals_against + ?6,
            points = points + ?7
        "#,
    )
    .bind(team_name)
    .bind(delta.wins)
    .bind(delta.draws)
    .bind(delta.losses)
    .bind(delta.goals_scored)
    .bind(delta.goals_against)
    .bind(delta.points)
    .execute(executor)
    .await?;

    Ok(())
}

/// Subtract a previously applied contribution. Returns false when the
/// team has no standings row; a missing row is never fabricated here.
pub async fn retract_delta(
    executor: impl SqliteExecutor<'_>,
    team_name: &str,
    delta: &StandingDelta,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE team_standings SET
            matches_played = matches_played - 1,
            wins = wins - ?2,
            draws = draws - ?3,
            losses = losses - ?4,
            goals_scored = goals_scored - ?5,
            goals_against = goals_against - ?6,
            points = points - ?7
        WHERE team_name = ?1
        "#,
    )
    .bind(team_name)
    .bind(delta.wins)
    .bind(delta.draws)
    .bind(delta.losses)
    .bind(delta.goals_scored)
    .bind(delta.goals_against)
    .bind(delta.points)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete the team's row only if every counter is back at zero.
pub async fn delete_if_zeroed(
    executor: impl SqliteExecutor<'_>,
    team_name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM team_standings
        WHERE team_name = ?1
          AND matches_played = 0
          AND goals_scored = 0
          AND goals_against = 0
          AND points = 0
        "#,
    )
    .bind(team_name)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Reset every row's counters to zero. Rows are kept, not deleted, so
/// concurrent readers never observe a vanished team mid-rebuild.
pub async fn zero_all_standings(executor: impl SqliteExecutor<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE team_standings SET
            matches_played = 0, wins = 0, draws = 0, losses = 0,
            goals_scored = 0, goals_against = 0, points = 0
        "#,
    )
    .execute(executor)
    .await?;

    Ok(())
}

/// Remove every row still at zero after a rebuild.
pub async fn prune_zeroed(executor: impl SqliteExecutor<'_>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team_standings WHERE matches_played = 0")
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
