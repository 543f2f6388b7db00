//! Statistics aggregation engine.
//!
//! Keeps the per-team standings table consistent with the match table
//! under insert, edit, delete and full recompute. Aggregation is a
//! commutative sum over the match set: applying matches in any order
//! yields the same standings, which is what makes the rebuild
//! well-defined and incremental updates correct.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::{match_queries, standings_queries};
use crate::league::LeagueError;
use crate::models::match_record::{MatchRecord, MatchRequest};
use crate::models::standing::StandingDelta;

/// What to do with a standings row that reverts to the all-zero state
/// after a retraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroedStandingPolicy {
    /// Keep the row at zero (default).
    Keep,
    /// Delete the row.
    Drop,
}

/// Engine owning no state of its own; every operation is one transaction
/// against the match and standings tables, so both participants' rows
/// are updated or neither is.
#[derive(Debug, Clone)]
pub struct AggregationService {
    pool: SqlitePool,
    zeroed_policy: ZeroedStandingPolicy,
}

impl AggregationService {
    pub fn new(pool: SqlitePool, zeroed_policy: ZeroedStandingPolicy) -> Self {
        Self {
            pool,
            zeroed_policy,
        }
    }

    /// Add a newly persisted match's contribution to both participants.
    pub async fn apply_match(&self, record: &MatchRecord) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;
        apply_in_tx(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Inverse of `apply_match`. Must be called with the match value as
    /// it was when last applied, never with the edited value.
    pub async fn retract_match(&self, record: &MatchRecord) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;
        retract_in_tx(&mut tx, record, self.zeroed_policy).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Insert a match and apply its contribution in one transaction.
    /// Returns the store-assigned match id.
    pub async fn record_match(&self, request: &MatchRequest) -> Result<i64, LeagueError> {
        let mut tx = self.pool.begin().await?;

        let match_id = match_queries::insert_match(&mut *tx, request)
            .await
            .map_err(LeagueError::MatchWrite)?;
        let record = request.clone().into_record(match_id);
        apply_in_tx(&mut tx, &record).await?;

        tx.commit().await?;

        tracing::info!(
            "Recorded match {}: {} {} - {} {}",
            match_id,
            record.team_a,
            record.team_a_goals,
            record.team_b_goals,
            record.team_b
        );
        Ok(match_id)
    }

    /// Retract-then-apply edit protocol, in one transaction: retract the
    /// stored value, replace the record, apply the new value. A missing
    /// match id is a precondition violation.
    pub async fn edit_match(
        &self,
        match_id: i64,
        request: &MatchRequest,
    ) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;

        let old = match_queries::get_match_by_id(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::MatchNotFound(match_id))?;

        retract_in_tx(&mut tx, &old, self.zeroed_policy).await?;

        let new_record = request.clone().into_record(match_id);
        match_queries::update_match(&mut *tx, &new_record)
            .await
            .map_err(LeagueError::MatchWrite)?;

        apply_in_tx(&mut tx, &new_record).await?;

        tx.commit().await?;

        tracing::info!("Edited match {} and reconciled standings", match_id);
        Ok(())
    }

    /// Retract a match's contribution and delete its record, in one
    /// transaction.
    pub async fn remove_match(&self, match_id: i64) -> Result<(), LeagueError> {
        let mut tx = self.pool.begin().await?;

        let old = match_queries::get_match_by_id(&mut *tx, match_id)
            .await?
            .ok_or(LeagueError::MatchNotFound(match_id))?;

        retract_in_tx(&mut tx, &old, self.zeroed_policy).await?;

        match_queries::delete_match(&mut *tx, match_id)
            .await
            .map_err(LeagueError::MatchWrite)?;

        tx.commit().await?;

        tracing::info!("Removed match {} and reconciled standings", match_id);
        Ok(())
    }

    /// Full recompute: zero every standings row, then reapply every
    /// persisted match. Idempotent for an unchanged match set. This is
    /// the recovery path when incremental updates are suspected to have
    /// drifted. Returns the number of matches applied.
    pub async fn rebuild_all(&self) -> Result<usize, LeagueError> {
        let mut tx = self.pool.begin().await?;

        standings_queries::zero_all_standings(&mut *tx)
            .await
            .map_err(LeagueError::StandingsWrite)?;

        let matches = match_queries::get_all_matches(&mut *tx).await?;
        for record in &matches {
            apply_in_tx(&mut tx, record).await?;
        }

        if self.zeroed_policy == ZeroedStandingPolicy::Drop {
            let pruned = standings_queries::prune_zeroed(&mut *tx)
                .await
                .map_err(LeagueError::StandingsWrite)?;
            if pruned > 0 {
                tracing::info!("Pruned {} teams with no remaining matches", pruned);
            }
        }

        tx.commit().await?;

        tracing::info!("Rebuilt standings from {} matches", matches.len());
        Ok(matches.len())
    }
}

async fn apply_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    record: &MatchRecord,
) -> Result<(), LeagueError> {
    let (delta_a, delta_b) = match_deltas(record);

    standings_queries::apply_delta(&mut **tx, &record.team_a, &delta_a)
        .await
        .map_err(LeagueError::StandingsWrite)?;
    standings_queries::apply_delta(&mut **tx, &record.team_b, &delta_b)
        .await
        .map_err(LeagueError::StandingsWrite)?;

    Ok(())
}

async fn retract_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    record: &MatchRecord,
    zeroed_policy: ZeroedStandingPolicy,
) -> Result<(), LeagueError> {
    let (delta_a, delta_b) = match_deltas(record);

    for (team, delta) in [(&record.team_a, &delta_a), (&record.team_b, &delta_b)] {
        let retracted = standings_queries::retract_delta(&mut **tx, team, delta)
            .await
            .map_err(LeagueError::StandingsWrite)?;
        if !retracted {
            tracing::warn!(
                "No standings row for team '{}' while retracting match {}; skipping",
                team,
                record.id
            );
            continue;
        }
        if zeroed_policy == ZeroedStandingPolicy::Drop {
            let dropped = standings_queries::delete_if_zeroed(&mut **tx, team)
                .await
                .map_err(LeagueError::StandingsWrite)?;
            if dropped {
                tracing::info!("Dropped zeroed standings row for team '{}'", team);
            }
        }
    }

    Ok(())
}

/// Per-team deltas for one match: +1 played each, goals to scored and
/// against, and 3/1/0 points by score comparison.
fn match_deltas(record: &MatchRecord) -> (StandingDelta, StandingDelta) {
    let (outcome_a, outcome_b) = if record.team_a_goals > record.team_b_goals {
        (win(), loss())
    } else if record.team_b_goals > record.team_a_goals {
        (loss(), win())
    } else {
        (draw(), draw())
    };

    let delta_a = StandingDelta {
        goals_scored: record.team_a_goals,
        goals_against: record.team_b_goals,
        ..outcome_a
    };
    let delta_b = StandingDelta {
        goals_scored: record.team_b_goals,
        goals_against: record.team_a_goals,
        ..outcome_b
    };

    (delta_a, delta_b)
}

fn win() -> StandingDelta {
    StandingDelta {
        wins: 1,
        draws: 0,
        losses: 0,
        goals_scored: 0,
        goals_against: 0,
        points: 3,
    }
}

fn draw() -> StandingDelta {
    StandingDelta {
        wins: 0,
        draws: 1,
        losses: 0,
        goals_scored: 0,
        goals_against: 0,
        points: 1,
    }
}

fn loss() -> StandingDelta {
    StandingDelta {
        wins: 0,
        draws: 0,
        losses: 1,
        goals_scored: 0,
        goals_against: 0,
        points: 0,
    }
}
