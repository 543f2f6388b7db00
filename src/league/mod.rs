pub mod aggregation;

/// Errors surfaced by the aggregation engine and its composite
/// match-mutation protocols.
///
/// The two write variants are kept separate on purpose: a failed match
/// record write means the caller should re-submit the data, while a
/// failed standings write means the standings may have drifted and a
/// recalculation is the remedy.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("match {0} not found")]
    MatchNotFound(i64),
    #[error("failed to write match record: {0}")]
    MatchWrite(#[source] sqlx::Error),
    #[error("failed to update team standings: {0}")]
    StandingsWrite(#[source] sqlx::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
