//! Dense ranking of a semester's clubs.

use std::cmp::Ordering;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Tier;
use crate::store::Store;

/// The slice of a ranking row that rank assignment needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RankCandidate {
    pub ranking_id: Uuid,
    pub club_name: String,
    pub cps: f64,
    pub tier: Tier,
    pub rank: Option<i32>,
}

/// Highest CPS first; equal CPS falls back to club name so the order is total.
fn leaderboard_order(a: &RankCandidate, b: &RankCandidate) -> Ordering {
    b.cps
        .total_cmp(&a.cps)
        .then_with(|| a.club_name.cmp(&b.club_name))
}

/// Sorts `candidates` into leaderboard order and assigns ranks 1..=K to the
/// eligible ones. Pending rows get `None` and do not consume a slot.
///
/// Returns the `(ranking_id, rank)` pairs whose rank changed.
pub fn assign_ranks(candidates: &mut [RankCandidate]) -> Vec<(Uuid, Option<i32>)> {
    candidates.sort_by(leaderboard_order);

    let mut changed = Vec::new();
    let mut next_rank = 1;

    for candidate in candidates.iter_mut() {
        let rank = if candidate.tier.is_pending() {
            None
        } else {
            let rank = next_rank;
            next_rank += 1;
            Some(rank)
        };

        if candidate.rank != rank {
            candidate.rank = rank;
            changed.push((candidate.ranking_id, rank));
        }
    }

    changed
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReassignOutcome {
    pub ranked: u64,
    pub pending: u64,
    pub updated: u64,
}

pub async fn reassign<S: Store>(store: &mut S, semester_id: Uuid) -> Result<ReassignOutcome> {
    let mut candidates = store.rank_candidates(semester_id).await?;
    let changed = assign_ranks(&mut candidates);

    for (ranking_id, rank) in &changed {
        debug!(%ranking_id, ?rank, "Rank changed");
        store.set_rank(*ranking_id, *rank).await?;
    }

    let pending = candidates.iter().filter(|c| c.tier.is_pending()).count() as u64;
    let outcome = ReassignOutcome {
        ranked: candidates.len() as u64 - pending,
        pending,
        updated: changed.len() as u64,
    };

    info!(
        %semester_id,
        ranked = outcome.ranked,
        pending = outcome.pending,
        updated = outcome.updated,
        "Semester ranks reassigned"
    );

    Ok(outcome)
}
