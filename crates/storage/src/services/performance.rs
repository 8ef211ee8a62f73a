//! Per-club aggregation of event metrics into CPS and tier.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::models::{AuditAction, Club, Event, Ranking, Semester, Tier};
use crate::services::audit::{self, Actor};
use crate::store::Store;

/// Arithmetic mean of each metric across a club's events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricAverages {
    pub planning: f64,
    pub execution: f64,
    pub documentation: f64,
    pub innovation: f64,
    pub turnout: f64,
}

impl MetricAverages {
    pub fn sum(&self) -> f64 {
        self.planning + self.execution + self.documentation + self.innovation + self.turnout
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub event_count: i32,
    pub averages: MetricAverages,
    /// Sum of the five averages, 0 to 100, unrounded.
    pub cps: f64,
    pub tier: Tier,
}

/// `None` when the club ran no events.
pub fn summarize(events: &[Event]) -> Option<PerformanceSummary> {
    if events.is_empty() {
        return None;
    }

    let count = events.len() as f64;
    let mean = |metric: fn(&Event) -> i32| -> f64 {
        let total: i64 = events.iter().map(|e| i64::from(metric(e))).sum();
        total as f64 / count
    };

    let averages = MetricAverages {
        planning: mean(|e| e.planning_score),
        execution: mean(|e| e.execution_score),
        documentation: mean(|e| e.documentation_score),
        innovation: mean(|e| e.innovation_score),
        turnout: mean(|e| e.turnout_score),
    };

    let event_count = events.len() as i32;
    let cps = averages.sum();

    Some(PerformanceSummary {
        event_count,
        averages,
        cps,
        tier: Tier::classify(cps, event_count),
    })
}

/// Refresh the ranking projection for one club in one semester.
///
/// With no events left the ranking row is removed and `None` is returned.
/// Otherwise the row is upserted (its `rank` untouched) and one
/// `Semester Calculation` audit entry is written.
pub async fn recompute<S: Store>(
    store: &mut S,
    actor: &Actor,
    club: &Club,
    semester: &Semester,
) -> Result<Option<Ranking>> {
    let events = store.events_for(club.club_id, semester.semester_id).await?;

    let Some(summary) = summarize(&events) else {
        let removed = store
            .delete_ranking(club.club_id, semester.semester_id)
            .await?;
        if removed {
            info!(
                club = %club.short_code,
                semester = %semester.name,
                "Ranking cleared, no events remain"
            );
        }
        return Ok(None);
    };

    let ranking = store
        .upsert_ranking(club.club_id, semester.semester_id, &summary)
        .await?;

    audit::record(
        store,
        actor,
        AuditAction::SemesterCalculation,
        format!(
            "Recalculated for {} in {}. CPS: {:.2}, Tier: {}",
            club.short_code, semester.name, summary.cps, summary.tier
        ),
    )
    .await?;

    info!(
        club = %club.short_code,
        semester = %semester.name,
        cps = summary.cps,
        tier = %summary.tier,
        events = summary.event_count,
        "Club performance recalculated"
    );

    Ok(Some(ranking))
}
