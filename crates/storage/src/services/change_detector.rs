//! Field-level diffs rendered into audit details.
//!
//! Only the fields that matter for review are tracked: the five metric
//! scores of an event (never the derived total) and the identifying fields of
//! a club.

use std::fmt::Display;

use crate::dto::club::CreateClubRequest;
use crate::dto::event::CreateEventRequest;
use crate::models::{Club, Event};

fn push_change<T: PartialEq + Display + ?Sized>(
    changes: &mut Vec<String>,
    field: &str,
    old: &T,
    new: &T,
) {
    if old != new {
        changes.push(format!("{field}: {old} -> {new}"));
    }
}

/// `None` prior state means a creation: nothing to diff.
pub fn event_changes(previous: Option<&Event>, next: &CreateEventRequest) -> Vec<String> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    let mut changes = Vec::new();
    for ((field, old), (_, new)) in previous
        .scores()
        .named()
        .into_iter()
        .zip(next.scores().named())
    {
        push_change(&mut changes, field, &old, &new);
    }
    changes
}

pub fn club_changes(previous: Option<&Club>, next: &CreateClubRequest) -> Vec<String> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    let mut changes = Vec::new();
    push_change(&mut changes, "name", previous.name.as_str(), next.name.as_str());
    push_change(
        &mut changes,
        "short_code",
        previous.short_code.as_str(),
        next.short_code.as_str(),
    );
    push_change(
        &mut changes,
        "faculty_incharge",
        previous.faculty_incharge.as_str(),
        next.faculty_incharge.as_str(),
    );
    push_change(
        &mut changes,
        "student_lead",
        previous.student_lead.as_str(),
        next.student_lead.as_str(),
    );
    changes
}

pub fn render(changes: &[String]) -> String {
    changes.join("; ")
}
