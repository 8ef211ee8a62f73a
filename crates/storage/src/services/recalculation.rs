//! Write path for events, clubs and semesters.
//!
//! Each function is one unit of work against a [`Store`]: validate, lock the
//! affected semesters, diff against the prior state, write, audit and, for
//! event mutations, recompute the club's ranking and re-rank the semester.
//! The caller owns the transaction and commits only when the function
//! returns `Ok`.

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::club::{CreateClubRequest, UpdateClubRequest};
use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::dto::ranking::RecalculationSummary;
use crate::dto::semester::{CreateSemesterRequest, UpdateSemesterRequest};
use crate::error::{Result, StorageError};
use crate::models::{AuditAction, Club, Event, Semester};
use crate::services::audit::{self, Actor};
use crate::services::{change_detector, performance, rank_assigner};
use crate::store::Store;

/// Locks in ascending id order so two units of work never wait on each other
/// in opposite orders.
async fn lock_semesters<S: Store>(store: &mut S, semester_ids: &[Uuid]) -> Result<()> {
    let mut ids = semester_ids.to_vec();
    ids.sort();
    ids.dedup();

    for id in ids {
        store.lock_semester(id).await?;
    }
    Ok(())
}

/// Takes the semester locks `semesters` derives from an unlocked read of
/// the event, then row-locks the event. Restarts if a writer moved the event
/// to another semester before the locks were granted.
async fn lock_event<S, F>(store: &mut S, event_id: Uuid, semesters: F) -> Result<Event>
where
    S: Store,
    F: Fn(&Event) -> Vec<Uuid>,
{
    loop {
        let seen = store
            .find_event(event_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        lock_semesters(store, &semesters(&seen)).await?;

        let locked = store
            .lock_event(event_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        if locked.semester_id == seen.semester_id {
            return Ok(locked);
        }
        debug!(%event_id, "Event changed semester while locking, retrying");
    }
}

async fn load_club<S: Store>(store: &mut S, club_id: Uuid) -> Result<Club> {
    store.find_club(club_id).await?.ok_or(StorageError::NotFound)
}

async fn load_semester<S: Store>(store: &mut S, semester_id: Uuid) -> Result<Semester> {
    store
        .find_semester(semester_id)
        .await?
        .ok_or(StorageError::NotFound)
}

async fn refresh_standings<S: Store>(
    store: &mut S,
    actor: &Actor,
    club: &Club,
    semester: &Semester,
) -> Result<()> {
    performance::recompute(store, actor, club, semester).await?;
    rank_assigner::reassign(store, semester.semester_id).await?;
    Ok(())
}

fn event_details(event: &Event, club: &Club) -> String {
    format!(
        "Event: {} ({}). Score: {}",
        event.name,
        club.short_code,
        event.total_score()
    )
}

pub async fn create_event<S: Store>(
    store: &mut S,
    actor: &Actor,
    req: &CreateEventRequest,
) -> Result<Event> {
    req.validate()?;

    lock_semesters(store, &[req.semester_id]).await?;
    let club = load_club(store, req.club_id).await?;
    let semester = load_semester(store, req.semester_id).await?;

    let event = store.insert_event(req).await?;
    audit::record(
        store,
        actor,
        AuditAction::EventAdded,
        event_details(&event, &club),
    )
    .await?;

    refresh_standings(store, actor, &club, &semester).await?;

    info!(event_id = %event.event_id, club = %club.short_code, "Event created");
    Ok(event)
}

/// Moving an event to another club or semester refreshes both the old and
/// the new standings.
pub async fn update_event<S: Store>(
    store: &mut S,
    actor: &Actor,
    event_id: Uuid,
    req: &UpdateEventRequest,
) -> Result<Event> {
    req.validate()?;

    let previous = lock_event(store, event_id, |seen| {
        vec![seen.semester_id, req.semester_id.unwrap_or(seen.semester_id)]
    })
    .await?;
    let fields = req.merge_into(&previous);
    fields.validate()?;

    let club = load_club(store, fields.club_id).await?;
    let semester = load_semester(store, fields.semester_id).await?;

    let changes = change_detector::event_changes(Some(&previous), &fields);
    let event = store.update_event(event_id, &fields).await?;

    let mut details = event_details(&event, &club);
    if !changes.is_empty() {
        details.push_str(&format!(". Changes: {}", change_detector::render(&changes)));
    }
    audit::record(store, actor, AuditAction::EventUpdated, details).await?;

    refresh_standings(store, actor, &club, &semester).await?;

    if previous.club_id != event.club_id || previous.semester_id != event.semester_id {
        let old_club = load_club(store, previous.club_id).await?;
        let old_semester = load_semester(store, previous.semester_id).await?;
        refresh_standings(store, actor, &old_club, &old_semester).await?;
    }

    info!(
        %event_id,
        club = %club.short_code,
        changes = changes.len(),
        "Event updated"
    );
    Ok(event)
}

pub async fn delete_event<S: Store>(store: &mut S, actor: &Actor, event_id: Uuid) -> Result<()> {
    let snapshot = lock_event(store, event_id, |seen| vec![seen.semester_id]).await?;
    let club = load_club(store, snapshot.club_id).await?;
    let semester = load_semester(store, snapshot.semester_id).await?;

    store.delete_event(event_id).await?;
    audit::record(
        store,
        actor,
        AuditAction::EventDeleted,
        format!("Event: {} ({})", snapshot.name, club.short_code),
    )
    .await?;

    refresh_standings(store, actor, &club, &semester).await?;

    info!(%event_id, club = %club.short_code, "Event deleted");
    Ok(())
}

async fn ensure_club_identity_free<S: Store>(
    store: &mut S,
    fields: &CreateClubRequest,
    exclude: Option<Uuid>,
) -> Result<()> {
    let conflict = store
        .find_club_conflict(&fields.name, &fields.short_code, exclude)
        .await?;

    if let Some(existing) = conflict {
        let message = if existing.name == fields.name {
            "Club name already exists"
        } else {
            "Club short code already exists"
        };
        warn!(name = %fields.name, short_code = %fields.short_code, "{message}");
        return Err(StorageError::ConstraintViolation(message.to_string()));
    }
    Ok(())
}

pub async fn create_club<S: Store>(
    store: &mut S,
    actor: &Actor,
    req: &CreateClubRequest,
) -> Result<Club> {
    req.validate()?;
    ensure_club_identity_free(store, req, None).await?;

    let club = store.insert_club(req).await?;
    audit::record(
        store,
        actor,
        AuditAction::ClubAdded,
        format!("Club: {}", club.name),
    )
    .await?;

    info!(club_id = %club.club_id, short_code = %club.short_code, "Club created");
    Ok(club)
}

/// Club edits never touch scores, so no recalculation follows.
pub async fn update_club<S: Store>(
    store: &mut S,
    actor: &Actor,
    club_id: Uuid,
    req: &UpdateClubRequest,
) -> Result<Club> {
    req.validate()?;

    let previous = load_club(store, club_id).await?;
    let fields = req.merge_into(&previous);
    fields.validate()?;
    ensure_club_identity_free(store, &fields, Some(club_id)).await?;

    let changes = change_detector::club_changes(Some(&previous), &fields);
    let club = store.update_club(club_id, &fields).await?;

    let mut details = format!("Club: {} details updated.", club.name);
    if !changes.is_empty() {
        details.push_str(&format!(" Changes: {}", change_detector::render(&changes)));
    }
    audit::record(store, actor, AuditAction::ClubUpdated, details).await?;

    info!(%club_id, changes = changes.len(), "Club updated");
    Ok(club)
}

/// Removes the club with its events and rankings. Remaining clubs in the
/// affected semesters keep their ranks until the next recalculation.
pub async fn delete_club<S: Store>(store: &mut S, actor: &Actor, club_id: Uuid) -> Result<()> {
    let mut semesters = store.club_ranked_semesters(club_id).await?;
    lock_semesters(store, &semesters).await?;
    let club = store
        .lock_club(club_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    // No ranking can reference the club once its row is locked.
    let late: Vec<Uuid> = store
        .club_ranked_semesters(club_id)
        .await?
        .into_iter()
        .filter(|id| !semesters.contains(id))
        .collect();
    lock_semesters(store, &late).await?;
    semesters.extend(late);

    store.delete_club(club_id).await?;
    audit::record(
        store,
        actor,
        AuditAction::ClubDeleted,
        format!("Club: {} ({}) removed.", club.name, club.short_code),
    )
    .await?;

    info!(
        %club_id,
        short_code = %club.short_code,
        semesters = semesters.len(),
        "Club deleted"
    );
    Ok(())
}

fn semester_details(semester: &Semester) -> String {
    format!("Semester: {}. Active: {}", semester.name, semester.is_active)
}

async fn ensure_semester_name_free<S: Store>(
    store: &mut S,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<()> {
    match store.find_semester_by_name(name).await? {
        Some(existing) if Some(existing.semester_id) != exclude => Err(
            StorageError::ConstraintViolation("Semester name already exists".to_string()),
        ),
        _ => Ok(()),
    }
}

pub async fn create_semester<S: Store>(
    store: &mut S,
    actor: &Actor,
    req: &CreateSemesterRequest,
) -> Result<Semester> {
    req.validate()?;
    ensure_semester_name_free(store, &req.name, None).await?;

    let semester = store.insert_semester(req).await?;
    audit::record(
        store,
        actor,
        AuditAction::SemesterAdded,
        semester_details(&semester),
    )
    .await?;

    info!(semester_id = %semester.semester_id, name = %semester.name, "Semester created");
    Ok(semester)
}

pub async fn update_semester<S: Store>(
    store: &mut S,
    actor: &Actor,
    semester_id: Uuid,
    req: &UpdateSemesterRequest,
) -> Result<Semester> {
    req.validate()?;

    let previous = load_semester(store, semester_id).await?;
    let fields = req.merge_into(&previous);
    fields.validate()?;
    ensure_semester_name_free(store, &fields.name, Some(semester_id)).await?;

    let semester = store.update_semester(semester_id, &fields).await?;
    audit::record(
        store,
        actor,
        AuditAction::SemesterUpdated,
        semester_details(&semester),
    )
    .await?;

    info!(%semester_id, name = %semester.name, "Semester updated");
    Ok(semester)
}

/// Recomputes every club with events in the semester, then re-ranks it.
/// Closes the rank gaps a club deletion leaves behind.
pub async fn recalculate_semester<S: Store>(
    store: &mut S,
    actor: &Actor,
    semester_id: Uuid,
) -> Result<RecalculationSummary> {
    lock_semesters(store, &[semester_id]).await?;
    let semester = load_semester(store, semester_id).await?;

    let clubs = store.clubs_with_events(semester_id).await?;
    for club in &clubs {
        performance::recompute(store, actor, club, &semester).await?;
    }
    let outcome = rank_assigner::reassign(store, semester_id).await?;

    info!(
        %semester_id,
        clubs = clubs.len(),
        "Semester recalculated"
    );

    Ok(RecalculationSummary {
        semester_id,
        clubs_recalculated: clubs.len() as u64,
        ranked: outcome.ranked,
        pending: outcome.pending,
    })
}
