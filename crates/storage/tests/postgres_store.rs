//! Store and repository behavior against a real PostgreSQL.
//!
//! Set `DATABASE_URL` to run these; without it every test returns early.
//! Each test works inside its own uncommitted transaction unless it needs a
//! second connection to observe locking.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use storage::Database;
use storage::dto::club::CreateClubRequest;
use storage::dto::event::{CreateEventRequest, UpdateEventRequest};
use storage::dto::semester::CreateSemesterRequest;
use storage::error::StorageError;
use storage::models::{Club, Semester, Tier};
use storage::repository::ranking::RankingRepository;
use storage::repository::semester::SemesterRepository;
use storage::services::Actor;
use storage::services::performance::{MetricAverages, PerformanceSummary};
use storage::services::recalculation;
use storage::store::{PgStore, Store};
use uuid::Uuid;

async fn test_db() -> Option<Database> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };

    let db = Database::new(&url, 5).await.unwrap();
    db.run_migrations().await.unwrap();
    Some(db)
}

fn tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn summary(cps: f64, event_count: i32) -> PerformanceSummary {
    let per_metric = cps / 5.0;
    PerformanceSummary {
        event_count,
        averages: MetricAverages {
            planning: per_metric,
            execution: per_metric,
            documentation: per_metric,
            innovation: per_metric,
            turnout: per_metric,
        },
        cps,
        tier: Tier::classify(cps, event_count),
    }
}

async fn insert_semester(store: &mut PgStore, name: &str) -> Semester {
    store
        .insert_semester(&CreateSemesterRequest {
            name: name.to_string(),
            is_active: true,
        })
        .await
        .unwrap()
}

fn club_request(name: &str, code: &str) -> CreateClubRequest {
    CreateClubRequest {
        name: name.to_string(),
        short_code: code.to_string(),
        faculty_incharge: "Dr. A".to_string(),
        student_lead: "Alice".to_string(),
        contact_details: String::new(),
    }
}

async fn insert_club(store: &mut PgStore, name: &str, code: &str) -> Club {
    store.insert_club(&club_request(name, code)).await.unwrap()
}

fn event_request(club: &Club, semester: &Semester, score: i32) -> CreateEventRequest {
    CreateEventRequest {
        club_id: club.club_id,
        semester_id: semester.semester_id,
        name: format!("{} showcase", club.short_code),
        event_date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
        expected_turnout: 50,
        actual_turnout: 40,
        planning_score: score,
        execution_score: score,
        documentation_score: score,
        innovation_score: score,
        turnout_score: score,
    }
}

#[tokio::test]
async fn test_upsert_keeps_assigned_rank() {
    let Some(db) = test_db().await else { return };
    let mut store = PgStore::begin(db.pool()).await.unwrap();
    let tag = tag();
    let fall = insert_semester(&mut store, &format!("Fall {tag}")).await;
    let coding = insert_club(&mut store, &format!("Coding {tag}"), &tag).await;

    let first = store
        .upsert_ranking(coding.club_id, fall.semester_id, &summary(70.0, 2))
        .await
        .unwrap();
    assert_eq!(first.rank, None);
    store.set_rank(first.ranking_id, Some(3)).await.unwrap();

    let refreshed = store
        .upsert_ranking(coding.club_id, fall.semester_id, &summary(92.0, 3))
        .await
        .unwrap();

    assert_eq!(refreshed.ranking_id, first.ranking_id);
    assert_eq!(refreshed.rank, Some(3));
    assert_eq!(refreshed.cps, 92.0);
    assert_eq!(refreshed.tier, Tier::A);
    assert_eq!(refreshed.event_count, 3);
}

#[tokio::test]
async fn test_rank_candidates_carry_club_names() {
    let Some(db) = test_db().await else { return };
    let mut store = PgStore::begin(db.pool()).await.unwrap();
    let tag = tag();
    let fall = insert_semester(&mut store, &format!("Fall {tag}")).await;
    let coding = insert_club(&mut store, &format!("Coding {tag}"), &tag).await;

    let ranking = store
        .upsert_ranking(coding.club_id, fall.semester_id, &summary(40.0, 1))
        .await
        .unwrap();

    let candidates = store.rank_candidates(fall.semester_id).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].ranking_id, ranking.ranking_id);
    assert_eq!(candidates[0].club_name, coding.name);
    assert_eq!(candidates[0].tier, Tier::Pending);
    assert_eq!(candidates[0].rank, None);
}

#[tokio::test]
async fn test_leaderboard_orders_ranked_then_pending() {
    let Some(db) = test_db().await else { return };
    let mut store = PgStore::begin(db.pool()).await.unwrap();
    let tag = tag();
    let fall = insert_semester(&mut store, &format!("Fall {tag}")).await;

    // (name prefix, cps, events, rank)
    let rows = [
        ("Delta", 50.0, 1, None),
        ("Alpha", 70.0, 2, Some(2)),
        ("Echo", 95.0, 1, None),
        ("Bravo", 80.0, 2, Some(1)),
        ("Charlie", 50.0, 1, None),
    ];
    for (i, (prefix, cps, events, rank)) in rows.into_iter().enumerate() {
        let club = insert_club(&mut store, &format!("{prefix} {tag}"), &format!("{tag}{i}")).await;
        let ranking = store
            .upsert_ranking(club.club_id, fall.semester_id, &summary(cps, events))
            .await
            .unwrap();
        store.set_rank(ranking.ranking_id, rank).await.unwrap();
    }

    let board = RankingRepository::new(store.conn())
        .for_semester(fall.semester_id)
        .await
        .unwrap();

    let names: Vec<&str> = board
        .iter()
        .map(|entry| entry.club_name.split(' ').next().unwrap())
        .collect();
    assert_eq!(names, ["Bravo", "Alpha", "Echo", "Charlie", "Delta"]);
    assert_eq!(board[0].rank, Some(1));
    assert_eq!(board[2].tier, Tier::Pending);
}

#[tokio::test]
async fn test_current_semester_is_earliest_active() {
    let Some(db) = test_db().await else { return };
    let mut store = PgStore::begin(db.pool()).await.unwrap();
    let tag = tag();

    for (name, year) in [("Spring", 1901), ("Fall", 1900)] {
        let created_at: NaiveDateTime = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        sqlx::query("INSERT INTO semesters (name, is_active, created_at) VALUES ($1, TRUE, $2)")
            .bind(format!("{name} {tag}"))
            .bind(created_at)
            .execute(&mut *store.conn())
            .await
            .unwrap();
    }

    let current = SemesterRepository::new(store.conn())
        .current()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.name, format!("Fall {tag}"));
}

#[tokio::test]
async fn test_pipeline_ranks_clubs_in_postgres() {
    let Some(db) = test_db().await else { return };
    let mut store = PgStore::begin(db.pool()).await.unwrap();
    let tag = tag();
    let admin = Actor::named("SOC_Council");
    let fall = insert_semester(&mut store, &format!("Fall {tag}")).await;
    let coding = insert_club(&mut store, &format!("Coding {tag}"), &format!("{tag}C")).await;
    let music = insert_club(&mut store, &format!("Music {tag}"), &format!("{tag}M")).await;

    for (club, score) in [(&coding, 18), (&coding, 18), (&music, 12), (&music, 12)] {
        recalculation::create_event(&mut store, &admin, &event_request(club, &fall, score))
            .await
            .unwrap();
    }

    let board = RankingRepository::new(store.conn())
        .for_semester(fall.semester_id)
        .await
        .unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!((board[0].club_id, board[0].rank), (coding.club_id, Some(1)));
    assert_eq!(board[0].tier, Tier::A);
    assert_eq!((board[1].club_id, board[1].rank), (music.club_id, Some(2)));
    assert_eq!(board[1].tier, Tier::C);
}

#[tokio::test]
async fn test_club_deletion_does_not_deadlock_with_waiting_event_update() {
    let Some(db) = test_db().await else { return };
    let tag = tag();
    let admin = Actor::named("SOC_Council");

    let mut setup = PgStore::begin(db.pool()).await.unwrap();
    let fall = insert_semester(&mut setup, &format!("Fall {tag}")).await;
    let coding = insert_club(&mut setup, &format!("Coding {tag}"), &tag).await;
    let event = recalculation::create_event(&mut setup, &admin, &event_request(&coding, &fall, 10))
        .await
        .unwrap();
    setup.commit().await.unwrap();

    // Hold the semester so the update queues behind it.
    let mut deleter = PgStore::begin(db.pool()).await.unwrap();
    deleter.lock_semester(fall.semester_id).await.unwrap();

    let pool = db.pool().clone();
    let event_id = event.event_id;
    let updater = tokio::spawn(async move {
        let mut store = PgStore::begin(&pool).await?;
        let req = UpdateEventRequest {
            planning_score: Some(20),
            ..Default::default()
        };
        recalculation::update_event(&mut store, &Actor::anonymous(), event_id, &req).await?;
        store.commit().await
    });
    tokio::time::sleep(Duration::from_millis(300)).await;

    recalculation::delete_club(&mut deleter, &admin, coding.club_id)
        .await
        .unwrap();
    deleter.commit().await.unwrap();

    let updated = tokio::time::timeout(Duration::from_secs(10), updater)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(updated, Err(StorageError::NotFound)));

    sqlx::query("DELETE FROM semesters WHERE semester_id = $1")
        .bind(fall.semester_id)
        .execute(db.pool())
        .await
        .unwrap();
}
