//! Attendance Session Store: durable sessions and per-student records.
//!
//! Only the session manager writes through this trait. The two state changes
//! (`ABSENT -> PRESENT` on a record, `active -> closed` on a session) are
//! single conditional UPDATE statements, so concurrent callers race on the row
//! and exactly one of them observes the transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use db::models::{attendance_record, attendance_session, course, student};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::roster::{CourseRef, RosterEntry};

pub use db::models::attendance_record::AttendanceStatus;

/// A roster student's attendance within one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendance {
    pub student_id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub status: AttendanceStatus,
    pub marked_at: Option<DateTime<Utc>>,
}

/// A session together with every record of its roster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSession {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub teacher_name: String,
    pub class_label: String,
    pub is_active: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub students: Vec<StudentAttendance>,
}

impl AttendanceSession {
    pub fn present_count(&self) -> usize {
        self.students
            .iter()
            .filter(|s| s.status == AttendanceStatus::Present)
            .count()
    }

    pub fn absent_count(&self) -> usize {
        self.students.len() - self.present_count()
    }

    pub fn student(&self, student_id: &str) -> Option<&StudentAttendance> {
        self.students.iter().find(|s| s.student_id == student_id)
    }
}

/// Row data for a session about to be created.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub id: String,
    pub course: CourseRef,
    pub teacher_name: String,
    pub class_label: String,
    pub start_time: DateTime<Utc>,
}

/// Lifecycle fields of a session, without its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub is_active: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// This call performed the `ABSENT -> PRESENT` transition.
    Marked { marked_at: DateTime<Utc> },
    /// The record was already present; nothing changed.
    AlreadyPresent { marked_at: Option<DateTime<Utc>> },
    NotInSession,
    SessionClosed,
    SessionNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    AlreadyClosed,
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub course_id: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<u64>,
}

/// Listing row with record tallies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub teacher_name: String,
    pub class_label: String,
    pub is_active: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub present_count: u64,
    pub total_count: u64,
}

/// One record of a student joined with its session lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub session_id: String,
    pub course_id: String,
    pub is_active: bool,
    pub start_time: DateTime<Utc>,
    pub status: AttendanceStatus,
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Inserts the session and one `Absent` record per roster entry, all or nothing.
    async fn create_session(
        &self,
        new: NewSession,
        roster: &[RosterEntry],
    ) -> Result<AttendanceSession, DbErr>;

    async fn session_state(&self, session_id: &str) -> Result<Option<SessionState>, DbErr>;

    async fn find_session(&self, session_id: &str) -> Result<Option<AttendanceSession>, DbErr>;

    /// Compare-and-set `ABSENT -> PRESENT`, only while the session is active.
    async fn mark_present(
        &self,
        session_id: &str,
        student_id: &str,
        at: DateTime<Utc>,
    ) -> Result<MarkOutcome, DbErr>;

    /// Compare-and-set `active -> closed`, stamping `end_time = at`.
    async fn close_session(&self, session_id: &str, at: DateTime<Utc>)
        -> Result<CloseOutcome, DbErr>;

    /// Newest first.
    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, DbErr>;

    async fn student_history(&self, student_id: &str) -> Result<Vec<HistoryEntry>, DbErr>;
}

/// sea-orm implementation over the `attendance_sessions` / `attendance_records` tables.
#[derive(Clone)]
pub struct DbAttendanceStore {
    db: DatabaseConnection,
}

impl DbAttendanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct RecordCounts {
    session_id: String,
    total: i64,
    present: i64,
}

#[async_trait]
impl AttendanceStore for DbAttendanceStore {
    async fn create_session(
        &self,
        new: NewSession,
        roster: &[RosterEntry],
    ) -> Result<AttendanceSession, DbErr> {
        if roster.is_empty() {
            return Err(DbErr::Custom(format!("session {} has an empty roster", new.id)));
        }

        let txn = self.db.begin().await?;

        attendance_session::ActiveModel {
            id: Set(new.id.clone()),
            course_id: Set(new.course.id.clone()),
            teacher_name: Set(new.teacher_name.clone()),
            class_label: Set(new.class_label.clone()),
            is_active: Set(true),
            start_time: Set(new.start_time),
            end_time: Set(None),
        }
        .insert(&txn)
        .await?;

        let records = roster.iter().map(|entry| attendance_record::ActiveModel {
            session_id: Set(new.id.clone()),
            student_id: Set(entry.student_id.clone()),
            status: Set(AttendanceStatus::Absent),
            marked_at: Set(None),
        });
        let inserted = attendance_record::Entity::insert_many(records)
            .exec_without_returning(&txn)
            .await?;
        if inserted != roster.len() as u64 {
            // dropping `txn` rolls the session row back too
            return Err(DbErr::Custom(format!(
                "inserted {inserted} of {} attendance records for session {}",
                roster.len(),
                new.id
            )));
        }

        txn.commit().await?;

        Ok(AttendanceSession {
            id: new.id,
            course_id: new.course.id,
            course_name: new.course.name,
            teacher_name: new.teacher_name,
            class_label: new.class_label,
            is_active: true,
            start_time: new.start_time,
            end_time: None,
            students: roster
                .iter()
                .map(|entry| StudentAttendance {
                    student_id: entry.student_id.clone(),
                    name: entry.name.clone(),
                    avatar: entry.avatar.clone(),
                    status: AttendanceStatus::Absent,
                    marked_at: None,
                })
                .collect(),
        })
    }

    async fn session_state(&self, session_id: &str) -> Result<Option<SessionState>, DbErr> {
        let found = attendance_session::Entity::find_by_id(session_id.to_owned())
            .one(&self.db)
            .await?;
        Ok(found.map(|s| SessionState {
            is_active: s.is_active,
            start_time: s.start_time,
            end_time: s.end_time,
        }))
    }

    async fn find_session(&self, session_id: &str) -> Result<Option<AttendanceSession>, DbErr> {
        let Some((session, course)) = attendance_session::Entity::find_by_id(session_id.to_owned())
            .find_also_related(course::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let rows = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .find_also_related(student::Entity)
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await?;

        let students = rows
            .into_iter()
            .map(|(record, student)| {
                let (name, avatar) = match student {
                    Some(s) => (s.name, s.avatar),
                    None => (record.student_id.clone(), None),
                };
                StudentAttendance {
                    student_id: record.student_id,
                    name,
                    avatar,
                    status: record.status,
                    marked_at: record.marked_at,
                }
            })
            .collect();

        Ok(Some(AttendanceSession {
            course_name: course.map(|c| c.name).unwrap_or_default(),
            id: session.id,
            course_id: session.course_id,
            teacher_name: session.teacher_name,
            class_label: session.class_label,
            is_active: session.is_active,
            start_time: session.start_time,
            end_time: session.end_time,
            students,
        }))
    }

    async fn mark_present(
        &self,
        session_id: &str,
        student_id: &str,
        at: DateTime<Utc>,
    ) -> Result<MarkOutcome, DbErr> {
        let active_sessions = attendance_session::Entity::find()
            .select_only()
            .column(attendance_session::Column::Id)
            .filter(attendance_session::Column::IsActive.eq(true))
            .into_query();

        let updated = attendance_record::Entity::update_many()
            .col_expr(
                attendance_record::Column::Status,
                Expr::value(AttendanceStatus::Present),
            )
            .col_expr(attendance_record::Column::MarkedAt, Expr::value(at))
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .filter(attendance_record::Column::Status.eq(AttendanceStatus::Absent))
            .filter(attendance_record::Column::SessionId.in_subquery(active_sessions))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 1 {
            return Ok(MarkOutcome::Marked { marked_at: at });
        }

        // Nothing changed: work out why.
        let Some(state) = self.session_state(session_id).await? else {
            return Ok(MarkOutcome::SessionNotFound);
        };
        if !state.is_active {
            return Ok(MarkOutcome::SessionClosed);
        }

        let record = attendance_record::Entity::find_by_id((
            session_id.to_owned(),
            student_id.to_owned(),
        ))
        .one(&self.db)
        .await?;

        match record {
            None => Ok(MarkOutcome::NotInSession),
            Some(r) if r.status == AttendanceStatus::Present => Ok(MarkOutcome::AlreadyPresent {
                marked_at: r.marked_at,
            }),
            // Sessions never reopen and records never revert, so an absent
            // record in an active session must have matched the update.
            Some(_) => Err(DbErr::Custom(format!(
                "attendance record {session_id}/{student_id} did not transition"
            ))),
        }
    }

    async fn close_session(
        &self,
        session_id: &str,
        at: DateTime<Utc>,
    ) -> Result<CloseOutcome, DbErr> {
        let updated = attendance_session::Entity::update_many()
            .col_expr(attendance_session::Column::IsActive, Expr::value(false))
            .col_expr(attendance_session::Column::EndTime, Expr::value(at))
            .filter(attendance_session::Column::Id.eq(session_id))
            .filter(attendance_session::Column::IsActive.eq(true))
            .exec(&self.db)
            .await?;

        if updated.rows_affected == 1 {
            return Ok(CloseOutcome::Closed);
        }
        match self.session_state(session_id).await? {
            Some(_) => Ok(CloseOutcome::AlreadyClosed),
            None => Ok(CloseOutcome::NotFound),
        }
    }

    async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<SessionSummary>, DbErr> {
        let mut query = attendance_session::Entity::find()
            .find_also_related(course::Entity)
            .order_by_desc(attendance_session::Column::StartTime);
        if let Some(course_id) = &filter.course_id {
            query = query.filter(attendance_session::Column::CourseId.eq(course_id.as_str()));
        }
        if let Some(active) = filter.active {
            query = query.filter(attendance_session::Column::IsActive.eq(active));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let sessions = query.all(&self.db).await?;
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = sessions.iter().map(|(s, _)| s.id.clone()).collect();
        let counts: HashMap<String, RecordCounts> = attendance_record::Entity::find()
            .select_only()
            .column(attendance_record::Column::SessionId)
            .column_as(
                Expr::expr(Func::count(Expr::col(attendance_record::Column::StudentId))),
                "total",
            )
            .column_as(
                Expr::expr(Func::sum(
                    Expr::case(
                        attendance_record::Column::Status.eq(AttendanceStatus::Present),
                        Expr::val(1),
                    )
                    .finally(Expr::val(0)),
                )),
                "present",
            )
            .filter(attendance_record::Column::SessionId.is_in(ids))
            .group_by(attendance_record::Column::SessionId)
            .into_model::<RecordCounts>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.session_id.clone(), c))
            .collect();

        Ok(sessions
            .into_iter()
            .map(|(s, course)| {
                let (total, present) = counts
                    .get(&s.id)
                    .map(|c| (c.total.max(0) as u64, c.present.max(0) as u64))
                    .unwrap_or((0, 0));
                SessionSummary {
                    course_name: course.map(|c| c.name).unwrap_or_default(),
                    id: s.id,
                    course_id: s.course_id,
                    teacher_name: s.teacher_name,
                    class_label: s.class_label,
                    is_active: s.is_active,
                    start_time: s.start_time,
                    end_time: s.end_time,
                    present_count: present,
                    total_count: total,
                }
            })
            .collect())
    }

    async fn student_history(&self, student_id: &str) -> Result<Vec<HistoryEntry>, DbErr> {
        let rows = attendance_record::Entity::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .find_also_related(attendance_session::Entity)
            .order_by_asc(attendance_session::Column::StartTime)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(record, session)| {
                session.map(|s| HistoryEntry {
                    session_id: s.id,
                    course_id: s.course_id,
                    is_active: s.is_active,
                    start_time: s.start_time,
                    status: record.status,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::{seed_algebra, setup_test_db, Fixture};

    fn roster_of(fx: &Fixture) -> Vec<RosterEntry> {
        [&fx.a, &fx.b, &fx.c]
            .into_iter()
            .map(|s| RosterEntry {
                student_id: s.id.clone(),
                name: s.name.clone(),
                class_label: s.class_label.clone(),
                avatar: s.avatar.clone(),
            })
            .collect()
    }

    fn new_session(fx: &Fixture, id: &str) -> NewSession {
        NewSession {
            id: id.to_owned(),
            course: CourseRef {
                id: fx.course.id.clone(),
                name: fx.course.name.clone(),
            },
            teacher_name: "Mr. Davis".into(),
            class_label: "Grade 10".into(),
            start_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips_records() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let store = DbAttendanceStore::new(db);

        let created = store
            .create_session(new_session(&fx, "sess-1"), &roster_of(&fx))
            .await
            .unwrap();
        let found = store.find_session("sess-1").await.unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.course_name, "Algebra II");
        assert_eq!(found.students.len(), 3);
    }

    #[tokio::test]
    async fn failed_record_insert_leaves_no_session_behind() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let store = DbAttendanceStore::new(db);

        let mut roster = roster_of(&fx);
        let duplicate = roster[0].clone();
        roster.push(duplicate);

        // The second record for the same student violates the primary key.
        let result = store.create_session(new_session(&fx, "sess-2"), &roster).await;
        assert!(result.is_err());
        assert!(store.session_state("sess-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mark_present_reports_each_outcome() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let store = DbAttendanceStore::new(db);
        store
            .create_session(new_session(&fx, "sess-3"), &roster_of(&fx))
            .await
            .unwrap();
        let at = Utc::now();

        assert_eq!(
            store.mark_present("sess-3", &fx.a.id, at).await.unwrap(),
            MarkOutcome::Marked { marked_at: at }
        );
        assert_eq!(
            store.mark_present("sess-3", &fx.a.id, Utc::now()).await.unwrap(),
            MarkOutcome::AlreadyPresent { marked_at: Some(at) }
        );
        assert_eq!(
            store.mark_present("sess-3", &fx.outsider.id, at).await.unwrap(),
            MarkOutcome::NotInSession
        );
        assert_eq!(
            store.mark_present("nope", &fx.a.id, at).await.unwrap(),
            MarkOutcome::SessionNotFound
        );

        assert_eq!(
            store.close_session("sess-3", Utc::now()).await.unwrap(),
            CloseOutcome::Closed
        );
        assert_eq!(
            store.mark_present("sess-3", &fx.b.id, Utc::now()).await.unwrap(),
            MarkOutcome::SessionClosed
        );
        // closed wins over "already present"
        assert_eq!(
            store.mark_present("sess-3", &fx.a.id, Utc::now()).await.unwrap(),
            MarkOutcome::SessionClosed
        );
    }

    #[tokio::test]
    async fn close_session_is_a_one_shot_transition() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let store = DbAttendanceStore::new(db);
        store
            .create_session(new_session(&fx, "sess-4"), &roster_of(&fx))
            .await
            .unwrap();

        let first_end = Utc::now();
        assert_eq!(
            store.close_session("sess-4", first_end).await.unwrap(),
            CloseOutcome::Closed
        );
        assert_eq!(
            store.close_session("sess-4", Utc::now()).await.unwrap(),
            CloseOutcome::AlreadyClosed
        );
        assert_eq!(
            store.close_session("missing", Utc::now()).await.unwrap(),
            CloseOutcome::NotFound
        );

        let state = store.session_state("sess-4").await.unwrap().unwrap();
        assert!(!state.is_active);
        assert_eq!(state.end_time, Some(first_end));
    }

    #[tokio::test]
    async fn list_sessions_counts_present_records() {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        let store = DbAttendanceStore::new(db);
        store
            .create_session(new_session(&fx, "sess-5"), &roster_of(&fx))
            .await
            .unwrap();
        store
            .create_session(new_session(&fx, "sess-6"), &roster_of(&fx))
            .await
            .unwrap();
        for student in [&fx.a, &fx.b] {
            store
                .mark_present("sess-5", &student.id, Utc::now())
                .await
                .unwrap();
        }

        let all = store.list_sessions(&SessionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        let by_id = |id: &str| all.iter().find(|s| s.id == id).unwrap();
        assert_eq!(by_id("sess-5").present_count, 2);
        assert_eq!(by_id("sess-5").total_count, 3);
        assert_eq!(by_id("sess-5").course_name, "Algebra II");
        assert_eq!(by_id("sess-6").present_count, 0);
        assert_eq!(by_id("sess-6").total_count, 3);

        let closed_only = store
            .list_sessions(&SessionFilter {
                active: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(closed_only.is_empty());
    }
}
