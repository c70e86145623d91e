//! Attendance Session Manager.
//!
//! Owns the session lifecycle: `start_session` snapshots the roster into ABSENT
//! records, `mark_present` moves one record to PRESENT, `end_session` freezes
//! the session. Collaborators are injected as trait objects.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::attendance_store::{
    AttendanceStore, CloseOutcome, DbAttendanceStore, MarkOutcome, NewSession, SessionFilter,
    SessionSummary, StudentAttendance,
};
use crate::card_directory::{CardDirectory, DbCardDirectory};
use crate::error::{AttendanceError, AttendanceResult};
use crate::roster::{DbRosterResolver, RosterResolver};

pub use crate::attendance_store::{AttendanceSession, AttendanceStatus};

/// Used when the first roster entry carries no class label.
const UNKNOWN_CLASS: &str = "N/A";

/// Result of a successful scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkPresent {
    pub session_id: String,
    pub attendance: StudentAttendance,
    /// `false` when the student was already present and nothing changed.
    pub newly_marked: bool,
}

/// Filter for `list_sessions`. `course` accepts a course name or id.
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub course: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<u64>,
}

/// Attendance over the ended sessions a student was on the roster of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAttendanceSummary {
    pub student_id: String,
    pub sessions_total: u64,
    pub sessions_attended: u64,
    pub sessions_missed: u64,
    /// Percentage in `0.0..=100.0`, two decimals.
    pub attendance_rate: f64,
}

#[derive(Clone)]
pub struct AttendanceSessionManager {
    roster: Arc<dyn RosterResolver>,
    cards: Arc<dyn CardDirectory>,
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceSessionManager {
    pub fn new(
        roster: Arc<dyn RosterResolver>,
        cards: Arc<dyn CardDirectory>,
        store: Arc<dyn AttendanceStore>,
    ) -> Self {
        Self {
            roster,
            cards,
            store,
        }
    }

    /// Wires the sea-orm backed collaborators over one connection pool.
    pub fn with_database(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(DbRosterResolver::new(db.clone())),
            Arc::new(DbCardDirectory::new(db.clone())),
            Arc::new(DbAttendanceStore::new(db)),
        )
    }

    pub async fn start_session(
        &self,
        course_identifier: &str,
        teacher_name: &str,
    ) -> AttendanceResult<AttendanceSession> {
        let course = self
            .roster
            .find_course(course_identifier)
            .await?
            .ok_or_else(|| AttendanceError::CourseNotFound(course_identifier.to_owned()))?;

        let mut roster = self.roster.enrolled_students(&course.id).await?;
        let mut seen = HashSet::new();
        roster.retain(|entry| seen.insert(entry.student_id.clone()));

        let Some(first) = roster.first() else {
            warn!(course_id = %course.id, "Refusing to start session: empty roster");
            return Err(AttendanceError::EmptyRoster(course.name));
        };
        let class_label = if first.class_label.trim().is_empty() {
            UNKNOWN_CLASS.to_owned()
        } else {
            first.class_label.clone()
        };

        let new = NewSession {
            id: Uuid::new_v4().to_string(),
            course,
            teacher_name: teacher_name.trim().to_owned(),
            class_label,
            start_time: Utc::now(),
        };
        let session = self.store.create_session(new, &roster).await?;

        info!(
            session_id = %session.id,
            course_id = %session.course_id,
            students = session.students.len(),
            "Attendance session started"
        );
        Ok(session)
    }

    /// Current state of a session, or `None` when it does not exist.
    pub async fn get_session(&self, session_id: &str) -> AttendanceResult<Option<AttendanceSession>> {
        Ok(self.store.find_session(session_id).await?)
    }

    pub async fn mark_present(
        &self,
        session_id: &str,
        card_id: &str,
    ) -> AttendanceResult<MarkPresent> {
        // Session checks come before the card lookup so a closed session always
        // answers SessionClosed, whatever card was tapped.
        let state = self
            .store
            .session_state(session_id)
            .await?
            .ok_or_else(|| AttendanceError::SessionNotFound(session_id.to_owned()))?;
        if !state.is_active {
            debug!(session_id, "Scan rejected: session closed");
            return Err(AttendanceError::SessionClosed(session_id.to_owned()));
        }

        let holder = self
            .cards
            .find_student_by_card(card_id)
            .await?
            .ok_or_else(|| {
                debug!(session_id, card_id, "Scan rejected: unknown card");
                AttendanceError::UnknownCard(card_id.to_owned())
            })?;

        let outcome = self
            .store
            .mark_present(session_id, &holder.student_id, Utc::now())
            .await?;

        let (status_at, newly_marked) = match outcome {
            MarkOutcome::Marked { marked_at } => {
                info!(session_id, student_id = %holder.student_id, "Student marked present");
                (Some(marked_at), true)
            }
            MarkOutcome::AlreadyPresent { marked_at } => {
                debug!(session_id, student_id = %holder.student_id, "Repeat scan ignored");
                (marked_at, false)
            }
            MarkOutcome::NotInSession => {
                debug!(session_id, student_id = %holder.student_id, "Scan rejected: not on roster");
                return Err(AttendanceError::StudentNotInSession {
                    session_id: session_id.to_owned(),
                    student_id: holder.student_id,
                });
            }
            // The session was ended between the state check and the write.
            MarkOutcome::SessionClosed => {
                return Err(AttendanceError::SessionClosed(session_id.to_owned()));
            }
            MarkOutcome::SessionNotFound => {
                return Err(AttendanceError::SessionNotFound(session_id.to_owned()));
            }
        };

        Ok(MarkPresent {
            session_id: session_id.to_owned(),
            attendance: StudentAttendance {
                student_id: holder.student_id,
                name: holder.name,
                avatar: holder.avatar,
                status: AttendanceStatus::Present,
                marked_at: status_at,
            },
            newly_marked,
        })
    }

    /// Closes the session and returns its final state. A second call fails with
    /// `SessionAlreadyClosed` and leaves `end_time` untouched.
    pub async fn end_session(&self, session_id: &str) -> AttendanceResult<AttendanceSession> {
        let state = self
            .store
            .session_state(session_id)
            .await?
            .ok_or_else(|| AttendanceError::SessionNotFound(session_id.to_owned()))?;
        if !state.is_active {
            return Err(AttendanceError::SessionAlreadyClosed(session_id.to_owned()));
        }

        let ended_at = clamp_end(Utc::now(), state.start_time);
        match self.store.close_session(session_id, ended_at).await? {
            CloseOutcome::Closed => {}
            CloseOutcome::AlreadyClosed => {
                return Err(AttendanceError::SessionAlreadyClosed(session_id.to_owned()));
            }
            CloseOutcome::NotFound => {
                return Err(AttendanceError::SessionNotFound(session_id.to_owned()));
            }
        }

        let session = self
            .store
            .find_session(session_id)
            .await?
            .ok_or_else(|| AttendanceError::SessionNotFound(session_id.to_owned()))?;

        info!(
            session_id,
            present = session.present_count(),
            absent = session.absent_count(),
            "Attendance session ended"
        );
        Ok(session)
    }

    /// Session summaries, newest first.
    pub async fn list_sessions(&self, query: SessionQuery) -> AttendanceResult<Vec<SessionSummary>> {
        let course_id = match query.course.as_deref() {
            Some(identifier) => Some(
                self.roster
                    .find_course(identifier)
                    .await?
                    .ok_or_else(|| AttendanceError::CourseNotFound(identifier.to_owned()))?
                    .id,
            ),
            None => None,
        };

        let filter = SessionFilter {
            course_id,
            active: query.active,
            limit: query.limit,
        };
        Ok(self.store.list_sessions(&filter).await?)
    }

    /// Ended sessions only; an unknown student simply has none.
    pub async fn student_attendance_summary(
        &self,
        student_id: &str,
    ) -> AttendanceResult<StudentAttendanceSummary> {
        let history = self.store.student_history(student_id).await?;

        let (total, attended) = history
            .iter()
            .filter(|h| !h.is_active)
            .fold((0u64, 0u64), |(total, attended), h| {
                let present = u64::from(h.status == AttendanceStatus::Present);
                (total + 1, attended + present)
            });

        Ok(StudentAttendanceSummary {
            student_id: student_id.to_owned(),
            sessions_total: total,
            sessions_attended: attended,
            sessions_missed: total - attended,
            attendance_rate: attendance_rate(attended, total),
        })
    }
}

fn clamp_end(now: DateTime<Utc>, start: DateTime<Utc>) -> DateTime<Utc> {
    now.max(start)
}

fn attendance_rate(attended: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = attended as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance_store::{HistoryEntry, SessionState};
    use crate::roster::{CourseRef, RosterEntry};
    use async_trait::async_trait;
    use chrono::Duration;
    use db::models::student_enrollment::Model as EnrollmentModel;
    use db::test_utils::{seed_algebra, setup_test_db, Fixture};
    use sea_orm::{DbErr, RuntimeErr};

    async fn manager_with_fixture() -> (AttendanceSessionManager, Fixture, DatabaseConnection) {
        let db = setup_test_db().await;
        let fx = seed_algebra(&db).await;
        (AttendanceSessionManager::with_database(db.clone()), fx, db)
    }

    fn status_of(session: &AttendanceSession, student_id: &str) -> AttendanceStatus {
        session.student(student_id).expect("student on roster").status
    }

    #[tokio::test]
    async fn start_session_snapshots_roster_as_absent() {
        let (manager, fx, _db) = manager_with_fixture().await;

        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        assert!(session.is_active);
        assert!(session.end_time.is_none());
        assert_eq!(session.course_id, fx.course.id);
        assert_eq!(session.teacher_name, "Mr. Davis");
        assert_eq!(session.class_label, "Grade 10");
        assert_eq!(session.students.len(), 3);

        let polled = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(polled.students.len(), 3);
        assert!(polled
            .students
            .iter()
            .all(|s| s.status == AttendanceStatus::Absent && s.marked_at.is_none()));
    }

    #[tokio::test]
    async fn start_session_accepts_course_id() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session(&fx.course.id, "Mr. Davis").await.unwrap();
        assert_eq!(session.course_name, "Algebra II");
    }

    #[tokio::test]
    async fn start_session_unknown_course() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let err = manager.start_session("Astrology", "Mr. Davis").await.unwrap_err();
        assert!(matches!(err, AttendanceError::CourseNotFound(c) if c == "Astrology"));
    }

    #[tokio::test]
    async fn start_session_empty_roster_creates_nothing() {
        let (manager, _fx, _db) = manager_with_fixture().await;

        let err = manager.start_session("Study Hall", "Ms. Lane").await.unwrap_err();
        assert!(matches!(err, AttendanceError::EmptyRoster(_)));

        let sessions = manager.list_sessions(SessionQuery::default()).await.unwrap();
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn algebra_scenario_end_to_end() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let first = manager.mark_present(&session.id, "CARD-A").await.unwrap();
        assert!(first.newly_marked);
        assert_eq!(first.attendance.name, "Ava Adams");
        assert_eq!(first.attendance.status, AttendanceStatus::Present);

        let polled = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(status_of(&polled, &fx.a.id), AttendanceStatus::Present);
        assert_eq!(status_of(&polled, &fx.b.id), AttendanceStatus::Absent);
        assert_eq!(status_of(&polled, &fx.c.id), AttendanceStatus::Absent);

        let again = manager.mark_present(&session.id, "CARD-A").await.unwrap();
        assert!(!again.newly_marked);
        assert_eq!(again.attendance.status, AttendanceStatus::Present);
        assert_eq!(again.attendance.marked_at, first.attendance.marked_at);

        let ended = manager.end_session(&session.id).await.unwrap();
        assert!(!ended.is_active);
        assert_eq!(status_of(&ended, &fx.a.id), AttendanceStatus::Present);
        assert_eq!(status_of(&ended, &fx.b.id), AttendanceStatus::Absent);
        assert_eq!(status_of(&ended, &fx.c.id), AttendanceStatus::Absent);

        let late = manager.mark_present(&session.id, "CARD-B").await.unwrap_err();
        assert!(matches!(late, AttendanceError::SessionClosed(_)));
        let after = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(status_of(&after, &fx.b.id), AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn mark_present_unknown_session() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let err = manager.mark_present("no-such-session", "CARD-A").await.unwrap_err();
        assert!(matches!(err, AttendanceError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn mark_present_unknown_card() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let err = manager.mark_present(&session.id, "CARD-ZZZ").await.unwrap_err();
        assert!(matches!(err, AttendanceError::UnknownCard(c) if c == "CARD-ZZZ"));
    }

    #[tokio::test]
    async fn mark_present_student_not_on_roster() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let err = manager.mark_present(&session.id, "CARD-D").await.unwrap_err();
        match err {
            AttendanceError::StudentNotInSession { session_id, student_id } => {
                assert_eq!(session_id, session.id);
                assert_eq!(student_id, fx.outsider.id);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_session_rejects_every_scan() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.mark_present(&session.id, "CARD-A").await.unwrap();
        manager.end_session(&session.id).await.unwrap();

        // already present, absent, unknown and off-roster cards all get SessionClosed
        for card in ["CARD-A", "CARD-C", "CARD-ZZZ", "CARD-D"] {
            let err = manager.mark_present(&session.id, card).await.unwrap_err();
            assert!(
                matches!(err, AttendanceError::SessionClosed(_)),
                "{card}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn roster_snapshot_ignores_later_enrollment() {
        let (manager, fx, db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        EnrollmentModel::enroll(&db, &fx.outsider.id, &fx.course.id)
            .await
            .unwrap();
        EnrollmentModel::withdraw(&db, &fx.b.id, &fx.course.id)
            .await
            .unwrap();

        let err = manager.mark_present(&session.id, "CARD-D").await.unwrap_err();
        assert!(matches!(err, AttendanceError::StudentNotInSession { .. }));

        let withdrawn = manager.mark_present(&session.id, "CARD-B").await.unwrap();
        assert!(withdrawn.newly_marked);

        let polled = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(polled.students.len(), 3);
        assert!(polled.student(&fx.outsider.id).is_none());
    }

    #[tokio::test]
    async fn end_session_stamps_end_time_and_keeps_statuses() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.mark_present(&session.id, "CARD-C").await.unwrap();
        let before = manager.get_session(&session.id).await.unwrap().unwrap();

        let ended = manager.end_session(&session.id).await.unwrap();

        assert!(!ended.is_active);
        let end_time = ended.end_time.expect("end_time set");
        assert!(end_time >= ended.start_time);
        for student in &before.students {
            assert_eq!(status_of(&ended, &student.student_id), student.status);
        }
        assert_eq!(status_of(&ended, &fx.c.id), AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn second_end_fails_and_keeps_first_end_time() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        let ended = manager.end_session(&session.id).await.unwrap();

        let err = manager.end_session(&session.id).await.unwrap_err();
        assert!(matches!(err, AttendanceError::SessionAlreadyClosed(_)));

        let polled = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(polled.end_time, ended.end_time);
    }

    #[tokio::test]
    async fn end_unknown_session() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let err = manager.end_session("ghost").await.unwrap_err();
        assert!(matches!(err, AttendanceError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_duplicate_scans_transition_once() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let (first, second) = tokio::join!(
            manager.mark_present(&session.id, "CARD-A"),
            manager.mark_present(&session.id, "CARD-A"),
        );
        let first = first.unwrap();
        let second = second.unwrap();

        assert_eq!(
            [first.newly_marked, second.newly_marked]
                .iter()
                .filter(|n| **n)
                .count(),
            1
        );
        assert_eq!(first.attendance.marked_at, second.attendance.marked_at);

        let polled = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(status_of(&polled, &fx.a.id), AttendanceStatus::Present);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn spawned_scans_across_threads_transition_once() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = manager.clone();
                let id = session.id.clone();
                tokio::spawn(async move { manager.mark_present(&id, "CARD-B").await })
            })
            .collect();

        let results = futures::future::join_all(handles).await;
        let transitions = results
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .filter(|r| r.newly_marked)
            .count();
        assert_eq!(transitions, 1);
    }

    #[tokio::test]
    async fn scan_racing_end_is_linearized() {
        let (manager, fx, _db) = manager_with_fixture().await;
        let session = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let (scan, end) = tokio::join!(
            manager.mark_present(&session.id, "CARD-B"),
            manager.end_session(&session.id),
        );
        end.unwrap();

        let final_state = manager.get_session(&session.id).await.unwrap().unwrap();
        assert!(!final_state.is_active);
        match scan {
            Ok(marked) => {
                assert!(marked.newly_marked);
                assert_eq!(status_of(&final_state, &fx.b.id), AttendanceStatus::Present);
            }
            Err(AttendanceError::SessionClosed(_)) => {
                assert_eq!(status_of(&final_state, &fx.b.id), AttendanceStatus::Absent);
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_sessions_filters_by_course_and_activity() {
        let (manager, _fx, _db) = manager_with_fixture().await;
        let older = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.mark_present(&older.id, "CARD-A").await.unwrap();
        manager.end_session(&older.id).await.unwrap();
        let newer = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();

        let all = manager
            .list_sessions(SessionQuery {
                course: Some("Algebra II".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
        assert_eq!(all[1].present_count, 1);
        assert_eq!(all[1].total_count, 3);

        let active = manager
            .list_sessions(SessionQuery {
                active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, newer.id);

        let err = manager
            .list_sessions(SessionQuery {
                course: Some("Astrology".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::CourseNotFound(_)));
    }

    #[tokio::test]
    async fn summary_counts_only_ended_sessions() {
        let (manager, fx, _db) = manager_with_fixture().await;

        let s1 = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.mark_present(&s1.id, "CARD-A").await.unwrap();
        manager.end_session(&s1.id).await.unwrap();

        let s2 = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.end_session(&s2.id).await.unwrap();

        let s3 = manager.start_session("Algebra II", "Mr. Davis").await.unwrap();
        manager.mark_present(&s3.id, "CARD-A").await.unwrap();

        let summary = manager.student_attendance_summary(&fx.a.id).await.unwrap();
        assert_eq!(summary.sessions_total, 2);
        assert_eq!(summary.sessions_attended, 1);
        assert_eq!(summary.sessions_missed, 1);
        assert_eq!(summary.attendance_rate, 50.0);

        let nobody = manager.student_attendance_summary("S999").await.unwrap();
        assert_eq!(nobody.sessions_total, 0);
        assert_eq!(nobody.attendance_rate, 0.0);
    }

    #[test]
    fn rate_rounds_to_two_decimals() {
        assert_eq!(attendance_rate(1, 3), 33.33);
        assert_eq!(attendance_rate(2, 3), 66.67);
        assert_eq!(attendance_rate(0, 0), 0.0);
    }

    #[test]
    fn end_time_never_precedes_start_time() {
        let start = Utc::now();
        assert_eq!(clamp_end(start - Duration::seconds(5), start), start);
        let later = start + Duration::seconds(5);
        assert_eq!(clamp_end(later, start), later);
    }

    // Collaborators that simulate a dead database.

    fn outage() -> DbErr {
        DbErr::Conn(RuntimeErr::Internal("connection refused".into()))
    }

    struct DownRoster;

    #[async_trait]
    impl RosterResolver for DownRoster {
        async fn find_course(&self, _: &str) -> Result<Option<CourseRef>, DbErr> {
            Err(outage())
        }
        async fn enrolled_students(&self, _: &str) -> Result<Vec<RosterEntry>, DbErr> {
            Err(outage())
        }
    }

    struct DownStore;

    #[async_trait]
    impl AttendanceStore for DownStore {
        async fn create_session(
            &self,
            _: NewSession,
            _: &[RosterEntry],
        ) -> Result<AttendanceSession, DbErr> {
            Err(outage())
        }
        async fn session_state(&self, _: &str) -> Result<Option<SessionState>, DbErr> {
            Err(outage())
        }
        async fn find_session(&self, _: &str) -> Result<Option<AttendanceSession>, DbErr> {
            Err(outage())
        }
        async fn mark_present(
            &self,
            _: &str,
            _: &str,
            _: DateTime<Utc>,
        ) -> Result<MarkOutcome, DbErr> {
            Err(outage())
        }
        async fn close_session(&self, _: &str, _: DateTime<Utc>) -> Result<CloseOutcome, DbErr> {
            Err(outage())
        }
        async fn list_sessions(&self, _: &SessionFilter) -> Result<Vec<SessionSummary>, DbErr> {
            Err(outage())
        }
        async fn student_history(&self, _: &str) -> Result<Vec<HistoryEntry>, DbErr> {
            Err(outage())
        }
    }

    #[tokio::test]
    async fn store_outage_surfaces_as_storage_unavailable() {
        let db = setup_test_db().await;
        let _fx = seed_algebra(&db).await;
        let manager = AttendanceSessionManager::new(
            Arc::new(DbRosterResolver::new(db.clone())),
            Arc::new(DbCardDirectory::new(db)),
            Arc::new(DownStore),
        );

        let err = manager.start_session("Algebra II", "Mr. Davis").await.unwrap_err();
        assert!(err.is_storage());
        assert_eq!(err.code(), "STORAGE_UNAVAILABLE");

        assert!(manager.get_session("x").await.unwrap_err().is_storage());
        assert!(manager.mark_present("x", "CARD-A").await.unwrap_err().is_storage());
        assert!(manager.end_session("x").await.unwrap_err().is_storage());
        assert!(manager
            .student_attendance_summary("S001")
            .await
            .unwrap_err()
            .is_storage());
    }

    #[tokio::test]
    async fn roster_outage_surfaces_as_storage_unavailable() {
        let db = setup_test_db().await;
        let manager = AttendanceSessionManager::new(
            Arc::new(DownRoster),
            Arc::new(DbCardDirectory::new(db.clone())),
            Arc::new(DbAttendanceStore::new(db)),
        );

        let err = manager.start_session("Algebra II", "Mr. Davis").await.unwrap_err();
        assert!(matches!(err, AttendanceError::StorageUnavailable(_)));
    }
}
