//! Application state container shared across Axum route handlers.
//!
//! Holds the database connection, the WebSocket topic manager and the
//! attendance session manager built on top of that connection.

use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;
use services::attendance_session::AttendanceSessionManager;

/// Central application state shared across the server.
///
/// Cloning is cheap: the connection pool, the topic map and the manager's
/// collaborators are all reference counted.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
    attendance: AttendanceSessionManager,
}

impl AppState {
    /// Wires the sea-orm backed attendance manager onto `db`.
    pub fn new(db: DatabaseConnection, ws: WebSocketManager) -> Self {
        let attendance = AttendanceSessionManager::with_database(db.clone());
        Self { db, ws, attendance }
    }

    /// Uses a caller-supplied manager, e.g. one wired to custom collaborators.
    pub fn with_manager(
        db: DatabaseConnection,
        ws: WebSocketManager,
        attendance: AttendanceSessionManager,
    ) -> Self {
        Self { db, ws, attendance }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    /// The attendance session manager every attendance route goes through.
    pub fn attendance(&self) -> &AttendanceSessionManager {
        &self.attendance
    }
}

impl AppState {
    /// Returns a cloned instance of the `WebSocketManager`.
    ///
    /// This allows handlers to broadcast without holding a reference to the state.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }
}
