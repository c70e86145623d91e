pub mod app;
pub mod ws;

pub use app::{TestApp, make_test_app, make_test_app_with_store, send};
pub use db::test_utils::seed_algebra;
pub use ws::spawn_server;
