use serde::Serialize;

/// An event knows its stable name and the topic it is published on.
pub trait Event: Serialize {
    const NAME: &'static str;
    /// Canonical topic path, e.g. `attendance:session:{id}`.
    fn topic_path(&self) -> String;
}
