use std::sync::Mutex;

/// Severity of a user-facing status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
}

/// Side channel through which handlers report outcomes to the caller.
///
/// The pipeline returns nothing to its caller; every outcome, including
/// failures, is delivered as one or more status reports.
pub trait StatusSink: Send + Sync {
    fn report(&self, status: Status, message: &str);

    fn info(&self, message: &str) {
        self.report(Status::Info, message);
    }

    fn success(&self, message: &str) {
        self.report(Status::Success, message);
    }

    fn warning(&self, message: &str) {
        self.report(Status::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Status::Error, message);
    }
}

/// Sink that prints reports to stdout, used by the CLI front end
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn report(&self, status: Status, message: &str) {
        match status {
            Status::Info => println!("{}", message),
            Status::Success => println!("✅ {}", message),
            Status::Warning => println!("⚠️  {}", message),
            Status::Error => println!("❌ {}", message),
        }
    }
}

/// Sink that collects reports in memory, used by tests
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(Status, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports received so far
    pub fn reports(&self) -> Vec<(Status, String)> {
        self.reports.lock().unwrap().clone()
    }

    /// Whether any report of the given status contains the needle
    pub fn contains(&self, status: Status, needle: &str) -> bool {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .any(|(s, m)| *s == status && m.contains(needle))
    }
}

impl StatusSink for MemorySink {
    fn report(&self, status: Status, message: &str) {
        self.reports.lock().unwrap().push((status, message.to_string()));
    }
}
