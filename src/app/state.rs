// LogLens - app/state.rs
//
// Application state: the filter toolbar, the loaded request log, and the
// filtered view derived from the last committed filters.
// Owned by the eframe::App implementation.
//
// The toolbar's listener forwards each committed state through a channel;
// `poll_commits` drains it once per frame, re-filters and persists.

use crate::app::session::{self, SessionData};
use crate::app::toolbar::{FilterToolbar, ToolbarOptions};
use crate::core::clock;
use crate::core::filter;
use crate::core::model::{FilterState, RequestLogEntry};
use crate::util::error::LogLensError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

/// Text buffers behind the popover's date inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInputs {
    pub from: String,
    pub to: String,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The filter toolbar controller.
    pub toolbar: FilterToolbar,

    /// Committed filter states forwarded by the toolbar listener.
    commits: Receiver<FilterState>,

    /// Number of commits received since startup.
    pub commit_count: usize,

    /// Rows of the currently loaded request-log export.
    pub entries: Vec<RequestLogEntry>,

    /// Path of the loaded export, if any.
    pub entries_path: Option<PathBuf>,

    /// Indices of entries matching the committed filters (into `entries`).
    pub filtered_indices: Vec<usize>,

    /// Date input buffers for the open popover.
    pub date_inputs: DateInputs,

    /// Where the session is persisted (None = persistence disabled).
    pub session_path: Option<PathBuf>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, unreadable exports).
    pub warnings: Vec<String>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state. `initial` is a restored filter state, if any.
    pub fn new(
        initial: Option<FilterState>,
        options: ToolbarOptions,
        now: DateTime<Utc>,
        session_path: Option<PathBuf>,
        debug_mode: bool,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let toolbar = FilterToolbar::new(
            initial,
            options,
            now,
            Box::new(move |filters: &FilterState| {
                if tx.send(filters.clone()).is_err() {
                    tracing::debug!("Filter commit dropped; state receiver gone");
                }
            }),
        );

        Self {
            toolbar,
            commits: rx,
            commit_count: 0,
            entries: Vec::new(),
            entries_path: None,
            filtered_indices: Vec::new(),
            date_inputs: DateInputs::default(),
            session_path,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            debug_mode,
        }
    }

    /// Drain committed filter states. Re-filters and saves the session when
    /// anything arrived. Returns the number of commits drained.
    pub fn poll_commits(&mut self) -> usize {
        let drained = self.commits.try_iter().count();
        if drained == 0 {
            return 0;
        }
        self.commit_count += drained;
        self.apply_filters();
        self.status_message = format!(
            "{} of {} requests match.",
            self.filtered_indices.len(),
            self.entries.len()
        );
        self.save_session();
        drained
    }

    /// Recompute filtered indices from current entries and committed filters.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.entries, self.toolbar.filters());
    }

    /// Load a request-log export, replacing the current rows.
    pub fn load_entries(&mut self, path: &Path) {
        match crate::platform::entries::load_entries(path) {
            Ok(entries) => {
                self.entries = entries;
                self.entries_path = Some(path.to_path_buf());
                self.apply_filters();
                self.status_message = format!(
                    "Loaded {} requests from {}.",
                    self.entries.len(),
                    path.display()
                );
            }
            Err(e) => {
                let err = LogLensError::from(e);
                tracing::warn!(error = %err, "Request log load failed");
                self.status_message = format!("Load failed: {err}");
                self.warnings.push(err.to_string());
            }
        }
    }

    /// The committed entry rows in display order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &RequestLogEntry> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.entries.get(idx))
    }

    /// Query string a log query layer would receive for the committed filters.
    pub fn query_string(&self) -> String {
        filter::to_query_string(self.toolbar.filters())
    }

    /// Open the date popover and seed the date input buffers from the draft.
    pub fn open_popover(&mut self) {
        self.toolbar.open_popover();
        self.seed_date_inputs();
    }

    /// Move the toolbar to the resolved zone. An open popover's draft is
    /// re-seeded by the toolbar, so the date buffers follow it.
    pub fn timezone_ready(&mut self, tz: Tz, now: DateTime<Utc>) {
        self.toolbar.timezone_ready(tz, now);
        self.seed_date_inputs();
    }

    fn seed_date_inputs(&mut self) {
        if let Some(draft) = self.toolbar.draft() {
            self.date_inputs = DateInputs {
                from: clock::format_date_input(draft.range.from),
                to: clock::format_date_input(draft.range.to),
            };
        }
    }

    /// Persist the committed filters. Failures are logged, not surfaced.
    pub fn save_session(&self) {
        let Some(ref path) = self.session_path else {
            return;
        };
        let data = SessionData::new(self.toolbar.filters().clone(), self.entries_path.clone());
        if let Err(e) = session::save(&data, path) {
            let err = LogLensError::from(e);
            tracing::warn!(error = %err, "Failed to save session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::HttpMethod;
    use chrono_tz::Tz;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn write_export(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("api_logs.json");
        std::fs::write(
            &path,
            r#"[
                {"uuid":"1","method":"GET","status":200,"endpoint":"/api/users",
                 "ip_address":"10.0.0.1","created_at":"2024-05-01T08:00:00Z"},
                {"uuid":"2","method":"POST","status":500,"endpoint":"/api/tables",
                 "ip_address":"10.0.0.2","created_at":"2024-05-01T09:00:00Z"},
                {"uuid":"3","method":"GET","status":200,"endpoint":"/api/users",
                 "ip_address":"10.0.0.1","created_at":"2024-04-20T09:00:00Z"}
            ]"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_commits_refilter_and_persist() {
        let dir = TempDir::new().unwrap();
        let session = dir.path().join("session.json");
        let mut state = AppState::new(
            None,
            ToolbarOptions::default(),
            now(),
            Some(session.clone()),
            false,
        );
        state.load_entries(&write_export(&dir));
        assert_eq!(state.entries.len(), 3);

        state.timezone_ready(Tz::UTC, now());
        assert_eq!(state.poll_commits(), 1);
        // Only today's two rows.
        assert_eq!(state.filtered_indices.len(), 2);

        state.toolbar.set_method(Some(HttpMethod::Post));
        assert_eq!(state.poll_commits(), 1);
        let uuids: Vec<_> = state.visible_entries().map(|e| e.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["2"]);
        assert_eq!(state.commit_count, 2);
        assert!(state.query_string().starts_with("method=POST&startTime="));

        let saved = session::load(&session).expect("session written on commit");
        assert_eq!(saved.filters.method, Some(HttpMethod::Post));
        assert!(saved.entries_path.is_some());
    }

    #[test]
    fn test_poll_without_commits_is_noop() {
        let mut state = AppState::new(None, ToolbarOptions::default(), now(), None, false);
        assert_eq!(state.poll_commits(), 0);
        assert_eq!(state.status_message, "Ready.");
    }

    #[test]
    fn test_open_popover_seeds_date_inputs() {
        let mut state = AppState::new(None, ToolbarOptions::default(), now(), None, false);
        state.timezone_ready(Tz::UTC, now());
        state.open_popover();
        assert_eq!(state.date_inputs.from, "2024-05-01");
        assert_eq!(state.date_inputs.to, "2024-05-01");
    }

    #[test]
    fn test_zone_ready_reseeds_open_popover_inputs() {
        // 20:00Z is already May 2nd in Tokyo.
        let evening = DateTime::parse_from_rfc3339("2024-05-01T20:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut state = AppState::new(None, ToolbarOptions::default(), evening, None, false);
        state.open_popover();
        assert_eq!(state.date_inputs.from, "2024-05-01");

        state.timezone_ready(chrono_tz::Asia::Tokyo, evening);
        assert_eq!(state.date_inputs.from, "2024-05-02");
        assert_eq!(state.date_inputs.to, "2024-05-02");
        let draft = state.toolbar.draft().expect("popover still open");
        assert_eq!(
            clock::format_date_input(draft.range.from),
            state.date_inputs.from
        );
    }

    #[test]
    fn test_bad_export_records_warning() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(None, ToolbarOptions::default(), now(), None, false);
        state.load_entries(&dir.path().join("missing.json"));
        assert_eq!(state.warnings.len(), 1);
        assert!(
            state.warnings[0].starts_with("Request log error:"),
            "got: {}",
            state.warnings[0]
        );
        assert!(state.entries_path.is_none());
    }
}
