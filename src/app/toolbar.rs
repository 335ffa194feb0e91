// LogLens - app/toolbar.rs
//
// Filter toolbar controller: owns the committed FilterState and every piece
// of edit state in front of it.
//
// Edit flows:
//   - method / status selectors commit immediately.
//   - free-text fields (IP, endpoint, user) commit after a quiet period; an
//     explicit confirm (Enter) commits at once. Clearing a field commits the
//     removal immediately.
//   - the date popover stages edits in a Draft; Apply, or closing with
//     changes, finalises the draft and commits the UTC bounds.
//   - presets commit immediately and close the popover.
//
// Every commit is merge -> store -> notify, run to completion before the
// next event. The listener is called once per changed state and never for
// staged edits.
//
// Timezone lifecycle: the toolbar mounts with a provisional UTC zone and is
// moved to the real zone by `timezone_ready`, which the host calls once the
// first frame has rendered.

use crate::app::debounce::Debouncer;
use crate::core::clock;
use crate::core::model::{DateRange, FilterState, HttpMethod, LocalSelection, TextField};
use crate::core::preset::{match_preset, Preset};
use crate::core::translate::{
    commit_bounds, default_filters, expand_bounds, is_non_default, today_selection,
};
use crate::util::constants::DEFAULT_TEXT_DEBOUNCE_MS;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::{Duration, Instant};

/// Receives every committed filter state, synchronously and in order.
pub type FiltersListener = Box<dyn FnMut(&FilterState)>;

/// Two-phase zone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZonePhase {
    /// Host zone not yet read; conversions use UTC.
    Pending,
    /// Host zone resolved.
    Ready(Tz),
}

/// Behaviour knobs, usually from config.toml.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarOptions {
    /// Quiet period for free-text fields.
    pub text_debounce: Duration,
    /// Commit staged date edits when the popover closes without Apply.
    pub apply_on_close: bool,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self {
            text_debounce: Duration::from_millis(DEFAULT_TEXT_DEBOUNCE_MS),
            apply_on_close: true,
        }
    }
}

// =============================================================================
// Draft (staged popover edits)
// =============================================================================

/// Staged copy of the date/time selection while the popover is open.
///
/// Time-of-day values are kept as the raw input text and only parsed at
/// `finalize`, so half-typed values never reach the committed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub range: DateRange,
    pub start_input: String,
    pub end_input: String,
}

impl Draft {
    /// Seed a draft from the committed selection.
    pub fn from_selection(selection: &LocalSelection) -> Self {
        Self {
            range: selection.range,
            start_input: clock::format_time_of_day(selection.start),
            end_input: clock::format_time_of_day(selection.end),
        }
    }

    /// Parse the staged values into a committed selection. Malformed times
    /// fall back to 00:00:00 / 23:59:59.
    pub fn finalize(self) -> LocalSelection {
        LocalSelection {
            range: self.range,
            start: clock::parse_start(&self.start_input),
            end: clock::parse_end(&self.end_input),
        }
    }
}

// =============================================================================
// Text inputs
// =============================================================================

#[derive(Debug)]
struct TextInput {
    text: String,
    debouncer: Debouncer<String>,
}

impl TextInput {
    fn new(text: Option<&str>, delay: Duration) -> Self {
        Self {
            text: text.unwrap_or_default().to_string(),
            debouncer: Debouncer::new(delay),
        }
    }
}

// =============================================================================
// Toolbar
// =============================================================================

/// The filter toolbar state machine.
pub struct FilterToolbar {
    filters: FilterState,
    selection: LocalSelection,
    draft: Option<Draft>,
    ip_input: TextInput,
    endpoint_input: TextInput,
    user_input: TextInput,
    zone: ZonePhase,
    has_initial: bool,
    options: ToolbarOptions,
    listener: FiltersListener,
    torn_down: bool,
}

impl std::fmt::Debug for FilterToolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterToolbar")
            .field("filters", &self.filters)
            .field("selection", &self.selection)
            .field("draft", &self.draft)
            .field("zone", &self.zone)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl FilterToolbar {
    /// Mount the toolbar.
    ///
    /// `initial` (e.g. a restored session) is used as-is when non-empty;
    /// otherwise the state starts as "today" in UTC until the zone is ready.
    /// Mounting does not notify the listener; `timezone_ready` does.
    pub fn new(
        initial: Option<FilterState>,
        options: ToolbarOptions,
        now: DateTime<Utc>,
        listener: FiltersListener,
    ) -> Self {
        let initial = initial.filter(|f| !f.is_empty());
        let has_initial = initial.is_some();
        let (filters, selection) = match initial {
            Some(f) => {
                let selection = expand_bounds(f.bounds(), Tz::UTC, now);
                (f, selection)
            }
            None => (
                default_filters(Tz::UTC, now),
                today_selection(Tz::UTC, now),
            ),
        };
        let delay = options.text_debounce;

        Self {
            ip_input: TextInput::new(filters.ip_address.as_deref(), delay),
            endpoint_input: TextInput::new(filters.endpoint.as_deref(), delay),
            user_input: TextInput::new(filters.user_uuid.as_deref(), delay),
            filters,
            selection,
            draft: None,
            zone: ZonePhase::Pending,
            has_initial,
            options,
            listener,
            torn_down: false,
        }
    }

    // ---- Zone lifecycle ----

    /// Second phase of zone resolution. Recomputes the default "today" range
    /// in `tz` (unless initial filters were supplied), re-expands the local
    /// view, and announces the state to the listener once.
    pub fn timezone_ready(&mut self, tz: Tz, now: DateTime<Utc>) {
        if self.torn_down {
            return;
        }
        self.zone = ZonePhase::Ready(tz);
        if self.has_initial {
            self.selection = expand_bounds(self.filters.bounds(), tz, now);
        } else {
            self.filters = default_filters(tz, now);
            self.selection = today_selection(tz, now);
        }
        if let Some(ref mut draft) = self.draft {
            *draft = Draft::from_selection(&self.selection);
        }
        tracing::info!(
            timezone = tz.name(),
            restored = self.has_initial,
            "Filter toolbar ready"
        );
        (self.listener)(&self.filters);
    }

    /// The zone conversions currently use (UTC until ready).
    pub fn zone(&self) -> Tz {
        match self.zone {
            ZonePhase::Ready(tz) => tz,
            ZonePhase::Pending => Tz::UTC,
        }
    }

    pub fn zone_phase(&self) -> ZonePhase {
        self.zone
    }

    // ---- Accessors ----

    /// The committed filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The committed local date/time view.
    pub fn selection(&self) -> &LocalSelection {
        &self.selection
    }

    /// Current (possibly uncommitted) text of a free-text field.
    pub fn text(&self, field: TextField) -> &str {
        &self.input(field).text
    }

    /// Whether a debounced commit is waiting for `field`.
    pub fn is_text_pending(&self, field: TextField) -> bool {
        self.input(field).debouncer.is_pending()
    }

    // ---- Immediate fields ----

    /// Select a method (`None` = all methods). Commits immediately.
    pub fn set_method(&mut self, method: Option<HttpMethod>) -> bool {
        let mut next = self.filters.clone();
        next.method = method;
        self.commit(next)
    }

    /// Select a status code (`None` = all). Commits immediately.
    pub fn set_status(&mut self, status: Option<String>) -> bool {
        let mut next = self.filters.clone();
        next.status = status.filter(|s| !s.is_empty());
        self.commit(next)
    }

    // ---- Debounced text fields ----

    /// Record a keystroke in a free-text field.
    ///
    /// Any pending commit for the field is cancelled. Non-empty text is
    /// rescheduled to commit after the quiet period; empty text commits the
    /// removal immediately. Returns true if a commit happened now.
    pub fn edit_text(&mut self, field: TextField, text: impl Into<String>, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let text = text.into();
        let input = self.input_mut(field);
        input.text.clone_from(&text);
        input.debouncer.cancel();

        if text.is_empty() {
            self.commit_text(field, None)
        } else {
            input.debouncer.schedule(text, now);
            false
        }
    }

    /// Explicit confirm (Enter): cancel the pending commit and commit the
    /// current text now.
    pub fn confirm_text(&mut self, field: TextField) -> bool {
        let input = self.input_mut(field);
        input.debouncer.cancel();
        let value = input.text.clone();
        self.commit_text(field, Some(value))
    }

    /// Fire any debounced commits whose quiet period has elapsed.
    /// Returns the number of commits made.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.torn_down {
            return 0;
        }
        let mut commits = 0;
        for &field in TextField::all() {
            let fired = self.input_mut(field).debouncer.poll(now);
            if let Some(value) = fired {
                if self.commit_text(field, Some(value)) {
                    commits += 1;
                }
            }
        }
        commits
    }

    /// Time until the next debounced commit is due, if any.
    pub fn next_due(&self, now: Instant) -> Option<Duration> {
        TextField::all()
            .iter()
            .filter_map(|&field| self.input(field).debouncer.time_until_due(now))
            .min()
    }

    // ---- Date popover ----

    /// Open the popover: stage a copy of the committed selection.
    pub fn open_popover(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(Draft::from_selection(&self.selection));
        }
    }

    pub fn is_popover_open(&self) -> bool {
        self.draft.is_some()
    }

    /// The staged edits, while the popover is open.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Stage a new date range. Never commits.
    pub fn stage_range(&mut self, range: DateRange) {
        if let Some(ref mut draft) = self.draft {
            draft.range = range;
        }
    }

    /// Stage a start time-of-day edit. Never commits.
    pub fn stage_start_time(&mut self, input: impl Into<String>) {
        if let Some(ref mut draft) = self.draft {
            draft.start_input = input.into();
        }
    }

    /// Stage an end time-of-day edit. Never commits.
    pub fn stage_end_time(&mut self, input: impl Into<String>) {
        if let Some(ref mut draft) = self.draft {
            draft.end_input = input.into();
        }
    }

    /// Apply: finalise the draft, commit its bounds and close the popover.
    pub fn apply(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => self.commit_selection(draft.finalize()),
            None => false,
        }
    }

    /// Close the popover. Staged changes are committed when
    /// `apply_on_close` is set, otherwise discarded.
    pub fn close_popover(&mut self) -> bool {
        let Some(draft) = self.draft.take() else {
            return false;
        };
        let selection = draft.finalize();
        if selection == self.selection {
            return false;
        }
        if self.options.apply_on_close {
            self.commit_selection(selection)
        } else {
            tracing::debug!("Popover closed without apply; staged range discarded");
            false
        }
    }

    /// Drop staged edits without committing.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    /// Commit a preset immediately, bypassing (and dropping) any draft.
    pub fn select_preset(&mut self, preset: Preset, now: DateTime<Utc>) -> bool {
        self.draft = None;
        let selection = preset.selection(now, self.zone());
        tracing::debug!(preset = preset.label(), "Preset selected");
        self.commit_selection(selection)
    }

    // ---- Reset / classification ----

    /// Reset everything to the default "today" state.
    pub fn clear(&mut self, now: DateTime<Utc>) -> bool {
        for &field in TextField::all() {
            let input = self.input_mut(field);
            input.debouncer.cancel();
            input.text.clear();
        }
        self.draft = None;
        let tz = self.zone();
        self.selection = today_selection(tz, now);
        self.commit(default_filters(tz, now))
    }

    /// The preset matching the committed local selection, for highlighting.
    pub fn active_preset(&self, now: DateTime<Utc>) -> Option<Preset> {
        match_preset(&self.selection, now, self.zone())
    }

    /// Whether the "Clear Filters" affordance should be shown.
    pub fn has_active_filters(&self, now: DateTime<Utc>) -> bool {
        is_non_default(&self.filters, self.zone(), now)
    }

    // ---- Teardown ----

    /// Cancel all deferred work. Later ticks and edits are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for &field in TextField::all() {
            self.input_mut(field).debouncer.cancel();
        }
        self.draft = None;
        self.torn_down = true;
        tracing::debug!("Filter toolbar torn down");
    }

    // ---- Internals ----

    fn input(&self, field: TextField) -> &TextInput {
        match field {
            TextField::IpAddress => &self.ip_input,
            TextField::Endpoint => &self.endpoint_input,
            TextField::UserUuid => &self.user_input,
        }
    }

    fn input_mut(&mut self, field: TextField) -> &mut TextInput {
        match field {
            TextField::IpAddress => &mut self.ip_input,
            TextField::Endpoint => &mut self.endpoint_input,
            TextField::UserUuid => &mut self.user_input,
        }
    }

    fn commit_text(&mut self, field: TextField, value: Option<String>) -> bool {
        let mut next = self.filters.clone();
        next.set_text(field, value);
        self.commit(next)
    }

    fn commit_selection(&mut self, selection: LocalSelection) -> bool {
        if self.torn_down {
            tracing::debug!("Selection commit after teardown ignored");
            return false;
        }
        let bounds = commit_bounds(&selection, self.zone());
        self.selection = selection;
        let mut next = self.filters.clone();
        next.set_bounds(bounds);
        self.commit(next)
    }

    /// Store `next` and notify the listener if it differs from the current
    /// state.
    fn commit(&mut self, next: FilterState) -> bool {
        if self.torn_down {
            tracing::debug!("Commit after teardown ignored");
            return false;
        }
        if next == self.filters {
            return false;
        }
        self.filters = next;
        tracing::debug!(
            method = ?self.filters.method,
            status = ?self.filters.status,
            start_time = ?self.filters.start_time,
            end_time = ?self.filters.end_time,
            "Filters committed"
        );
        (self.listener)(&self.filters);
        true
    }
}

impl Drop for FilterToolbar {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Commits = Rc<RefCell<Vec<FilterState>>>;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn toolbar(initial: Option<FilterState>, options: ToolbarOptions) -> (FilterToolbar, Commits) {
        let commits: Commits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&commits);
        let toolbar = FilterToolbar::new(
            initial,
            options,
            utc("2024-06-15T12:00:00Z"),
            Box::new(move |f: &FilterState| sink.borrow_mut().push(f.clone())),
        );
        (toolbar, commits)
    }

    #[test]
    fn test_mount_is_silent_and_ready_announces_once() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        assert!(commits.borrow().is_empty());
        assert_eq!(tb.zone(), Tz::UTC);

        let tz = chrono_tz::America::Denver;
        tb.timezone_ready(tz, now);
        assert_eq!(commits.borrow().len(), 1);
        assert_eq!(tb.filters(), &default_filters(tz, now));
        assert!(!tb.has_active_filters(now));
        assert_eq!(tb.active_preset(now), Some(Preset::Today));
    }

    #[test]
    fn test_initial_filters_survive_ready() {
        let now = utc("2024-06-15T12:00:00Z");
        let initial = FilterState {
            method: Some(HttpMethod::Post),
            endpoint: Some("/api".to_string()),
            start_time: Some(utc("2024-06-01T06:00:00Z").timestamp()),
            end_time: Some(utc("2024-06-02T05:59:59Z").timestamp()),
            ..Default::default()
        };
        let (mut tb, commits) = toolbar(Some(initial.clone()), ToolbarOptions::default());
        tb.timezone_ready(chrono_tz::America::Chicago, now);

        assert_eq!(tb.filters(), &initial);
        assert_eq!(commits.borrow().as_slice(), &[initial]);
        assert_eq!(tb.text(TextField::Endpoint), "/api");
        // 06:00Z is 01:00 CDT.
        assert_eq!(tb.selection().range.from, Some(date(2024, 6, 1)));
        assert_eq!(tb.selection().start, NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn test_staged_edits_do_not_commit() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        let before = tb.filters().clone();

        tb.open_popover();
        tb.stage_range(DateRange::between(date(2024, 6, 10), date(2024, 6, 12)));
        tb.stage_start_time("08:00:00");
        tb.stage_end_time("18:00:00");

        assert_eq!(tb.filters(), &before);
        assert_eq!(commits.borrow().len(), 1);
        assert!(tb.is_popover_open());
    }

    #[test]
    fn test_apply_commits_staged_range() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);

        tb.open_popover();
        tb.stage_range(DateRange::between(date(2024, 6, 10), date(2024, 6, 12)));
        tb.stage_start_time("08:00:00");
        assert!(tb.apply());

        assert!(!tb.is_popover_open());
        assert_eq!(commits.borrow().len(), 2);
        assert_eq!(
            tb.filters().start_time,
            Some(utc("2024-06-10T08:00:00Z").timestamp())
        );
        assert_eq!(
            tb.filters().end_time,
            Some(utc("2024-06-12T23:59:59Z").timestamp())
        );
        assert_eq!(tb.active_preset(now), None);
        assert!(tb.has_active_filters(now));
    }

    #[test]
    fn test_close_without_changes_does_not_commit() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        tb.open_popover();
        assert!(!tb.close_popover());
        assert_eq!(commits.borrow().len(), 1);
    }

    #[test]
    fn test_close_discards_when_apply_on_close_disabled() {
        let now = utc("2024-06-15T12:00:00Z");
        let options = ToolbarOptions {
            apply_on_close: false,
            ..Default::default()
        };
        let (mut tb, commits) = toolbar(None, options);
        tb.timezone_ready(Tz::UTC, now);
        tb.open_popover();
        tb.stage_range(DateRange::day(date(2024, 6, 1)));
        assert!(!tb.close_popover());
        assert_eq!(commits.borrow().len(), 1);
        assert_eq!(tb.active_preset(now), Some(Preset::Today));
    }

    #[test]
    fn test_malformed_staged_time_falls_back() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, _commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        tb.open_popover();
        tb.stage_range(DateRange::day(date(2024, 6, 14)));
        tb.stage_start_time("garbage");
        tb.stage_end_time("");
        tb.apply();
        assert_eq!(tb.active_preset(now), Some(Preset::Yesterday));
    }

    #[test]
    fn test_preset_bypasses_draft() {
        let now = utc("2024-06-15T12:00:00Z");
        let tz = chrono_tz::Europe::London;
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(tz, now);
        tb.open_popover();
        tb.stage_range(DateRange::day(date(2024, 1, 1)));

        assert!(tb.select_preset(Preset::Last3Days, now));
        assert!(!tb.is_popover_open());
        assert_eq!(commits.borrow().len(), 2);
        assert_eq!(tb.active_preset(now), Some(Preset::Last3Days));
        // 2024-06-13 00:00 BST is 23:00Z on the 12th.
        assert_eq!(
            tb.filters().start_time,
            Some(utc("2024-06-12T23:00:00Z").timestamp())
        );
    }

    #[test]
    fn test_method_and_status_commit_immediately() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);

        assert!(tb.set_method(Some(HttpMethod::Get)));
        assert!(tb.has_active_filters(now));
        assert!(!tb.set_method(Some(HttpMethod::Get)), "no-op commit");
        assert!(tb.set_status(Some("404".to_string())));
        assert!(tb.set_status(Some(String::new())));
        assert_eq!(tb.filters().status, None);
        assert_eq!(commits.borrow().len(), 4);
    }

    #[test]
    fn test_clear_resets_everything() {
        let now = utc("2024-06-15T12:00:00Z");
        let t0 = Instant::now();
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        tb.set_method(Some(HttpMethod::Put));
        tb.select_preset(Preset::Yesterday, now);
        tb.edit_text(TextField::IpAddress, "10.1.1.1", t0);

        assert!(tb.clear(now));
        assert!(!tb.has_active_filters(now));
        assert_eq!(tb.text(TextField::IpAddress), "");
        assert!(!tb.is_text_pending(TextField::IpAddress));
        assert_eq!(tb.tick(t0 + Duration::from_secs(5)), 0);
        assert_eq!(commits.borrow().last(), Some(&default_filters(Tz::UTC, now)));
    }

    #[test]
    fn test_teardown_cancels_pending_commit() {
        let now = utc("2024-06-15T12:00:00Z");
        let t0 = Instant::now();
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        tb.edit_text(TextField::Endpoint, "/api", t0);
        tb.teardown();
        assert_eq!(tb.tick(t0 + Duration::from_secs(1)), 0);
        assert_eq!(commits.borrow().len(), 1);
    }

    #[test]
    fn test_selection_frozen_after_teardown() {
        let now = utc("2024-06-15T12:00:00Z");
        let (mut tb, commits) = toolbar(None, ToolbarOptions::default());
        tb.timezone_ready(Tz::UTC, now);
        let before = *tb.selection();

        tb.open_popover();
        tb.stage_range(DateRange::day(date(2024, 6, 1)));
        tb.teardown();
        assert!(!tb.apply());
        assert!(!tb.select_preset(Preset::Yesterday, now));

        assert_eq!(tb.selection(), &before);
        assert_eq!(tb.active_preset(now), Some(Preset::Today));
        assert_eq!(commits.borrow().len(), 1);
    }
}
