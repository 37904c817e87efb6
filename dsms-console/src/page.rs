//! CRUD page state machine
//!
//! The repeated shape behind every resource page: a collection with
//! filters, a load lifecycle guarded by a fetch generation counter, and
//! a dialog/draft mutation lifecycle. Responses from superseded fetches
//! are discarded instead of overwriting newer state; a failed load
//! keeps the previous collection visible.

/// Page-local list + dialog state for one resource
#[derive(Debug)]
pub struct PageState<T> {
    pub collection: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<T>,
    pub dialog_open: bool,
    pub saving: bool,
    generation: u64,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PageState<T> {
    pub fn new() -> Self {
        Self {
            collection: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            dialog_open: false,
            saving: false,
            generation: 0,
        }
    }

    /// Start a fetch; the returned generation must be passed back to
    /// [`PageState::finish_load`]
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a fetch result. Returns false when the response belongs to
    /// a superseded fetch and was discarded. On failure the previous
    /// collection stays visible (stale-but-visible, never blanked).
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<T>, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Stale fetch discarded");
            return false;
        }
        self.loading = false;
        match result {
            Ok(collection) => {
                self.collection = collection;
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    /// Open the create/edit dialog; `selected = None` means create
    pub fn open_dialog(&mut self, selected: Option<T>) {
        self.selected = selected;
        self.dialog_open = true;
        self.error = None;
    }

    pub fn close_dialog(&mut self) {
        self.selected = None;
        self.dialog_open = false;
        self.saving = false;
    }

    /// Disable the submit control while a mutation is in flight
    pub fn begin_save(&mut self) {
        self.saving = true;
        self.error = None;
    }

    /// Apply a mutation result. Success closes the dialog and clears the
    /// selection (the caller reloads the collection); failure keeps the
    /// dialog open with the error inline so user input stays intact.
    /// Returns true on success.
    pub fn finish_save(&mut self, result: Result<(), String>) -> bool {
        self.saving = false;
        match result {
            Ok(()) => {
                self.close_dialog();
                self.error = None;
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}

/// Case-insensitive substring match used for client-side filtering of
/// fields the backend does not filter on
pub fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut state: PageState<i32> = PageState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        // the older response resolves last-minus-one and must not win
        assert!(!state.finish_load(first, Ok(vec![1])));
        assert!(state.collection.is_empty());
        assert!(state.loading);

        assert!(state.finish_load(second, Ok(vec![2, 3])));
        assert_eq!(state.collection, [2, 3]);
        assert!(!state.loading);
    }

    #[test]
    fn test_out_of_order_resolution_keeps_latest() {
        let mut state: PageState<i32> = PageState::new();
        let first = state.begin_load();
        let second = state.begin_load();

        // latest resolves first, then the superseded one trails in
        assert!(state.finish_load(second, Ok(vec![9])));
        assert!(!state.finish_load(first, Ok(vec![1])));
        assert_eq!(state.collection, [9]);
    }

    #[test]
    fn test_failed_load_keeps_previous_collection() {
        let mut state: PageState<i32> = PageState::new();
        let generation = state.begin_load();
        state.finish_load(generation, Ok(vec![1, 2]));

        let generation = state.begin_load();
        state.finish_load(generation, Err("server unavailable".to_string()));
        assert_eq!(state.collection, [1, 2]);
        assert_eq!(state.error.as_deref(), Some("server unavailable"));
        assert!(!state.loading);
    }

    #[test]
    fn test_save_lifecycle() {
        let mut state: PageState<i32> = PageState::new();
        state.open_dialog(Some(7));
        assert!(state.dialog_open);

        state.begin_save();
        assert!(state.saving);

        // failure keeps the dialog open with the error inline
        assert!(!state.finish_save(Err("name taken".to_string())));
        assert!(state.dialog_open);
        assert_eq!(state.selected, Some(7));
        assert_eq!(state.error.as_deref(), Some("name taken"));

        // success closes and clears
        state.begin_save();
        assert!(state.finish_save(Ok(())));
        assert!(!state.dialog_open);
        assert!(state.selected.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("bolt", &["Hex Bolts", "HB-01"]));
        assert!(matches_search("hb-0", &["Hex Bolts", "HB-01"]));
        assert!(!matches_search("washer", &["Hex Bolts", "HB-01"]));
    }
}
