//! List state for the CRUD sections.
//!
//! Each section loads its records once on mount. After a successful create,
//! update or delete the page dispatches [`RecordsAction::Upsert`] or
//! [`RecordsAction::Remove`] with the affected id instead of re-fetching.

use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;
use shared::{
    remove_by_id, upsert_by_id, Branch, FundraiserCampaign, Identified, InventoryItem,
    OrphanageCentre, StaffMember,
};
use wasm_bindgen_futures::spawn_local;

use crate::hooks::use_toasts::{use_toaster, Toaster};
use crate::services::api::{ApiClient, ApiError};
use crate::services::logging::Logger;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordsState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for RecordsState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

pub enum RecordsAction<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
    Upsert(T),
    Remove(String),
}

impl<T: Identified + Clone + 'static> Reducible for RecordsState<T> {
    type Action = RecordsAction<T>;

    fn reduce(self: Rc<Self>, action: RecordsAction<T>) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RecordsAction::Loading => {
                next.loading = true;
                next.error = None;
            }
            RecordsAction::Loaded(items) => {
                next.items = items;
                next.loading = false;
            }
            RecordsAction::Failed(message) => {
                // keep whatever was shown before
                next.loading = false;
                next.error = Some(message);
            }
            RecordsAction::Upsert(record) => upsert_by_id(&mut next.items, record),
            RecordsAction::Remove(public_id) => {
                remove_by_id(&mut next.items, &public_id);
            }
        }
        Rc::new(next)
    }
}

/// Result of a create or update round-trip
#[derive(Debug)]
pub enum SaveOutcome<T> {
    Saved(T),
    /// The server accepted the write but answered with something other than
    /// the record, so the new id is unknown; reload the list
    SavedWithoutRecord,
    Failed(ApiError),
}

/// Classify a save response. A body that is not a record still means the
/// write went through: on update the held record is patched locally with
/// `apply`, on create the caller has to re-fetch.
pub fn settle_save<T>(
    result: Result<T, ApiError>,
    existing: Option<T>,
    apply: impl FnOnce(&mut T),
) -> SaveOutcome<T> {
    match (result, existing) {
        (Ok(record), _) => SaveOutcome::Saved(record),
        (Err(ApiError::Decode(_)), Some(mut record)) => {
            apply(&mut record);
            SaveOutcome::Saved(record)
        }
        (Err(ApiError::Decode(_)), None) => SaveOutcome::SavedWithoutRecord,
        (Err(e), _) => SaveOutcome::Failed(e),
    }
}

pub struct UseRecordsResult<T: Identified + Clone + 'static> {
    pub state: RecordsState<T>,
    pub dispatcher: UseReducerDispatcher<RecordsState<T>>,
    pub refresh: Callback<()>,
}

fn spawn_load<T, F>(
    dispatcher: UseReducerDispatcher<RecordsState<T>>,
    toaster: Toaster,
    what: &'static str,
    fetch: F,
) where
    T: Identified + Clone + 'static,
    F: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    dispatcher.dispatch(RecordsAction::Loading);
    spawn_local(async move {
        match fetch.await {
            Ok(items) => {
                Logger::debug_with_component(what, &format!("loaded {} records", items.len()));
                dispatcher.dispatch(RecordsAction::Loaded(items));
            }
            Err(e) => {
                Logger::error_with_component(what, &format!("load failed: {}", e));
                toaster.error(format!("Could not load {}: {}", what, e));
                dispatcher.dispatch(RecordsAction::Failed(e.to_string()));
            }
        }
    });
}

#[hook]
fn use_load_on_mount(refresh: Callback<()>) {
    use_effect_with((), move |_| {
        refresh.emit(());
        || ()
    });
}

#[hook]
pub fn use_staff(api_client: &ApiClient) -> UseRecordsResult<StaffMember> {
    let records = use_reducer(RecordsState::<StaffMember>::default);
    let toaster = use_toaster();
    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = records.dispatcher();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            spawn_load(dispatcher.clone(), toaster.clone(), "staff", async move {
                api_client.get_staff().await
            });
        })
    };
    use_load_on_mount(refresh.clone());

    UseRecordsResult {
        state: (*records).clone(),
        dispatcher: records.dispatcher(),
        refresh,
    }
}

#[hook]
pub fn use_branches(api_client: &ApiClient) -> UseRecordsResult<Branch> {
    let records = use_reducer(RecordsState::<Branch>::default);
    let toaster = use_toaster();
    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = records.dispatcher();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            spawn_load(dispatcher.clone(), toaster.clone(), "branches", async move {
                api_client.get_branches().await
            });
        })
    };
    use_load_on_mount(refresh.clone());

    UseRecordsResult {
        state: (*records).clone(),
        dispatcher: records.dispatcher(),
        refresh,
    }
}

/// Inventory, narrowed to one branch for supervisors
#[hook]
pub fn use_inventory(api_client: &ApiClient, branch_id: Option<String>) -> UseRecordsResult<InventoryItem> {
    let records = use_reducer(RecordsState::<InventoryItem>::default);
    let toaster = use_toaster();
    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = records.dispatcher();
        use_callback(branch_id, move |_, branch_id| {
            let api_client = api_client.clone();
            let branch_id = branch_id.clone();
            spawn_load(dispatcher.clone(), toaster.clone(), "inventory", async move {
                api_client.get_inventory(branch_id.as_deref()).await
            });
        })
    };
    use_load_on_mount(refresh.clone());

    UseRecordsResult {
        state: (*records).clone(),
        dispatcher: records.dispatcher(),
        refresh,
    }
}

#[hook]
pub fn use_fundraisers(api_client: &ApiClient) -> UseRecordsResult<FundraiserCampaign> {
    let records = use_reducer(RecordsState::<FundraiserCampaign>::default);
    let toaster = use_toaster();
    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = records.dispatcher();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            spawn_load(dispatcher.clone(), toaster.clone(), "fundraisers", async move {
                api_client.get_fundraisers().await
            });
        })
    };
    use_load_on_mount(refresh.clone());

    UseRecordsResult {
        state: (*records).clone(),
        dispatcher: records.dispatcher(),
        refresh,
    }
}

#[hook]
pub fn use_centres(api_client: &ApiClient) -> UseRecordsResult<OrphanageCentre> {
    let records = use_reducer(RecordsState::<OrphanageCentre>::default);
    let toaster = use_toaster();
    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = records.dispatcher();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            spawn_load(dispatcher.clone(), toaster.clone(), "centres", async move {
                api_client.get_centres().await
            });
        })
    };
    use_load_on_mount(refresh.clone());

    UseRecordsResult {
        state: (*records).clone(),
        dispatcher: records.dispatcher(),
        refresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        label: &'static str,
    }

    impl Identified for Row {
        fn public_id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, label: &'static str) -> Row {
        Row { id: id.to_string(), label }
    }

    #[wasm_bindgen_test]
    fn test_upsert_replaces_in_place() {
        let state = Rc::new(RecordsState::<Row>::default());
        let state = state.reduce(RecordsAction::Loaded(vec![row("a", "one"), row("b", "two")]));
        let state = state.reduce(RecordsAction::Upsert(row("a", "uno")));
        assert_eq!(state.items, vec![row("a", "uno"), row("b", "two")]);

        let state = state.reduce(RecordsAction::Upsert(row("c", "three")));
        assert_eq!(state.items.len(), 3);
    }

    #[wasm_bindgen_test]
    fn test_remove_and_failure_keep_list() {
        let state = Rc::new(RecordsState::<Row>::default());
        let state = state.reduce(RecordsAction::Loaded(vec![row("a", "one"), row("b", "two")]));
        let state = state.reduce(RecordsAction::Remove("a".into()));
        assert_eq!(state.items, vec![row("b", "two")]);

        let state = state.reduce(RecordsAction::Failed("HTTP 500".into()));
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
    }

    #[wasm_bindgen_test]
    fn test_create_without_record_body_is_still_saved() {
        let outcome = settle_save::<Row>(Err(ApiError::Decode("expected struct".into())), None, |_| {});
        assert!(matches!(outcome, SaveOutcome::SavedWithoutRecord));
    }

    #[wasm_bindgen_test]
    fn test_update_without_record_body_patches_held_row() {
        let outcome = settle_save(
            Err(ApiError::Decode("expected struct".into())),
            Some(row("a", "one")),
            |r: &mut Row| r.label = "uno",
        );
        match outcome {
            SaveOutcome::Saved(saved) => assert_eq!(saved, row("a", "uno")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[wasm_bindgen_test]
    fn test_save_results_pass_through() {
        let outcome = settle_save(Ok(row("n", "new")), None, |_: &mut Row| {});
        assert!(matches!(outcome, SaveOutcome::Saved(r) if r.id == "n"));

        let failed = settle_save::<Row>(
            Err(ApiError::Http { status: 409, message: "duplicate email".into() }),
            None,
            |_| {},
        );
        assert!(matches!(failed, SaveOutcome::Failed(ApiError::Http { status: 409, .. })));
    }
}
