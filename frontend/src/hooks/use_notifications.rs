use std::rc::Rc;
use yew::prelude::*;
use shared::{Notification, NotificationInbox, PaginationWindow};
use wasm_bindgen_futures::spawn_local;

use crate::hooks::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationState {
    pub inbox: NotificationInbox,
    pub current_page: usize,
    pub page_size: usize,
    pub loading: bool,
    /// Notification whose read PATCH is in flight
    pub marking_as_read: Option<String>,
    pub marking_all: bool,
}

impl NotificationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            inbox: NotificationInbox::default(),
            current_page: 1,
            page_size: page_size.max(1),
            loading: true,
            marking_as_read: None,
            marking_all: false,
        }
    }

    pub fn window(&self) -> PaginationWindow {
        self.inbox.window(self.current_page, self.page_size)
    }

    pub fn visible(&self) -> &[Notification] {
        self.inbox.page(&self.window())
    }

    pub fn unread_count(&self) -> usize {
        self.inbox.unread_count()
    }
}

pub enum NotificationAction {
    Loading,
    Loaded(Vec<Notification>),
    LoadFailed,
    BeginMark(String),
    FinishMark(String),
    BeginMarkAll,
    FinishMarkAll,
    GoToPage(usize),
}

impl Reducible for NotificationState {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: NotificationAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NotificationAction::Loading => next.loading = true,
            NotificationAction::Loaded(list) => {
                next.inbox.replace(list);
                next.loading = false;
                // keep the cursor valid when the list shrank
                next.current_page = next.window().go_to(next.current_page).current_page;
            }
            NotificationAction::LoadFailed => next.loading = false,
            NotificationAction::BeginMark(id) => {
                next.inbox.mark_as_read(&id);
                next.marking_as_read = Some(id);
            }
            NotificationAction::FinishMark(id) => {
                if next.marking_as_read.as_deref() == Some(id.as_str()) {
                    next.marking_as_read = None;
                }
            }
            NotificationAction::BeginMarkAll => {
                next.inbox.mark_all_as_read();
                next.marking_all = true;
            }
            NotificationAction::FinishMarkAll => next.marking_all = false,
            NotificationAction::GoToPage(page) => {
                next.current_page = next.window().go_to(page).current_page;
            }
        }
        Rc::new(next)
    }
}

pub struct UseNotificationsResult {
    pub state: NotificationState,
    pub actions: UseNotificationsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseNotificationsActions {
    pub refresh: Callback<()>,
    pub mark_as_read: Callback<String>,
    pub mark_all_as_read: Callback<()>,
    pub go_to_page: Callback<usize>,
}

/// Notification inbox for the caller's branch scope: loads on mount, re-fetches on a fixed interval, and
/// marks items read optimistically. A failed PATCH is reported but the local
/// flag stays flipped; the next poll brings back the server's view.
#[hook]
pub fn use_notifications(
    api_client: &ApiClient,
    enabled: bool,
    branch_id: Option<String>,
    page_size: usize,
    refresh_interval_ms: u32,
) -> UseNotificationsResult {
    let state = use_reducer(move || NotificationState::new(page_size));
    let toaster = use_toaster();

    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        let toaster = toaster.clone();

        use_callback(branch_id, move |_, branch_id| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let toaster = toaster.clone();
            let branch_id = branch_id.clone();

            spawn_local(async move {
                dispatcher.dispatch(NotificationAction::Loading);
                match api_client.get_notifications(branch_id.as_deref()).await {
                    Ok(list) => {
                        Logger::debug_with_component(
                            "notifications",
                            &format!("fetched {} notifications", list.len()),
                        );
                        dispatcher.dispatch(NotificationAction::Loaded(list));
                    }
                    Err(e) => {
                        Logger::error_with_component("notifications", &format!("fetch failed: {}", e));
                        toaster.error(format!("Could not load notifications: {}", e));
                        dispatcher.dispatch(NotificationAction::LoadFailed);
                    }
                }
            });
        })
    };

    let mark_as_read = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        let toaster = toaster.clone();
        let marking = state.marking_as_read.clone();

        use_callback(marking, move |public_id: String, marking| {
            if marking.as_deref() == Some(public_id.as_str()) {
                return;
            }
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let toaster = toaster.clone();

            dispatcher.dispatch(NotificationAction::BeginMark(public_id.clone()));
            spawn_local(async move {
                if let Err(e) = api_client.mark_notification_read(&public_id).await {
                    Logger::warn_with_component(
                        "notifications",
                        &format!("mark {} as read failed: {}", public_id, e),
                    );
                    toaster.error(format!("Could not mark notification as read: {}", e));
                }
                dispatcher.dispatch(NotificationAction::FinishMark(public_id));
            });
        })
    };

    let mark_all_as_read = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();
        let toaster = toaster.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let toaster = toaster.clone();

            dispatcher.dispatch(NotificationAction::BeginMarkAll);
            spawn_local(async move {
                match api_client.mark_all_notifications_read().await {
                    Ok(()) => toaster.success("All notifications marked as read"),
                    Err(e) => {
                        Logger::warn_with_component("notifications", &format!("mark all failed: {}", e));
                        toaster.error(format!("Could not mark all as read: {}", e));
                    }
                }
                dispatcher.dispatch(NotificationAction::FinishMarkAll);
            });
        })
    };

    let go_to_page = {
        let dispatcher = state.dispatcher();
        use_callback((), move |page: usize, _| {
            dispatcher.dispatch(NotificationAction::GoToPage(page));
        })
    };

    {
        let refresh = refresh.clone();
        let dispatcher = state.dispatcher();
        use_effect_with(enabled, move |enabled| {
            if *enabled {
                refresh.emit(());
            } else {
                dispatcher.dispatch(NotificationAction::LoadFailed);
            }
            || ()
        });
    }

    use_periodic_refresh(
        PeriodicRefreshConfig::every(refresh_interval_ms),
        refresh.clone(),
        !enabled,
    );

    UseNotificationsResult {
        state: (*state).clone(),
        actions: UseNotificationsActions {
            refresh,
            mark_as_read,
            mark_all_as_read,
            go_to_page,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NotificationType;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            public_id: id.to_string(),
            message: format!("message {}", id),
            created_date: "2025-03-01T10:00:00".to_string(),
            notification_type: NotificationType::System,
            is_read: read,
        }
    }

    #[wasm_bindgen_test]
    fn test_mark_sets_in_flight_id() {
        let state = Rc::new(NotificationState::new(5));
        let state = state.reduce(NotificationAction::Loaded(vec![notification("a", false), notification("b", false)]));
        let state = state.reduce(NotificationAction::BeginMark("a".into()));
        assert_eq!(state.marking_as_read.as_deref(), Some("a"));
        assert_eq!(state.unread_count(), 1);

        // a stale finish for another id leaves the marker alone
        let state = state.reduce(NotificationAction::FinishMark("b".into()));
        assert_eq!(state.marking_as_read.as_deref(), Some("a"));
        let state = state.reduce(NotificationAction::FinishMark("a".into()));
        assert_eq!(state.marking_as_read, None);
    }

    #[wasm_bindgen_test]
    fn test_page_clamped_after_reload() {
        let state = Rc::new(NotificationState::new(5));
        let twelve = (0..12).map(|i| notification(&i.to_string(), false)).collect();
        let state = state.reduce(NotificationAction::Loaded(twelve));
        let state = state.reduce(NotificationAction::GoToPage(3));
        assert_eq!(state.current_page, 3);
        assert_eq!(state.visible().len(), 2);

        let state = state.reduce(NotificationAction::Loaded(vec![notification("x", true)]));
        assert_eq!(state.current_page, 1);
        assert_eq!(state.visible().len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_mark_all_clears_unread() {
        let state = Rc::new(NotificationState::new(5));
        let state = state.reduce(NotificationAction::Loaded(vec![notification("a", false), notification("b", true)]));
        let state = state.reduce(NotificationAction::BeginMarkAll);
        assert!(state.marking_all);
        assert_eq!(state.unread_count(), 0);
    }
}
