use yew::prelude::*;

use crate::components::notification_list::NotificationList;
use crate::components::pagination::Pagination;
use crate::hooks::use_notifications::{NotificationState, UseNotificationsActions};

/// The inbox state lives in the app shell so the header badge and this page
/// agree on the unread count.
#[derive(Properties, PartialEq)]
pub struct NotificationsPageProps {
    pub state: NotificationState,
    pub actions: UseNotificationsActions,
}

#[function_component(NotificationsPage)]
pub fn notifications_page(props: &NotificationsPageProps) -> Html {
    let state = &props.state;
    let unread = state.unread_count();

    let on_mark_all = {
        let mark_all = props.actions.mark_all_as_read.clone();
        Callback::from(move |_: MouseEvent| mark_all.emit(()))
    };

    let on_refresh = {
        let refresh = props.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    html! {
        <section class="page notifications-page">
            <div class="page-header">
                <h2>{"Notifications"}</h2>
                <span class="page-header-note">
                    {if unread == 0 { "All caught up".to_string() } else { format!("{} unread", unread) }}
                </span>
                <button class="btn btn-secondary" onclick={on_refresh} disabled={state.loading}>
                    {if state.loading { "Refreshing..." } else { "Refresh" }}
                </button>
                <button class="btn btn-primary" onclick={on_mark_all} disabled={unread == 0 || state.marking_all}>
                    {if state.marking_all { "Marking..." } else { "Mark all as read" }}
                </button>
            </div>

            <NotificationList
                notifications={state.visible().to_vec()}
                loading={state.loading}
                marking_as_read={state.marking_as_read.clone()}
                on_mark_read={props.actions.mark_as_read.clone()}
            />

            {if state.inbox.is_empty() {
                html! {}
            } else {
                html! { <Pagination window={state.window()} on_page={props.actions.go_to_page.clone()} /> }
            }}
        </section>
    }
}
