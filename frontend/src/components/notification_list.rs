use yew::prelude::*;
use shared::format::{format_timestamp, relative_time};
use shared::Notification;

#[derive(Properties, PartialEq)]
pub struct NotificationListProps {
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub marking_as_read: Option<String>,
    pub on_mark_read: Callback<String>,
}

fn now() -> Option<chrono::NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(js_sys::Date::now() as i64).map(|dt| dt.naive_utc())
}

#[function_component(NotificationList)]
pub fn notification_list(props: &NotificationListProps) -> Html {
    if props.loading && props.notifications.is_empty() {
        return html! { <div class="loading">{"Loading notifications..."}</div> };
    }
    if props.notifications.is_empty() {
        return html! {
            <div class="empty-state">
                <i class="fas fa-bell-slash"></i>
                <p>{"No notifications yet"}</p>
            </div>
        };
    }

    let now = now();

    html! {
        <ul class="notification-list">
            {for props.notifications.iter().map(|notification| {
                let is_marking = props.marking_as_read.as_deref() == Some(notification.public_id.as_str());
                let item_class = if notification.is_read { "notification-item read" } else { "notification-item unread" };
                let when = match now {
                    Some(now) => relative_time(&notification.created_date, now),
                    None => format_timestamp(&notification.created_date),
                };
                let onclick = {
                    let id = notification.public_id.clone();
                    let on_mark_read = props.on_mark_read.clone();
                    Callback::from(move |_: MouseEvent| on_mark_read.emit(id.clone()))
                };

                html! {
                    <li class={item_class} key={notification.public_id.clone()}>
                        <span class={classes!("notification-type", notification.notification_type.css_class())}>
                            {notification.notification_type.to_string()}
                        </span>
                        <div class="notification-body">
                            <p class="notification-message">{&notification.message}</p>
                            <span class="notification-time" title={format_timestamp(&notification.created_date)}>{when}</span>
                        </div>
                        {if notification.is_read {
                            html! { <span class="notification-read-mark">{"Read"}</span> }
                        } else {
                            html! {
                                <button class="btn btn-link" {onclick} disabled={is_marking}>
                                    {if is_marking { "Marking..." } else { "Mark as read" }}
                                </button>
                            }
                        }}
                    </li>
                }
            })}
        </ul>
    }
}
