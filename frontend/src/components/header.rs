use yew::prelude::*;
use shared::Role;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub role: Role,
    pub unread_count: usize,
    pub on_open_notifications: Callback<()>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_bell = {
        let on_open = props.on_open_notifications.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(()))
    };
    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"OIMS Admin Console"}</h1>
                <div class="header-right">
                    <span class="role-badge">{props.role.to_string()}</span>
                    {if props.role.can_view_notifications() {
                        html! {
                            <button class="notification-bell" onclick={on_bell} title="Notifications">
                                <i class="fas fa-bell"></i>
                                {if props.unread_count > 0 {
                                    html! {
                                        <span class="unread-badge">
                                            {if props.unread_count > 99 { "99+".to_string() } else { props.unread_count.to_string() }}
                                        </span>
                                    }
                                } else {
                                    html! {}
                                }}
                            </button>
                        }
                    } else {
                        html! {}
                    }}
                    <button class="btn btn-secondary" onclick={on_sign_out}>{"Sign out"}</button>
                </div>
            </div>
        </header>
    }
}
