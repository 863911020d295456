use yew::prelude::*;
use gloo::timers::callback::Timeout;

use crate::hooks::use_toasts::{Toast, ToastAction, ToastState};

const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub state: UseReducerHandle<ToastState>,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    let on_dismiss = {
        let dispatcher = props.state.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class="toast-host">
            {for props.state.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_LIFETIME_MS, move || on_dismiss.emit(id));
            // dropping the timeout cancels it
            move || drop(timeout)
        });
    }

    let onclick = {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={props.toast.kind.css_class()} {onclick}>
            {&props.toast.message}
        </div>
    }
}
