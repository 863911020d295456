use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Backdrop + dialog shell; clicking the backdrop closes it
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{props.title.clone()}</h3>
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub is_open: bool,
    pub message: AttrValue,
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <Modal is_open={props.is_open} title="Please confirm" on_close={props.on_cancel.clone()}>
            <p>{props.message.clone()}</p>
            <div class="modal-buttons">
                <button class="btn btn-danger" onclick={on_confirm} disabled={props.busy}>
                    {if props.busy { "Working..." } else { "Confirm" }}
                </button>
                <button class="btn btn-secondary" onclick={on_cancel} disabled={props.busy}>{"Cancel"}</button>
            </div>
        </Modal>
    }
}
