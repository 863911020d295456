use yew::prelude::*;
use shared::{Branch, BranchForm, FieldErrors, FormInput, PaginationWindow};
use wasm_bindgen_futures::spawn_local;

use super::{bind, EditTarget};
use crate::components::form_field::FormField;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::hooks::use_records::{settle_save, use_branches, RecordsAction, SaveOutcome};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BranchesPageProps {
    pub api_client: ApiClient,
    pub page_size: usize,
}

#[function_component(BranchesPage)]
pub fn branches_page(props: &BranchesPageProps) -> Html {
    let branches = use_branches(&props.api_client);
    let toaster = use_toaster();

    let page = use_state(|| 1usize);
    let editing = use_state(|| Option::<EditTarget>::None);
    let form = use_state(BranchForm::default);
    let errors = use_state(FieldErrors::default);
    let submitting = use_state(|| false);
    let deleting = use_state(|| Option::<String>::None);
    let delete_busy = use_state(|| false);

    let window = PaginationWindow::new(1, props.page_size, branches.state.items.len()).go_to(*page);

    let open_new = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(BranchForm::default());
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::New));
        })
    };

    let open_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |branch: Branch| {
            form.set(BranchForm::from_branch(&branch));
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::Existing(branch.public_id)));
        })
    };

    let close_form = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_cancel_click = {
        let close_form = close_form.clone();
        Callback::from(move |_: MouseEvent| close_form.emit(()))
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let dispatcher = branches.dispatcher.clone();
        let refresh = branches.refresh.clone();
        let items = branches.state.items.clone();
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let submitting = submitting.clone();
        let toaster = toaster.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.validate() {
                Ok(request) => request,
                Err(field_errors) => {
                    errors.set(field_errors);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            submitting.set(true);

            let existing = (*editing)
                .as_ref()
                .and_then(|t| t.existing_id())
                .and_then(|id| items.iter().find(|b| b.public_id == id).cloned());
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let refresh = refresh.clone();
            let editing = editing.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                let result = match &existing {
                    Some(branch) => api_client.update_branch(&branch.public_id, &request).await,
                    None => api_client.create_branch(&request).await,
                };
                match settle_save(result, existing, |branch| branch.apply(&request)) {
                    SaveOutcome::Saved(branch) => {
                        toaster.success(format!("Saved branch {}", branch.name));
                        dispatcher.dispatch(RecordsAction::Upsert(branch));
                        editing.set(None);
                    }
                    SaveOutcome::SavedWithoutRecord => {
                        toaster.success("Branch saved");
                        refresh.emit(());
                        editing.set(None);
                    }
                    SaveOutcome::Failed(e) => {
                        Logger::error_with_component("branches", &format!("save failed: {}", e));
                        toaster.error(format!("Could not save branch: {}", e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let confirm_delete = {
        let api_client = props.api_client.clone();
        let dispatcher = branches.dispatcher.clone();
        let deleting = deleting.clone();
        let delete_busy = delete_busy.clone();
        let toaster = toaster.clone();

        Callback::from(move |_: ()| {
            let Some(public_id) = (*deleting).clone() else { return };
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let deleting = deleting.clone();
            let delete_busy = delete_busy.clone();
            let toaster = toaster.clone();

            delete_busy.set(true);
            spawn_local(async move {
                match api_client.delete_branch(&public_id).await {
                    Ok(()) => {
                        dispatcher.dispatch(RecordsAction::Remove(public_id));
                        toaster.success("Branch deleted");
                    }
                    Err(e) => {
                        Logger::error_with_component("branches", &format!("delete failed: {}", e));
                        toaster.error(format!("Could not delete branch: {}", e));
                    }
                }
                deleting.set(None);
                delete_busy.set(false);
            });
        })
    };

    let cancel_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_: ()| deleting.set(None))
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    html! {
        <section class="page branches-page">
            <div class="page-header">
                <h2>{"Branches"}</h2>
                <button class="btn btn-primary" onclick={open_new}>{"Add branch"}</button>
            </div>

            {if branches.state.loading && branches.state.items.is_empty() {
                html! { <div class="loading">{"Loading branches..."}</div> }
            } else if branches.state.items.is_empty() {
                html! { <div class="empty-state"><p>{"No branches registered"}</p></div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Name"}</th>
                                    <th>{"Location"}</th>
                                    <th>{"Contact"}</th>
                                    <th>{"Occupancy"}</th>
                                    <th>{"Supervisor"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for window.slice(&branches.state.items).iter().map(|branch| {
                                    let on_edit = {
                                        let open_edit = open_edit.clone();
                                        let branch = branch.clone();
                                        Callback::from(move |_: MouseEvent| open_edit.emit(branch.clone()))
                                    };
                                    let on_delete = {
                                        let deleting = deleting.clone();
                                        let id = branch.public_id.clone();
                                        Callback::from(move |_: MouseEvent| deleting.set(Some(id.clone())))
                                    };
                                    let contact = branch.phone.clone().or_else(|| branch.email.clone()).unwrap_or_default();
                                    html! {
                                        <tr key={branch.public_id.clone()} class={if branch.suspended { "row-muted" } else { "" }}>
                                            <td>{&branch.name}</td>
                                            <td>{&branch.location}</td>
                                            <td>{contact}</td>
                                            <td>
                                                <div class="progress-bar">
                                                    <div class="progress-fill" style={format!("width: {:.0}%", branch.occupancy_percent())}></div>
                                                </div>
                                                <span class="progress-caption">{format!("{} / {}", branch.occupancy, branch.capacity)}</span>
                                            </td>
                                            <td>{branch.supervisor_name.clone().unwrap_or_default()}</td>
                                            <td class="row-actions">
                                                <button class="btn btn-link" onclick={on_edit}>{"Edit"}</button>
                                                <button class="btn btn-link danger" onclick={on_delete}>{"Delete"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                        <Pagination {window} {on_page} />
                    </div>
                }
            }}

            <Modal
                is_open={editing.is_some()}
                title={if matches!(*editing, Some(EditTarget::Existing(_))) { "Edit branch" } else { "New branch" }}
                on_close={close_form.clone()}
            >
                <form class="record-form" onsubmit={on_submit}>
                    <FormField id="branch-name" label="Branch name" value={form.name.clone()}
                        on_change={bind(&form, |f, v| f.name = v)} error={errors.get("name")} disabled={*submitting} />
                    <FormField id="branch-location" label="Location" value={form.location.clone()}
                        on_change={bind(&form, |f, v| f.location = v)} error={errors.get("location")} disabled={*submitting} />
                    <FormField id="branch-phone" label="Phone" input_type="tel" value={form.phone.clone()}
                        on_change={bind(&form, |f, v| f.phone = v)} error={errors.get("phone")} disabled={*submitting} />
                    <FormField id="branch-email" label="Email" input_type="email" value={form.email.clone()}
                        on_change={bind(&form, |f, v| f.email = v)} error={errors.get("email")} disabled={*submitting} />
                    <FormField id="branch-capacity" label="Capacity" input_type="number" value={form.capacity.clone()}
                        on_change={bind(&form, |f, v| f.capacity = v)} error={errors.get("capacity")} disabled={*submitting} />
                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*submitting}>
                            {if *submitting { "Saving..." } else { "Save" }}
                        </button>
                        <button type="button" class="btn btn-secondary" disabled={*submitting} onclick={on_cancel_click}>
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </Modal>

            <ConfirmDialog
                is_open={deleting.is_some()}
                message="Delete this branch? Staff and inventory assigned to it must be moved first."
                busy={*delete_busy}
                on_confirm={confirm_delete}
                on_cancel={cancel_delete}
            />
        </section>
    }
}
