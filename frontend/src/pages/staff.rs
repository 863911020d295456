use yew::prelude::*;
use shared::models::staff::STAFF_ROLES;
use shared::{FieldErrors, FormInput, PaginationWindow, StaffForm, StaffMember};
use wasm_bindgen_futures::spawn_local;

use super::{bind, key_options, EditTarget};
use crate::components::form_field::FormField;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::hooks::use_records::{settle_save, use_branches, use_staff, RecordsAction, SaveOutcome};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct StaffPageProps {
    pub api_client: ApiClient,
    pub page_size: usize,
}

#[function_component(StaffPage)]
pub fn staff_page(props: &StaffPageProps) -> Html {
    let staff = use_staff(&props.api_client);
    let branches = use_branches(&props.api_client);
    let toaster = use_toaster();

    let page = use_state(|| 1usize);
    let editing = use_state(|| Option::<EditTarget>::None);
    let form = use_state(StaffForm::default);
    let errors = use_state(FieldErrors::default);
    let submitting = use_state(|| false);
    let deleting = use_state(|| Option::<String>::None);
    let busy_id = use_state(|| Option::<String>::None);

    let window = PaginationWindow::new(1, props.page_size, staff.state.items.len()).go_to(*page);

    let open_new = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(StaffForm::default());
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::New));
        })
    };

    let open_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |member: StaffMember| {
            form.set(StaffForm::from_member(&member));
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::Existing(member.public_id)));
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
        let dispatcher = staff.dispatcher.clone();
        let refresh = staff.refresh.clone();
        let items = staff.state.items.clone();
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

            let target = (*editing).clone();
            let existing = target
                .as_ref()
                .and_then(|t| t.existing_id())
                .and_then(|id| items.iter().find(|m| m.public_id == id).cloned());
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let refresh = refresh.clone();
            let editing = editing.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                let result = match &existing {
                    Some(member) => api_client.update_staff(&member.public_id, &request).await,
                    None => api_client.create_staff(&request).await,
                };
                match settle_save(result, existing, |member| member.apply(&request)) {
                    SaveOutcome::Saved(member) => {
                        toaster.success(format!("Saved {}", member.full_name()));
                        dispatcher.dispatch(RecordsAction::Upsert(member));
                        editing.set(None);
                    }
                    SaveOutcome::SavedWithoutRecord => {
                        toaster.success("Staff member saved");
                        refresh.emit(());
                        editing.set(None);
                    }
                    SaveOutcome::Failed(e) => {
                        Logger::error_with_component("staff", &format!("save failed: {}", e));
                        toaster.error(format!("Could not save staff member: {}", e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let toggle_suspended = {
        let api_client = props.api_client.clone();
        let dispatcher = staff.dispatcher.clone();
        let busy_id = busy_id.clone();
        let toaster = toaster.clone();

        Callback::from(move |member: StaffMember| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let busy_id = busy_id.clone();
            let toaster = toaster.clone();

            busy_id.set(Some(member.public_id.clone()));
            spawn_local(async move {
                let suspend = !member.suspended;
                match api_client.set_staff_suspended(&member.public_id, suspend).await {
                    Ok(()) => {
                        let mut updated = member;
                        updated.suspended = suspend;
                        toaster.success(format!(
                            "{} {}",
                            updated.full_name(),
                            if suspend { "suspended" } else { "reinstated" }
                        ));
                        dispatcher.dispatch(RecordsAction::Upsert(updated));
                    }
                    Err(e) => {
                        Logger::error_with_component("staff", &format!("status change failed: {}", e));
                        toaster.error(format!("Could not change account status: {}", e));
                    }
                }
                busy_id.set(None);
            });
        })
    };

    let confirm_delete = {
        let api_client = props.api_client.clone();
        let dispatcher = staff.dispatcher.clone();
        let deleting = deleting.clone();
        let busy_id = busy_id.clone();
        let toaster = toaster.clone();

        Callback::from(move |_: ()| {
            let Some(public_id) = (*deleting).clone() else { return };
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let deleting = deleting.clone();
            let busy_id = busy_id.clone();
            let toaster = toaster.clone();

            busy_id.set(Some(public_id.clone()));
            spawn_local(async move {
                match api_client.delete_staff(&public_id).await {
                    Ok(()) => {
                        dispatcher.dispatch(RecordsAction::Remove(public_id));
                        toaster.success("Staff member removed");
                    }
                    Err(e) => {
                        Logger::error_with_component("staff", &format!("delete failed: {}", e));
                        toaster.error(format!("Could not remove staff member: {}", e));
                    }
                }
                deleting.set(None);
                busy_id.set(None);
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

    let branch_options: Vec<(AttrValue, AttrValue)> = branches
        .state
        .items
        .iter()
        .map(|b| (AttrValue::from(b.public_id.clone()), AttrValue::from(b.name.clone())))
        .collect();

    html! {
        <section class="page staff-page">
            <div class="page-header">
                <h2>{"Staff"}</h2>
                <button class="btn btn-primary" onclick={open_new}>{"Add staff member"}</button>
            </div>

            {if staff.state.loading && staff.state.items.is_empty() {
                html! { <div class="loading">{"Loading staff..."}</div> }
            } else if staff.state.items.is_empty() {
                html! { <div class="empty-state"><p>{"No staff accounts yet"}</p></div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Name"}</th>
                                    <th>{"Email"}</th>
                                    <th>{"Role"}</th>
                                    <th>{"Branch"}</th>
                                    <th>{"Status"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for window.slice(&staff.state.items).iter().map(|member| {
                                    let busy = busy_id.as_deref() == Some(member.public_id.as_str());
                                    let on_edit = {
                                        let open_edit = open_edit.clone();
                                        let member = member.clone();
                                        Callback::from(move |_: MouseEvent| open_edit.emit(member.clone()))
                                    };
                                    let on_toggle = {
                                        let toggle = toggle_suspended.clone();
                                        let member = member.clone();
                                        Callback::from(move |_: MouseEvent| toggle.emit(member.clone()))
                                    };
                                    let on_delete = {
                                        let deleting = deleting.clone();
                                        let id = member.public_id.clone();
                                        Callback::from(move |_: MouseEvent| deleting.set(Some(id.clone())))
                                    };
                                    html! {
                                        <tr key={member.public_id.clone()}>
                                            <td>{member.full_name()}</td>
                                            <td>{&member.email}</td>
                                            <td>{member.role_label()}</td>
                                            <td>{member.branch_name.clone().unwrap_or_else(|| "—".to_string())}</td>
                                            <td>
                                                <span class={if member.suspended { "badge badge-danger" } else { "badge badge-success" }}>
                                                    {member.status_label()}
                                                </span>
                                            </td>
                                            <td class="row-actions">
                                                <button class="btn btn-link" onclick={on_edit} disabled={busy}>{"Edit"}</button>
                                                <button class="btn btn-link" onclick={on_toggle} disabled={busy}>
                                                    {if member.suspended { "Reinstate" } else { "Suspend" }}
                                                </button>
                                                <button class="btn btn-link danger" onclick={on_delete} disabled={busy}>{"Delete"}</button>
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
                title={if matches!(*editing, Some(EditTarget::Existing(_))) { "Edit staff member" } else { "New staff member" }}
                on_close={close_form.clone()}
            >
                <form class="record-form" onsubmit={on_submit}>
                    <FormField id="staff-first-name" label="First name" value={form.first_name.clone()}
                        on_change={bind(&form, |f, v| f.first_name = v)} error={errors.get("first_name")} disabled={*submitting} />
                    <FormField id="staff-last-name" label="Last name" value={form.last_name.clone()}
                        on_change={bind(&form, |f, v| f.last_name = v)} error={errors.get("last_name")} disabled={*submitting} />
                    <FormField id="staff-email" label="Email" input_type="email" value={form.email.clone()}
                        on_change={bind(&form, |f, v| f.email = v)} error={errors.get("email")} disabled={*submitting} />
                    <FormField id="staff-phone" label="Phone" input_type="tel" value={form.phone.clone()}
                        placeholder="+254 712 345 678"
                        on_change={bind(&form, |f, v| f.phone = v)} error={errors.get("phone")} disabled={*submitting} />
                    <FormField id="staff-role" label="Role" value={form.role.clone()} options={key_options(STAFF_ROLES)}
                        on_change={bind(&form, |f, v| f.role = v)} error={errors.get("role")} disabled={*submitting} />
                    <FormField id="staff-branch" label="Branch" value={form.branch_id.clone()} options={branch_options}
                        on_change={bind(&form, |f, v| f.branch_id = v)} disabled={*submitting} />
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
                message="Delete this staff account? This cannot be undone."
                busy={busy_id.is_some()}
                on_confirm={confirm_delete}
                on_cancel={cancel_delete}
            />
        </section>
    }
}
