use yew::prelude::*;
use shared::format::{format_amount, format_timestamp};
use shared::labels::translate;
use shared::models::inventory::INVENTORY_CATEGORIES;
use shared::{FieldErrors, FormInput, InventoryForm, InventoryItem, PaginationWindow, StockStatus};
use wasm_bindgen_futures::spawn_local;

use super::{bind, key_options, EditTarget};
use crate::components::form_field::FormField;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::hooks::use_records::{settle_save, use_inventory, RecordsAction, SaveOutcome};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct InventoryPageProps {
    pub api_client: ApiClient,
    pub page_size: usize,
    /// Supervisors only see and stock their own branch
    #[prop_or_default]
    pub branch_id: Option<String>,
}

#[function_component(InventoryPage)]
pub fn inventory_page(props: &InventoryPageProps) -> Html {
    let inventory = use_inventory(&props.api_client, props.branch_id.clone());
    let toaster = use_toaster();

    let page = use_state(|| 1usize);
    let low_stock_only = use_state(|| false);
    let editing = use_state(|| Option::<EditTarget>::None);
    let form = use_state(InventoryForm::default);
    let errors = use_state(FieldErrors::default);
    let submitting = use_state(|| false);
    let deleting = use_state(|| Option::<String>::None);
    let delete_busy = use_state(|| false);

    let visible: Vec<InventoryItem> = inventory
        .state
        .items
        .iter()
        .filter(|item| !*low_stock_only || item.stock_status() != StockStatus::InStock)
        .cloned()
        .collect();
    let window = PaginationWindow::new(1, props.page_size, visible.len()).go_to(*page);
    let stock_value: f64 = inventory.state.items.iter().map(|i| i.total_value()).sum();

    let open_new = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        let branch_id = props.branch_id.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(InventoryForm {
                branch_id: branch_id.clone().unwrap_or_default(),
                ..InventoryForm::default()
            });
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::New));
        })
    };

    let open_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |item: InventoryItem| {
            form.set(InventoryForm::from_item(&item));
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::Existing(item.public_id)));
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

    let toggle_low_stock = {
        let low_stock_only = low_stock_only.clone();
        let page = page.clone();
        Callback::from(move |_: Event| {
            low_stock_only.set(!*low_stock_only);
            page.set(1);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let dispatcher = inventory.dispatcher.clone();
        let refresh = inventory.refresh.clone();
        let items = inventory.state.items.clone();
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
                .and_then(|id| items.iter().find(|i| i.public_id == id).cloned());
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let refresh = refresh.clone();
            let editing = editing.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                let result = match &existing {
                    Some(item) => api_client.update_inventory_item(&item.public_id, &request).await,
                    None => api_client.create_inventory_item(&request).await,
                };
                match settle_save(result, existing, |item| item.apply(&request)) {
                    SaveOutcome::Saved(item) => {
                        if item.stock_status() != StockStatus::InStock {
                            toaster.info(format!("{} is running low", item.name));
                        } else {
                            toaster.success(format!("Saved {}", item.name));
                        }
                        dispatcher.dispatch(RecordsAction::Upsert(item));
                        editing.set(None);
                    }
                    SaveOutcome::SavedWithoutRecord => {
                        toaster.success("Item saved");
                        refresh.emit(());
                        editing.set(None);
                    }
                    SaveOutcome::Failed(e) => {
                        Logger::error_with_component("inventory", &format!("save failed: {}", e));
                        toaster.error(format!("Could not save item: {}", e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let confirm_delete = {
        let api_client = props.api_client.clone();
        let dispatcher = inventory.dispatcher.clone();
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
                match api_client.delete_inventory_item(&public_id).await {
                    Ok(()) => {
                        dispatcher.dispatch(RecordsAction::Remove(public_id));
                        toaster.success("Item removed");
                    }
                    Err(e) => {
                        Logger::error_with_component("inventory", &format!("delete failed: {}", e));
                        toaster.error(format!("Could not remove item: {}", e));
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
        <section class="page inventory-page">
            <div class="page-header">
                <h2>{"Inventory"}</h2>
                <span class="page-header-note">{format!("Stock value: {}", format_amount(stock_value))}</span>
                <label class="filter-toggle">
                    <input type="checkbox" checked={*low_stock_only} onchange={toggle_low_stock} />
                    {"Low stock only"}
                </label>
                <button class="btn btn-primary" onclick={open_new}>{"Add item"}</button>
            </div>

            {if inventory.state.loading && inventory.state.items.is_empty() {
                html! { <div class="loading">{"Loading inventory..."}</div> }
            } else if visible.is_empty() {
                html! { <div class="empty-state"><p>{"No inventory items to show"}</p></div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Item"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Quantity"}</th>
                                    <th>{"Status"}</th>
                                    <th>{"Value"}</th>
                                    <th>{"Updated"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for window.slice(&visible).iter().map(|item| {
                                    let status = item.stock_status();
                                    let on_edit = {
                                        let open_edit = open_edit.clone();
                                        let item = item.clone();
                                        Callback::from(move |_: MouseEvent| open_edit.emit(item.clone()))
                                    };
                                    let on_delete = {
                                        let deleting = deleting.clone();
                                        let id = item.public_id.clone();
                                        Callback::from(move |_: MouseEvent| deleting.set(Some(id.clone())))
                                    };
                                    html! {
                                        <tr key={item.public_id.clone()}>
                                            <td>{&item.name}</td>
                                            <td>{translate(&item.category).into_owned()}</td>
                                            <td>{format!("{} {}", item.quantity, item.unit)}</td>
                                            <td><span class={status.css_class()}>{translate(status.as_key()).into_owned()}</span></td>
                                            <td>{format_amount(item.total_value())}</td>
                                            <td>{item.last_updated.as_deref().map(format_timestamp).unwrap_or_default()}</td>
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
                title={if matches!(*editing, Some(EditTarget::Existing(_))) { "Edit item" } else { "New inventory item" }}
                on_close={close_form.clone()}
            >
                <form class="record-form" onsubmit={on_submit}>
                    <FormField id="item-name" label="Item name" value={form.name.clone()}
                        on_change={bind(&form, |f, v| f.name = v)} error={errors.get("name")} disabled={*submitting} />
                    <FormField id="item-category" label="Category" value={form.category.clone()}
                        options={key_options(INVENTORY_CATEGORIES)}
                        on_change={bind(&form, |f, v| f.category = v)} error={errors.get("category")} disabled={*submitting} />
                    <FormField id="item-quantity" label="Quantity" input_type="number" value={form.quantity.clone()}
                        on_change={bind(&form, |f, v| f.quantity = v)} error={errors.get("quantity")} disabled={*submitting} />
                    <FormField id="item-unit" label="Unit" value={form.unit.clone()} placeholder="kg, pcs, boxes"
                        on_change={bind(&form, |f, v| f.unit = v)} error={errors.get("unit")} disabled={*submitting} />
                    <FormField id="item-min" label="Minimum stock" input_type="number" value={form.min_threshold.clone()}
                        on_change={bind(&form, |f, v| f.min_threshold = v)} error={errors.get("min_threshold")} disabled={*submitting} />
                    <FormField id="item-price" label="Unit price" input_type="number" value={form.unit_price.clone()}
                        on_change={bind(&form, |f, v| f.unit_price = v)} error={errors.get("unit_price")} disabled={*submitting} />
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
                message="Remove this item from inventory?"
                busy={*delete_busy}
                on_confirm={confirm_delete}
                on_cancel={cancel_delete}
            />
        </section>
    }
}
