use yew::prelude::*;
use shared::format::format_amount;
use shared::labels::translate;
use shared::{FieldErrors, FormInput, FundraiserCampaign, FundraiserForm, PaginationWindow};
use wasm_bindgen_futures::spawn_local;

use super::{bind, EditTarget};
use crate::components::form_field::FormField;
use crate::components::modal::{ConfirmDialog, Modal};
use crate::components::pagination::Pagination;
use crate::hooks::use_records::{settle_save, use_fundraisers, RecordsAction, SaveOutcome};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FundraisersPageProps {
    pub api_client: ApiClient,
    pub page_size: usize,
}

fn date_range(campaign: &FundraiserCampaign) -> String {
    let fmt = |d: Option<chrono::NaiveDate>| d.map(|d| d.format("%b %-d, %Y").to_string());
    match (fmt(campaign.start_date), fmt(campaign.end_date)) {
        (Some(start), Some(end)) => format!("{} – {}", start, end),
        (Some(start), None) => format!("from {}", start),
        (None, Some(end)) => format!("until {}", end),
        (None, None) => String::new(),
    }
}

#[function_component(FundraisersPage)]
pub fn fundraisers_page(props: &FundraisersPageProps) -> Html {
    let campaigns = use_fundraisers(&props.api_client);
    let toaster = use_toaster();

    let page = use_state(|| 1usize);
    let editing = use_state(|| Option::<EditTarget>::None);
    let form = use_state(FundraiserForm::default);
    let errors = use_state(FieldErrors::default);
    let submitting = use_state(|| false);
    let deleting = use_state(|| Option::<String>::None);
    let delete_busy = use_state(|| false);

    let window = PaginationWindow::new(1, props.page_size, campaigns.state.items.len()).go_to(*page);

    let open_new = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(FundraiserForm::default());
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::New));
        })
    };

    let open_edit = {
        let editing = editing.clone();
        let form = form.clone();
        let errors = errors.clone();
        Callback::from(move |campaign: FundraiserCampaign| {
            form.set(FundraiserForm::from_campaign(&campaign));
            errors.set(FieldErrors::default());
            editing.set(Some(EditTarget::Existing(campaign.public_id)));
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
        let dispatcher = campaigns.dispatcher.clone();
        let refresh = campaigns.refresh.clone();
        let items = campaigns.state.items.clone();
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
                .and_then(|id| items.iter().find(|c| c.public_id == id).cloned());
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let refresh = refresh.clone();
            let editing = editing.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                let result = match &existing {
                    Some(campaign) => api_client.update_fundraiser(&campaign.public_id, &request).await,
                    None => api_client.create_fundraiser(&request).await,
                };
                match settle_save(result, existing, |campaign| campaign.apply(&request)) {
                    SaveOutcome::Saved(campaign) => {
                        toaster.success(format!("Saved campaign {}", campaign.title));
                        dispatcher.dispatch(RecordsAction::Upsert(campaign));
                        editing.set(None);
                    }
                    SaveOutcome::SavedWithoutRecord => {
                        toaster.success("Campaign saved");
                        refresh.emit(());
                        editing.set(None);
                    }
                    SaveOutcome::Failed(e) => {
                        Logger::error_with_component("fundraisers", &format!("save failed: {}", e));
                        toaster.error(format!("Could not save campaign: {}", e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let confirm_delete = {
        let api_client = props.api_client.clone();
        let dispatcher = campaigns.dispatcher.clone();
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
                match api_client.delete_fundraiser(&public_id).await {
                    Ok(()) => {
                        dispatcher.dispatch(RecordsAction::Remove(public_id));
                        toaster.success("Campaign deleted");
                    }
                    Err(e) => {
                        Logger::error_with_component("fundraisers", &format!("delete failed: {}", e));
                        toaster.error(format!("Could not delete campaign: {}", e));
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
        <section class="page fundraisers-page">
            <div class="page-header">
                <h2>{"Fundraising campaigns"}</h2>
                <button class="btn btn-primary" onclick={open_new}>{"New campaign"}</button>
            </div>

            {if campaigns.state.loading && campaigns.state.items.is_empty() {
                html! { <div class="loading">{"Loading campaigns..."}</div> }
            } else if campaigns.state.items.is_empty() {
                html! { <div class="empty-state"><p>{"No fundraising campaigns yet"}</p></div> }
            } else {
                html! {
                    <div class="card-grid">
                        {for window.slice(&campaigns.state.items).iter().map(|campaign| {
                            let progress = campaign.progress_percent();
                            let on_edit = {
                                let open_edit = open_edit.clone();
                                let campaign = campaign.clone();
                                Callback::from(move |_: MouseEvent| open_edit.emit(campaign.clone()))
                            };
                            let on_delete = {
                                let deleting = deleting.clone();
                                let id = campaign.public_id.clone();
                                Callback::from(move |_: MouseEvent| deleting.set(Some(id.clone())))
                            };
                            html! {
                                <div class="campaign-card" key={campaign.public_id.clone()}>
                                    <div class="campaign-card-header">
                                        <h3>{&campaign.title}</h3>
                                        <span class={if campaign.is_active() { "badge badge-success" } else { "badge" }}>
                                            {translate(campaign.status.as_key()).into_owned()}
                                        </span>
                                    </div>
                                    <p class="campaign-description">{&campaign.description}</p>
                                    <div class="progress-bar">
                                        <div class="progress-fill" style={format!("width: {:.0}%", progress)}></div>
                                    </div>
                                    <div class="campaign-figures">
                                        <span>{format!("{} of {}", format_amount(campaign.raised_amount), format_amount(campaign.goal_amount))}</span>
                                        <span>{format!("{:.0}%", progress)}</span>
                                    </div>
                                    <div class="campaign-dates">{date_range(campaign)}</div>
                                    <div class="row-actions">
                                        <button class="btn btn-link" onclick={on_edit}>{"Edit"}</button>
                                        <button class="btn btn-link danger" onclick={on_delete}>{"Delete"}</button>
                                    </div>
                                </div>
                            }
                        })}
                        <Pagination {window} {on_page} />
                    </div>
                }
            }}

            <Modal
                is_open={editing.is_some()}
                title={if matches!(*editing, Some(EditTarget::Existing(_))) { "Edit campaign" } else { "New campaign" }}
                on_close={close_form.clone()}
            >
                <form class="record-form" onsubmit={on_submit}>
                    <FormField id="campaign-title" label="Title" value={form.title.clone()}
                        on_change={bind(&form, |f, v| f.title = v)} error={errors.get("title")} disabled={*submitting} />
                    <FormField id="campaign-description" label="Description" multiline=true value={form.description.clone()}
                        on_change={bind(&form, |f, v| f.description = v)} error={errors.get("description")} disabled={*submitting} />
                    <FormField id="campaign-goal" label="Goal amount" input_type="number" value={form.goal_amount.clone()}
                        on_change={bind(&form, |f, v| f.goal_amount = v)} error={errors.get("goal_amount")} disabled={*submitting} />
                    <FormField id="campaign-start" label="Start date" input_type="date" value={form.start_date.clone()}
                        on_change={bind(&form, |f, v| f.start_date = v)} error={errors.get("start_date")} disabled={*submitting} />
                    <FormField id="campaign-end" label="End date" input_type="date" value={form.end_date.clone()}
                        on_change={bind(&form, |f, v| f.end_date = v)} error={errors.get("end_date")} disabled={*submitting} />
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
                message="Delete this campaign? Donations already recorded are kept."
                busy={*delete_busy}
                on_confirm={confirm_delete}
                on_cancel={cancel_delete}
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_date_range_caption() {
        let mut campaign: FundraiserCampaign =
            serde_json::from_str(r#"{"publicId":"f-1","startDate":"2025-01-05"}"#).unwrap();
        assert_eq!(date_range(&campaign), "from Jan 5, 2025");
        campaign.end_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert_eq!(date_range(&campaign), "Jan 5, 2025 – Mar 1, 2025");
    }
}
