//! Orphanage centres: listing and the two-step registration.
//!
//! Registration creates the centre first and uploads its certificate
//! second. The upload goes out as multipart form data and, if the server
//! rejects that, once more as base64 JSON. A centre whose certificate never
//! arrives is kept; the user is told to upload it again from the list.

use anyhow::{anyhow, Context};
use yew::prelude::*;
use shared::{
    CentreForm, CentreRegistrationRequest, CertificateUpload, FieldErrors, FormInput,
    OrphanageCentre, PaginationWindow, RegistrationOutcome,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlInputElement};

use super::bind;
use crate::components::form_field::FormField;
use crate::components::modal::Modal;
use crate::components::pagination::Pagination;
use crate::hooks::use_records::{use_centres, RecordsAction};
use crate::hooks::use_toasts::use_toaster;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

async fn upload_certificate(api_client: &ApiClient, centre_id: &str, file: &web_sys::File) -> anyhow::Result<()> {
    let form = FormData::new().map_err(|_| anyhow!("could not build the upload form"))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| anyhow!("could not attach the certificate"))?;

    match api_client.upload_certificate(centre_id, form).await {
        Ok(_) => return Ok(()),
        Err(e) => Logger::warn_with_component(
            "centres",
            &format!("multipart certificate upload failed, retrying as base64: {}", e),
        ),
    }

    let data_url = gloo::file::futures::read_as_data_url(&gloo::file::File::from(file.clone()))
        .await
        .context("could not read the certificate file")?;
    let upload = CertificateUpload::from_data_url(&file.name(), &data_url)
        .ok_or_else(|| anyhow!("the certificate file could not be encoded"))?;
    api_client
        .upload_certificate_base64(centre_id, &upload)
        .await
        .context("certificate upload was rejected")?;
    Ok(())
}

/// Create the centre, then attach its certificate. Only a failure of the
/// first step is an error; a failed upload is a partial outcome.
async fn register_centre(
    api_client: &ApiClient,
    request: &CentreRegistrationRequest,
    certificate: &web_sys::File,
) -> anyhow::Result<RegistrationOutcome> {
    let response = api_client
        .register_centre(request)
        .await
        .context("centre registration failed")?;
    let centre_id = response.public_id;

    match upload_certificate(api_client, &centre_id, certificate).await {
        Ok(()) => Ok(RegistrationOutcome::Complete { centre_id }),
        Err(e) => {
            Logger::error_with_component("centres", &format!("certificate for {} not stored: {:#}", centre_id, e));
            Ok(RegistrationOutcome::CertificateMissing {
                centre_id,
                reason: format!("{:#}", e),
            })
        }
    }
}

fn local_centre(centre_id: &str, request: &CentreRegistrationRequest) -> OrphanageCentre {
    OrphanageCentre {
        public_id: centre_id.to_string(),
        name: request.name.clone(),
        address: request.address.clone(),
        email: Some(request.email.clone()),
        director_name: Some(request.director_name.clone()),
        branch_count: 0,
        verified: false,
        suspended: false,
    }
}

fn selected_file(e: &Event) -> Option<web_sys::File> {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.files().and_then(|files| files.get(0))
}

#[derive(Properties, PartialEq)]
pub struct CentresPageProps {
    pub api_client: ApiClient,
    pub page_size: usize,
}

#[function_component(CentresPage)]
pub fn centres_page(props: &CentresPageProps) -> Html {
    let centres = use_centres(&props.api_client);
    let toaster = use_toaster();

    let page = use_state(|| 1usize);
    let registering = use_state(|| false);
    let form = use_state(CentreForm::default);
    let certificate = use_state(|| Option::<web_sys::File>::None);
    let errors = use_state(FieldErrors::default);
    let certificate_error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);
    let uploading_for = use_state(|| Option::<String>::None);

    let window = PaginationWindow::new(1, props.page_size, centres.state.items.len()).go_to(*page);

    let open_form = {
        let registering = registering.clone();
        let form = form.clone();
        let certificate = certificate.clone();
        let errors = errors.clone();
        let certificate_error = certificate_error.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(CentreForm::default());
            certificate.set(None);
            errors.set(FieldErrors::default());
            certificate_error.set(None);
            registering.set(true);
        })
    };

    let close_form = {
        let registering = registering.clone();
        Callback::from(move |_: ()| registering.set(false))
    };

    let on_cancel_click = {
        let close_form = close_form.clone();
        Callback::from(move |_: MouseEvent| close_form.emit(()))
    };

    let on_certificate = {
        let certificate = certificate.clone();
        let certificate_error = certificate_error.clone();
        Callback::from(move |e: Event| {
            certificate.set(selected_file(&e));
            certificate_error.set(None);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let dispatcher = centres.dispatcher.clone();
        let form = form.clone();
        let certificate = certificate.clone();
        let errors = errors.clone();
        let certificate_error = certificate_error.clone();
        let registering = registering.clone();
        let submitting = submitting.clone();
        let toaster = toaster.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let validated = form.validate();
            let file = (*certificate).clone();
            if file.is_none() {
                certificate_error.set(Some("Registration certificate is required".to_string()));
            }
            let (request, file) = match (validated, file) {
                (Ok(request), Some(file)) => (request, file),
                (Err(field_errors), _) => {
                    errors.set(field_errors);
                    return;
                }
                (Ok(_), None) => {
                    errors.set(FieldErrors::default());
                    return;
                }
            };
            errors.set(FieldErrors::default());
            submitting.set(true);

            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let registering = registering.clone();
            let submitting = submitting.clone();
            let toaster = toaster.clone();

            spawn_local(async move {
                match register_centre(&api_client, &request, &file).await {
                    Ok(outcome) => {
                        dispatcher.dispatch(RecordsAction::Upsert(local_centre(outcome.centre_id(), &request)));
                        match &outcome {
                            RegistrationOutcome::Complete { .. } => toaster.success(outcome.message()),
                            RegistrationOutcome::CertificateMissing { .. } => toaster.info(outcome.message()),
                        }
                        registering.set(false);
                    }
                    Err(e) => {
                        Logger::error_with_component("centres", &format!("{:#}", e));
                        toaster.error(format!("{:#}", e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let reupload = {
        let api_client = props.api_client.clone();
        let uploading_for = uploading_for.clone();
        let toaster = toaster.clone();

        Callback::from(move |(centre_id, file): (String, web_sys::File)| {
            let api_client = api_client.clone();
            let uploading_for = uploading_for.clone();
            let toaster = toaster.clone();

            uploading_for.set(Some(centre_id.clone()));
            spawn_local(async move {
                match upload_certificate(&api_client, &centre_id, &file).await {
                    Ok(()) => toaster.success("Certificate uploaded"),
                    Err(e) => {
                        Logger::error_with_component("centres", &format!("re-upload for {} failed: {:#}", centre_id, e));
                        toaster.error(format!("Certificate upload failed: {:#}", e));
                    }
                }
                uploading_for.set(None);
            });
        })
    };

    let on_page = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let file_name = certificate.as_ref().map(|f| f.name());

    html! {
        <section class="page centres-page">
            <div class="page-header">
                <h2>{"Orphanage centres"}</h2>
                <button class="btn btn-primary" onclick={open_form}>{"Register centre"}</button>
            </div>

            {if centres.state.loading && centres.state.items.is_empty() {
                html! { <div class="loading">{"Loading centres..."}</div> }
            } else if centres.state.items.is_empty() {
                html! { <div class="empty-state"><p>{"No centres registered"}</p></div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"Centre"}</th>
                                    <th>{"Address"}</th>
                                    <th>{"Director"}</th>
                                    <th>{"Branches"}</th>
                                    <th>{"Status"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for window.slice(&centres.state.items).iter().map(|centre| {
                                    let uploading = uploading_for.as_deref() == Some(centre.public_id.as_str());
                                    let on_file = {
                                        let reupload = reupload.clone();
                                        let id = centre.public_id.clone();
                                        Callback::from(move |e: Event| {
                                            if let Some(file) = selected_file(&e) {
                                                reupload.emit((id.clone(), file));
                                            }
                                        })
                                    };
                                    let (status_class, status) = if centre.suspended {
                                        ("badge badge-danger", "Suspended")
                                    } else if centre.verified {
                                        ("badge badge-success", "Verified")
                                    } else {
                                        ("badge badge-warning", "Pending verification")
                                    };
                                    html! {
                                        <tr key={centre.public_id.clone()}>
                                            <td>{&centre.name}</td>
                                            <td>{&centre.address}</td>
                                            <td>{centre.director_name.clone().unwrap_or_default()}</td>
                                            <td>{centre.branch_count}</td>
                                            <td><span class={status_class}>{status}</span></td>
                                            <td class="row-actions">
                                                <label class="btn btn-link">
                                                    {if uploading { "Uploading..." } else { "Upload certificate" }}
                                                    <input type="file" class="hidden-file-input" accept=".pdf,image/*"
                                                        onchange={on_file} disabled={uploading} />
                                                </label>
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

            <Modal is_open={*registering} title="Register orphanage centre" on_close={close_form.clone()}>
                <form class="record-form" onsubmit={on_submit}>
                    <FormField id="centre-name" label="Centre name" value={form.name.clone()}
                        on_change={bind(&form, |f, v| f.name = v)} error={errors.get("name")} disabled={*submitting} />
                    <FormField id="centre-address" label="Address" value={form.address.clone()}
                        on_change={bind(&form, |f, v| f.address = v)} error={errors.get("address")} disabled={*submitting} />
                    <FormField id="centre-email" label="Email" input_type="email" value={form.email.clone()}
                        on_change={bind(&form, |f, v| f.email = v)} error={errors.get("email")} disabled={*submitting} />
                    <FormField id="centre-phone" label="Phone" input_type="tel" value={form.phone.clone()}
                        on_change={bind(&form, |f, v| f.phone = v)} error={errors.get("phone")} disabled={*submitting} />
                    <FormField id="centre-director" label="Director name" value={form.director_name.clone()}
                        on_change={bind(&form, |f, v| f.director_name = v)} error={errors.get("director_name")} disabled={*submitting} />
                    <FormField id="centre-license" label="License number" value={form.license_number.clone()}
                        on_change={bind(&form, |f, v| f.license_number = v)} error={errors.get("license_number")} disabled={*submitting} />
                    <div class="form-group">
                        <label for="centre-certificate">{"Registration certificate"}</label>
                        <input id="centre-certificate" type="file" accept=".pdf,image/*"
                            onchange={on_certificate} disabled={*submitting} />
                        {file_name.map(|name| html! { <div class="field-hint">{name}</div> }).unwrap_or_default()}
                        {certificate_error.as_ref().map(|e| html! { <div class="field-error">{e}</div> }).unwrap_or_default()}
                    </div>
                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*submitting}>
                            {if *submitting { "Registering..." } else { "Register" }}
                        </button>
                        <button type="button" class="btn btn-secondary" disabled={*submitting} onclick={on_cancel_click}>
                            {"Cancel"}
                        </button>
                    </div>
                </form>
            </Modal>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_centre_from_request() {
        let request = CentreRegistrationRequest {
            name: "Hope House".into(),
            address: "12 Mission Rd".into(),
            email: "info@hope.org".into(),
            phone_number: "+254712345678".into(),
            director_name: "A. Wanjiru".into(),
            license_number: "LIC-88".into(),
        };
        let centre = local_centre("c-42", &request);
        assert_eq!(centre.public_id, "c-42");
        assert_eq!(centre.director_name.as_deref(), Some("A. Wanjiru"));
        assert!(!centre.verified);
        assert!(!centre.suspended);
    }
}
