use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::from("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
    /// `select` options as `(value, label)`; renders a dropdown when non-empty
    #[prop_or_default]
    pub options: Vec<(AttrValue, AttrValue)>,
    #[prop_or_default]
    pub multiline: bool,
}

/// Labelled input with its validation message underneath
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let class = if props.error.is_some() { "form-input invalid" } else { "form-input" };

    let control = if !props.options.is_empty() {
        let on_change = props.on_change.clone();
        let onchange = Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        });
        html! {
            <select id={props.id.clone()} {class} {onchange} disabled={props.disabled}>
                <option value="" selected={props.value.is_empty()}>{"Select…"}</option>
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>{label.clone()}</option>
                })}
            </select>
        }
    } else if props.multiline {
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(area.value());
        });
        html! {
            <textarea id={props.id.clone()} {class} value={props.value.clone()} {oninput}
                placeholder={props.placeholder.clone()} disabled={props.disabled} />
        }
    } else {
        let on_change = props.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        });
        html! {
            <input id={props.id.clone()} type={props.input_type.clone()} {class} value={props.value.clone()}
                {oninput} placeholder={props.placeholder.clone()} disabled={props.disabled} />
        }
    };

    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            {control}
            {props.error.as_ref().map(|e| html! { <div class="field-error">{e}</div> }).unwrap_or_default()}
        </div>
    }
}
