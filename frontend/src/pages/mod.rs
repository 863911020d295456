pub mod branches;
pub mod centres;
pub mod fundraisers;
pub mod inventory;
pub mod notifications;
pub mod overview;
pub mod reports;
pub mod staff;

use yew::prelude::*;
use shared::labels::translate;

/// Which record the form dialog is editing
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    New,
    Existing(String),
}

impl EditTarget {
    pub fn existing_id(&self) -> Option<&str> {
        match self {
            EditTarget::New => None,
            EditTarget::Existing(id) => Some(id),
        }
    }
}

/// Callback that writes one text field of a form held in state
pub(crate) fn bind<F: Clone + 'static>(form: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<String> {
    let form = form.clone();
    Callback::from(move |value: String| {
        let mut next = (*form).clone();
        apply(&mut next, value);
        form.set(next);
    })
}

/// Select options for a fixed list of backend keys, labelled through the label table
pub(crate) fn key_options(keys: &[&str]) -> Vec<(AttrValue, AttrValue)> {
    keys.iter()
        .map(|key| (AttrValue::from(key.to_string()), AttrValue::from(translate(key).into_owned())))
        .collect()
}
