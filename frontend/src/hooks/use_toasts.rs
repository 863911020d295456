use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u32,
}

pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u32),
}

/// At most this many toasts are on screen; older ones are dropped first
const MAX_VISIBLE: usize = 4;

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.next_id = next.next_id.wrapping_add(1);
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
                if next.toasts.len() > MAX_VISIBLE {
                    let excess = next.toasts.len() - MAX_VISIBLE;
                    next.toasts.drain(..excess);
                }
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

/// Handle given to pages and hooks through context for raising toasts
#[derive(Clone, PartialEq)]
pub struct Toaster {
    push: Callback<(ToastKind, String)>,
}

impl Toaster {
    pub fn new(push: Callback<(ToastKind, String)>) -> Self {
        Self { push }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Error, message.into()));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Info, message.into()));
    }
}

impl Default for Toaster {
    /// A toaster outside any provider swallows messages
    fn default() -> Self {
        Self::new(Callback::from(|_| ()))
    }
}

/// Owns the toast list; the app root mounts this once and provides the [`Toaster`]
#[hook]
pub fn use_toast_host() -> (UseReducerHandle<ToastState>, Toaster) {
    let state = use_reducer(ToastState::default);
    let toaster = {
        let dispatcher = state.dispatcher();
        use_memo((), move |_| {
            Toaster::new(Callback::from(move |(kind, message): (ToastKind, String)| {
                dispatcher.dispatch(ToastAction::Push(kind, message));
            }))
        })
    };
    (state, (*toaster).clone())
}

#[hook]
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_push_and_dismiss() {
        let state = Rc::new(ToastState::default());
        let state = state.reduce(ToastAction::Push(ToastKind::Error, "Failed".into()));
        let state = state.reduce(ToastAction::Push(ToastKind::Success, "Saved".into()));
        assert_eq!(state.toasts.len(), 2);

        let first = state.toasts[0].id;
        let state = state.reduce(ToastAction::Dismiss(first));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "Saved");
    }

    #[wasm_bindgen_test]
    fn test_oldest_toasts_drop_off() {
        let mut state = Rc::new(ToastState::default());
        for i in 0..6 {
            state = state.reduce(ToastAction::Push(ToastKind::Info, format!("t{}", i)));
        }
        assert_eq!(state.toasts.len(), MAX_VISIBLE);
        assert_eq!(state.toasts[0].message, "t2");
    }
}
