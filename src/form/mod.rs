use crate::validate::Violation;
use leptos::html;
use leptos::prelude::*;
use strum::{AsRefStr, Display};

/// Typed handle for a form field. The lowercase form doubles as the
/// input's `id`/`name` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum FieldId {
    Name,
    Email,
    Password,
}

/// Reactive state for one input: its value, the inline validation
/// message, and a DOM handle for focus handoff.
#[derive(Clone, Copy)]
pub(crate) struct FieldState {
    pub value: RwSignal<String>,
    pub error: RwSignal<Option<&'static str>>,
    pub node: NodeRef<html::Input>,
}

impl FieldState {
    pub fn new() -> Self {
        Self {
            value: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            node: NodeRef::new(),
        }
    }

    pub fn focus(&self) {
        if let Some(el) = self.node.get_untracked() {
            let _ = el.focus();
        }
    }

    pub fn invalid(&self) -> Signal<bool> {
        let error = self.error;
        Signal::derive(move || error.get().is_some())
    }
}

/// Clears every inline message. Runs at the start of each submit
/// attempt, before the rule set is evaluated again.
pub(crate) fn clear_errors(fields: &[(FieldId, FieldState)]) {
    for (_, field) in fields {
        field.error.set(None);
    }
}

/// Maps violations back onto their fields so each offending input shows
/// its own message.
pub(crate) fn apply_errors(fields: &[(FieldId, FieldState)], violations: &[Violation]) {
    for violation in violations {
        for (id, field) in fields {
            if *id == violation.field {
                field.error.set(Some(violation.message));
            }
        }
    }
}

/// Inline validation message slot rendered under an input.
#[component]
pub(crate) fn FieldMessage(field: FieldState) -> impl IntoView {
    view! {
        <Show when=move || field.error.get().is_some() fallback=|| ().into_view()>
            {move || {
                field.error.get().map(|message| {
                    view! { <p class="text-xs text-destructive">{message}</p> }
                })
            }}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_lowercase_forms() {
        assert_eq!(FieldId::Email.as_ref(), "email");
        assert_eq!(FieldId::Password.as_ref(), "password");
        assert_eq!(FieldId::Name.to_string(), "name");
    }
}
