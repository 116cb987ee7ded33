//! Bindings between a [`ModalController`] signal and form inputs.
//!
//! Each accessor takes a plain `fn` so a [`FormHandle`] stays `Copy` and can
//! be captured by any number of input callbacks.

use contracts::shared::modal::ModalController;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

pub struct FormHandle<F: Send + Sync + 'static> {
    pub modal: RwSignal<ModalController<F>>,
    validate: fn(&F) -> ValidationErrors,
}

impl<F: Send + Sync + 'static> Clone for FormHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Send + Sync + 'static> Copy for FormHandle<F> {}

impl<F> FormHandle<F>
where
    F: Clone + Default + PartialEq + Send + Sync + 'static,
{
    pub fn new(modal: RwSignal<ModalController<F>>, validate: fn(&F) -> ValidationErrors) -> Self {
        Self { modal, validate }
    }

    pub fn value(&self, get: fn(&F) -> String) -> Signal<String> {
        let modal = self.modal;
        Signal::derive(move || modal.with(|m| get(&m.form)))
    }

    pub fn checked(&self, get: fn(&F) -> bool) -> Signal<bool> {
        let modal = self.modal;
        Signal::derive(move || modal.with(|m| get(&m.form)))
    }

    /// Apply an edit and re-validate
    pub fn edit(&self, change: impl FnOnce(&mut F)) {
        let validate = self.validate;
        self.modal.update(|m| m.update(validate, change));
    }

    pub fn on_input(&self, set: fn(&mut F, String)) -> Callback<String> {
        let this = *self;
        Callback::new(move |value: String| this.edit(|form| set(form, value)))
    }

    pub fn on_toggle(&self, set: fn(&mut F, bool)) -> Callback<bool> {
        let this = *self;
        Callback::new(move |value: bool| this.edit(|form| set(form, value)))
    }

    pub fn on_blur(&self, field: &'static str) -> Callback<()> {
        let modal = self.modal;
        Callback::new(move |_| modal.update(|m| m.touch(field)))
    }

    /// Error of a touched field
    pub fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let modal = self.modal;
        Signal::derive(move || modal.with(|m| m.visible_error(field).map(str::to_string)))
    }

    /// Inputs are locked in view mode and while saving
    pub fn locked(&self) -> Signal<bool> {
        let modal = self.modal;
        Signal::derive(move || modal.with(|m| m.is_read_only() || m.saving))
    }

    pub fn read(&self) -> F {
        self.modal.with_untracked(|m| m.form.clone())
    }
}
