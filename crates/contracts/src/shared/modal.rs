//! Add / edit / view modal shared by all list screens, plus the delete confirmation.

use super::error::ApiError;
use super::resource::EntityId;
use super::validation::{TouchedFields, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalMode {
    #[default]
    Closed,
    Add,
    Edit(EntityId),
    View(EntityId),
}

/// What a validated submit should send
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction<F> {
    Create(F),
    Update(EntityId, F),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    NotEditable,
    AlreadySaving,
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalController<F> {
    pub mode: ModalMode,
    pub form: F,
    pub errors: ValidationErrors,
    pub touched: TouchedFields,
    pub saving: bool,
    /// Error returned by the server on the last submit
    pub server_error: Option<String>,
}

impl<F: Default> Default for ModalController<F> {
    fn default() -> Self {
        Self {
            mode: ModalMode::Closed,
            form: F::default(),
            errors: ValidationErrors::new(),
            touched: TouchedFields::default(),
            saving: false,
            server_error: None,
        }
    }
}

impl<F: Clone + Default> ModalController<F> {
    fn open(&mut self, mode: ModalMode, form: F) {
        *self = Self {
            mode,
            form,
            ..Self::default()
        };
    }

    pub fn open_add(&mut self, form: F) {
        self.open(ModalMode::Add, form);
    }

    pub fn open_edit(&mut self, id: EntityId, form: F) {
        self.open(ModalMode::Edit(id), form);
    }

    pub fn open_view(&mut self, id: EntityId, form: F) {
        self.open(ModalMode::View(id), form);
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.mode != ModalMode::Closed
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, ModalMode::View(_))
    }

    pub fn title(&self, element_name: &str) -> String {
        match self.mode {
            ModalMode::Closed => String::new(),
            ModalMode::Add => format!("Thêm {}", element_name.to_lowercase()),
            ModalMode::Edit(_) => format!("Cập nhật {}", element_name.to_lowercase()),
            ModalMode::View(_) => format!("Chi tiết {}", element_name.to_lowercase()),
        }
    }

    /// Apply an edit and re-run validation; ignored in view mode
    pub fn update(&mut self, validate: impl Fn(&F) -> ValidationErrors, edit: impl FnOnce(&mut F)) {
        if self.is_read_only() || !self.is_open() {
            return;
        }
        edit(&mut self.form);
        self.errors = validate(&self.form);
    }

    pub fn touch(&mut self, field: &str) {
        self.touched.touch(field);
    }

    /// Error for a field, but only once the field has been touched
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Validate everything and, if clean, mark the modal as saving
    pub fn begin_submit(
        &mut self,
        validate: impl Fn(&F) -> ValidationErrors,
    ) -> Result<SubmitAction<F>, SubmitRejected> {
        let id = match self.mode {
            ModalMode::Add => None,
            ModalMode::Edit(id) => Some(id),
            ModalMode::Closed | ModalMode::View(_) => return Err(SubmitRejected::NotEditable),
        };
        if self.saving {
            return Err(SubmitRejected::AlreadySaving);
        }
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            self.touched.touch_all(&self.errors);
            return Err(SubmitRejected::Invalid(self.errors.clone()));
        }
        self.saving = true;
        self.server_error = None;
        let form = self.form.clone();
        Ok(match id {
            None => SubmitAction::Create(form),
            Some(id) => SubmitAction::Update(id, form),
        })
    }

    /// Close on success, keep the form open with the server message on failure
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.close(),
            Err(err) => {
                self.saving = false;
                self.server_error = Some(err.to_string());
            }
        }
    }
}

/// Row waiting for the user to confirm its deletion
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirm<T> {
    pub pending: Option<T>,
    pub deleting: bool,
}

impl<T> Default for DeleteConfirm<T> {
    fn default() -> Self {
        Self {
            pending: None,
            deleting: false,
        }
    }
}

impl<T: Clone> DeleteConfirm<T> {
    pub fn request(&mut self, row: T) {
        if !self.deleting {
            self.pending = Some(row);
        }
    }

    pub fn cancel(&mut self) {
        if !self.deleting {
            self.pending = None;
        }
    }

    /// Start the delete; None when nothing is pending or a delete is running
    pub fn confirm(&mut self) -> Option<T> {
        if self.deleting {
            return None;
        }
        let row = self.pending.clone()?;
        self.deleting = true;
        Some(row)
    }

    pub fn finish(&mut self) {
        self.pending = None;
        self.deleting = false;
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Form {
        name: String,
    }

    fn validate(form: &Form) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if form.name.trim().is_empty() {
            errors.insert("name", "Tên không được để trống");
        }
        errors
    }

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut modal = ModalController::<Form>::default();
        modal.open_add(Form::default());
        modal.update(validate, |f| f.name = String::new());
        assert_eq!(modal.visible_error("name"), None);
        modal.touch("name");
        assert_eq!(modal.visible_error("name"), Some("Tên không được để trống"));
    }

    #[test]
    fn test_invalid_submit_touches_all_fields() {
        let mut modal = ModalController::<Form>::default();
        modal.open_add(Form::default());
        let rejected = modal.begin_submit(validate).unwrap_err();
        assert!(matches!(rejected, SubmitRejected::Invalid(_)));
        assert!(modal.visible_error("name").is_some());
        assert!(!modal.saving);
    }

    #[test]
    fn test_submit_cycle() {
        let mut modal = ModalController::<Form>::default();
        modal.open_edit(5, Form { name: "Đỏ".into() });
        let action = modal.begin_submit(validate).unwrap();
        assert_eq!(action, SubmitAction::Update(5, Form { name: "Đỏ".into() }));
        assert_eq!(modal.begin_submit(validate), Err(SubmitRejected::AlreadySaving));

        modal.finish_submit(Err(ApiError::Conflict("Tên màu đã tồn tại".into())));
        assert!(modal.is_open());
        assert_eq!(modal.server_error.as_deref(), Some("Tên màu đã tồn tại"));

        modal.begin_submit(validate).unwrap();
        modal.finish_submit(Ok(()));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_view_mode_is_read_only() {
        let mut modal = ModalController::<Form>::default();
        modal.open_view(3, Form { name: "Xanh".into() });
        modal.update(validate, |f| f.name = "Đỏ".into());
        assert_eq!(modal.form.name, "Xanh");
        assert_eq!(modal.begin_submit(validate), Err(SubmitRejected::NotEditable));
        assert_eq!(modal.title("Màu sắc"), "Chi tiết màu sắc");
    }

    #[test]
    fn test_delete_confirm() {
        let mut confirm = DeleteConfirm::<i64>::default();
        assert_eq!(confirm.confirm(), None);
        confirm.request(7);
        assert_eq!(confirm.confirm(), Some(7));
        confirm.cancel();
        assert!(confirm.is_open());
        confirm.finish();
        assert!(!confirm.is_open());
    }
}
