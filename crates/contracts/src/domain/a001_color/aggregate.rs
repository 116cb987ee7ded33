use serde::{Deserialize, Serialize};

use crate::domain::common::lookup::{optional_text, text};
use crate::domain::common::{EntityId, LookupFields, LookupForm, LookupResource, LookupRow, Resource};
use crate::shared::validation::{rules, ValidationErrors};

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorDto {
    pub id: EntityId,
    #[serde(rename = "tenMau")]
    pub name: String,
    #[serde(rename = "maMau", default)]
    pub hex: Option<String>,
    #[serde(rename = "trangThai", default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRequest {
    #[serde(rename = "tenMau")]
    pub name: String,
    #[serde(rename = "maMau")]
    pub hex: Option<String>,
    #[serde(rename = "trangThai")]
    pub active: bool,
}

// ============================================================================
// Resource
// ============================================================================

/// Helmet color, e.g. "Đỏ" / `#FF0000`
pub struct Color;

impl Resource for Color {
    type Dto = ColorDto;
    type Row = LookupRow;
    type Form = LookupForm;
    type Request = ColorRequest;

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "color"
    }

    fn element_name() -> &'static str {
        "Màu sắc"
    }

    fn list_name() -> &'static str {
        "Quản lý màu sắc"
    }

    fn endpoint() -> &'static str {
        "/mau-sac"
    }

    fn row_id(row: &LookupRow) -> EntityId {
        row.id
    }

    fn to_row(dto: ColorDto) -> LookupRow {
        LookupRow {
            id: dto.id,
            name: dto.name.trim().to_string(),
            code: text(dto.hex).to_uppercase(),
            description: String::new(),
            extra: String::new(),
            active: dto.active.unwrap_or(true),
        }
    }

    fn form_from_row(row: &LookupRow) -> LookupForm {
        LookupForm::from_row(row)
    }

    fn blank_form() -> LookupForm {
        LookupForm {
            code: "#000000".to_string(),
            ..LookupForm::default()
        }
    }

    fn validate(form: &LookupForm) -> ValidationErrors {
        let mut errors = form.validate_common(&Self::fields());
        errors.check("code", rules::HEX_COLOR.validate_string(&form.code, "Mã màu"));
        errors
    }

    fn to_request(form: &LookupForm) -> ColorRequest {
        ColorRequest {
            name: form.name.trim().to_string(),
            hex: optional_text(&form.code).map(|hex| hex.to_uppercase()),
            active: form.active,
        }
    }
}

impl LookupResource for Color {
    fn fields() -> LookupFields {
        LookupFields {
            name_label: "Tên màu",
            name_sort: "tenMau",
            code_label: Some("Mã màu"),
            extra_label: None,
            has_description: false,
            search_placeholder: "Tìm theo tên hoặc mã màu...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ApiError;
    use crate::shared::modal::{ModalController, SubmitAction};
    use crate::shared::paging::{decode_body, decode_page, EnvelopeKind, Page, PageQuery};
    use crate::shared::search_cycle::{FetchOutcome, ListState};

    /// In-memory stand-in for the `/mau-sac` endpoints
    #[derive(Default)]
    struct FakeColorServer {
        rows: Vec<ColorDto>,
        next_id: EntityId,
    }

    impl FakeColorServer {
        fn seeded(count: usize) -> Self {
            let mut server = Self::default();
            for i in 0..count {
                server.create(&ColorRequest {
                    name: format!("Màu {}", i + 1),
                    hex: Some(format!("#00000{}", i % 10)),
                    active: true,
                })
                .unwrap();
            }
            server
        }

        fn list(&self, query: &PageQuery) -> Result<String, ApiError> {
            let keyword = query.keyword.to_lowercase();
            let mut rows: Vec<ColorDto> = self
                .rows
                .iter()
                .filter(|c| keyword.is_empty() || c.name.to_lowercase().contains(&keyword))
                .filter(|c| match query.filter("trangThai") {
                    Some(v) => c.active.map(|a| a.to_string()) == Some(v.to_string()),
                    None => true,
                })
                .cloned()
                .collect();
            rows.sort_by_key(|c| std::cmp::Reverse(c.id));
            let page = Page::from_items(rows, query.page, query.size);
            serde_json::to_string(&page).map_err(|e| ApiError::Decode(e.to_string()))
        }

        fn create(&mut self, request: &ColorRequest) -> Result<String, ApiError> {
            if self.rows.iter().any(|c| c.name == request.name) {
                return Err(ApiError::from_response(409, r#"{"message":"Tên màu đã tồn tại"}"#));
            }
            self.next_id += 1;
            let dto = ColorDto {
                id: self.next_id,
                name: request.name.clone(),
                hex: request.hex.clone(),
                active: Some(request.active),
            };
            self.rows.push(dto.clone());
            serde_json::to_string(&dto).map_err(|e| ApiError::Decode(e.to_string()))
        }

        fn update(&mut self, id: EntityId, request: &ColorRequest) -> Result<(), ApiError> {
            let row = self
                .rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(ApiError::NotFound)?;
            row.name = request.name.clone();
            row.hex = request.hex.clone();
            row.active = Some(request.active);
            Ok(())
        }

        fn delete(&mut self, id: EntityId) -> Result<(), ApiError> {
            let before = self.rows.len();
            self.rows.retain(|c| c.id != id);
            if self.rows.len() == before {
                return Err(ApiError::NotFound);
            }
            Ok(())
        }
    }

    fn refresh(state: &mut ListState<LookupRow>, server: &FakeColorServer) {
        let (ticket, query) = state.begin_fetch();
        let result = server
            .list(&query)
            .and_then(|body| decode_page::<ColorDto>(&body, EnvelopeKind::Plain))
            .map(|page| page.map(Color::to_row));
        assert_eq!(state.apply_page(ticket, result), FetchOutcome::Applied);
    }

    fn submit(
        modal: &mut ModalController<LookupForm>,
        server: &mut FakeColorServer,
    ) -> Result<(), ApiError> {
        let action = modal.begin_submit(Color::validate).expect("form is valid");
        let result = match action {
            SubmitAction::Create(form) => server.create(&Color::to_request(&form)).map(|_| ()),
            SubmitAction::Update(id, form) => server.update(id, &Color::to_request(&form)),
        };
        modal.finish_submit(result.clone());
        result
    }

    #[test]
    fn test_color_create_edit_delete_scenario() {
        let mut server = FakeColorServer::seeded(3);
        let mut state = ListState::new(Color::default_sort(), Color::default_page_size());
        let mut modal = ModalController::<LookupForm>::default();
        refresh(&mut state, &server);
        assert_eq!(state.items.len(), 3);

        // create
        modal.open_add(Color::blank_form());
        modal.update(Color::validate, |f| {
            f.name = "Đỏ".to_string();
            f.code = "#FF0000".to_string();
        });
        submit(&mut modal, &mut server).unwrap();
        assert!(!modal.is_open());
        refresh(&mut state, &server);
        assert_eq!(state.items[0].name, "Đỏ");
        assert_eq!(state.items[0].code, "#FF0000");
        let red = state.items[0].clone();

        // edit
        modal.open_edit(red.id, Color::form_from_row(&red));
        modal.update(Color::validate, |f| f.name = "Đỏ đậm".to_string());
        submit(&mut modal, &mut server).unwrap();
        refresh(&mut state, &server);
        assert!(state.items.iter().any(|c| c.name == "Đỏ đậm"));
        assert!(!state.items.iter().any(|c| c.name == "Đỏ"));

        // delete
        server.delete(red.id).unwrap();
        refresh(&mut state, &server);
        assert!(!state.items.iter().any(|c| c.id == red.id));
        assert_eq!(state.total_elements, 3);
    }

    #[test]
    fn test_duplicate_name_keeps_modal_open() {
        let mut server = FakeColorServer::seeded(1);
        let mut modal = ModalController::<LookupForm>::default();
        modal.open_add(LookupForm {
            name: "Màu 1".to_string(),
            code: "#123".to_string(),
            ..LookupForm::default()
        });
        let err = submit(&mut modal, &mut server).unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert!(modal.is_open());
        assert_eq!(modal.server_error.as_deref(), Some("Tên màu đã tồn tại"));
    }

    #[test]
    fn test_same_query_is_idempotent() {
        let server = FakeColorServer::seeded(12);
        let mut query = PageQuery::new(Color::default_sort(), 5);
        query.page = 1;
        assert_eq!(server.list(&query).unwrap(), server.list(&query).unwrap());
        let page: Page<ColorDto> = decode_body(&server.list(&query).unwrap(), EnvelopeKind::Plain).unwrap();
        assert_eq!(page.content.iter().map(|c| c.id).collect::<Vec<_>>(), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_color_validation() {
        let mut form = Color::blank_form();
        form.name = "Đ".to_string();
        form.code = "red".to_string();
        let errors = Color::validate(&form);
        assert_eq!(errors.get("name"), Some("Tên màu phải có ít nhất 2 ký tự"));
        assert!(errors.contains("code"));

        form.name = "Đỏ".to_string();
        form.code = "#ff0000".to_string();
        assert!(Color::validate(&form).is_empty());
        assert_eq!(Color::to_request(&form).hex.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dto: ColorDto = serde_json::from_str(r#"{"id":4,"tenMau":" Xanh "}"#).unwrap();
        let row = Color::to_row(dto);
        assert_eq!(row.name, "Xanh");
        assert!(row.active);
        assert_eq!(row.code, "");
    }
}
