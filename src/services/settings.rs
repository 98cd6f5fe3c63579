use serde::Serialize;
use serde_json::Value;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::cache::{self, QueryCache};
use crate::domain::site_setting::SiteSetting;
use crate::forms::FormError;
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{SiteSettingReader, SiteSettingWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "site_settings";

/// Field names that should be edited through the image-upload control.
const IMAGE_FIELD_KEYWORDS: &[&str] = &["image", "logo", "icon"];

/// String leaves longer than this get a multi-line control.
const LONG_TEXT_THRESHOLD: usize = 100;

/// One step into a nested JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Render a path as dotted text, e.g. `footer.social_links.0.url`.
pub fn path_to_string(path: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in path {
        if !out.is_empty() {
            out.push('.');
        }
        match segment {
            PathSegment::Key(key) => out.push_str(key),
            PathSegment::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

/// Parse dotted text back into segments; purely numeric segments address
/// array elements.
pub fn parse_path(raw: &str) -> Vec<PathSegment> {
    raw.split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.parse::<usize>() {
            Ok(index) => PathSegment::Index(index),
            Err(_) => PathSegment::Key(segment.to_string()),
        })
        .collect()
}

/// Editing control chosen for a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldControl {
    ImageUpload,
    MultiLine,
    SingleLine,
}

/// Explicit lookup from field name and value to editing control.
pub fn control_for_field(name: &str, value: &Value) -> FieldControl {
    let lowered = name.to_lowercase();
    if IMAGE_FIELD_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return FieldControl::ImageUpload;
    }

    match value {
        Value::String(text) if text.chars().count() > LONG_TEXT_THRESHOLD => {
            FieldControl::MultiLine
        }
        _ => FieldControl::SingleLine,
    }
}

/// An editable leaf of a settings document.
#[derive(Debug, Serialize)]
pub struct SettingField {
    /// Dotted path used to splice the edited value back in.
    pub path: String,
    /// Last named segment, humanized for display.
    pub label: String,
    pub control: FieldControl,
    /// Leaf rendered as editable text.
    pub value: String,
}

/// Recursively visit `value` and produce one field per leaf, in document
/// order.
pub fn flatten_value(value: &Value) -> Vec<SettingField> {
    let mut fields = Vec::new();
    let mut path = Vec::new();
    walk(value, &mut path, &mut fields);
    fields
}

fn walk(value: &Value, path: &mut Vec<PathSegment>, fields: &mut Vec<SettingField>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(PathSegment::Key(key.clone()));
                walk(child, path, fields);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                walk(child, path, fields);
                path.pop();
            }
        }
        leaf => {
            let name = last_key(path);
            fields.push(SettingField {
                path: path_to_string(path),
                label: humanize(&name),
                control: control_for_field(&name, leaf),
                value: leaf_to_text(leaf),
            });
        }
    }
}

fn last_key(path: &[PathSegment]) -> String {
    path.iter()
        .rev()
        .find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.clone()),
            PathSegment::Index(_) => None,
        })
        .unwrap_or_default()
}

fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn leaf_to_text(leaf: &Value) -> String {
    match leaf {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Look up the leaf at `path`, if present.
pub fn get_at_path<'a>(document: &'a Value, path: &[PathSegment]) -> Option<&'a Value> {
    let mut current = document;
    for segment in path {
        current = match segment {
            PathSegment::Key(key) => current.as_object()?.get(key)?,
            PathSegment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Return a deep copy of `document` with the leaf at `path` replaced,
/// leaving sibling keys and array ordering untouched. `None` when the path
/// does not address an existing position.
pub fn set_at_path(document: &Value, path: &[PathSegment], new_leaf: Value) -> Option<Value> {
    if path.is_empty() {
        return Some(new_leaf);
    }

    let mut updated = document.clone();
    let mut current = &mut updated;
    for segment in path {
        current = match segment {
            PathSegment::Key(key) => current.as_object_mut()?.get_mut(key)?,
            PathSegment::Index(index) => current.as_array_mut()?.get_mut(*index)?,
        };
    }
    *current = new_leaf;
    Some(updated)
}

/// Coerce submitted text back to the JSON type of the existing leaf.
///
/// Unparsable numeric or boolean input degrades to a string leaf rather
/// than failing the whole save.
pub fn coerce_leaf(existing: &Value, raw: &str) -> Value {
    match existing {
        Value::Number(_) => {
            if let Ok(int) = raw.trim().parse::<i64>() {
                return Value::from(int);
            }
            if let Ok(float) = raw.trim().parse::<f64>() {
                if let Some(number) = serde_json::Number::from_f64(float) {
                    return Value::Number(number);
                }
            }
            Value::String(raw.to_string())
        }
        Value::Bool(_) => match raw.trim().to_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Value::Bool(true),
            "false" | "off" | "0" | "no" | "" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        Value::Null if raw.trim().is_empty() => Value::Null,
        _ => Value::String(raw.to_string()),
    }
}

/// View of one setting row ready for the admin template.
#[derive(Debug, Serialize)]
pub struct SettingView {
    pub id: i32,
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub fields: Vec<SettingField>,
    /// Raw JSON shown when the document has no editable leaves.
    pub raw: String,
}

impl From<SiteSetting> for SettingView {
    fn from(setting: SiteSetting) -> Self {
        let fields = flatten_value(&setting.value);
        let raw = serde_json::to_string_pretty(&setting.value)
            .unwrap_or_else(|_| setting.value.to_string());
        Self {
            id: setting.id,
            key: setting.key.clone(),
            label: display_label(&setting.key),
            description: setting.description,
            fields,
            raw,
        }
    }
}

/// Friendly headings for the well-known setting keys; everything else is
/// humanized from the key itself.
fn display_label(key: &str) -> String {
    match key {
        "header" => "Header Configuration".to_string(),
        "footer" => "Footer Configuration".to_string(),
        "company_branding" => "Company Branding".to_string(),
        "social_media" => "Social Media Links".to_string(),
        "logo_width" => "Logo Width (px)".to_string(),
        "hero_content" => "Hero Section Content".to_string(),
        "products_page" => "Products Page Content".to_string(),
        "theme_colors" => "Theme Colors".to_string(),
        "price_toggle" => "Price Display Toggle".to_string(),
        other => humanize(other),
    }
}

/// Data required to render the site settings admin page.
pub struct SettingsPageData {
    pub settings: Vec<SettingView>,
}

/// Loads every setting row for the admin page.
pub fn load_settings_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<SettingsPageData>
where
    R: SiteSettingReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let settings = repo
        .list_settings()
        .map_err(ServiceError::from)?
        .into_iter()
        .map(SettingView::from)
        .collect();

    Ok(SettingsPageData { settings })
}

/// Apply leaf edits to one setting document and persist the result.
pub fn save_setting<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    setting_id: i32,
    edits: Vec<(String, String)>,
) -> ServiceResult<SiteSetting>
where
    R: SiteSettingReader + SiteSettingWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let setting = repo
        .get_setting_by_id(setting_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let mut document = setting.value.clone();
    for (raw_path, raw_value) in edits {
        let path = parse_path(&raw_path);
        let existing = get_at_path(&document, &path).ok_or_else(|| {
            ServiceError::from(FormError::UnknownPath {
                path: raw_path.clone(),
            })
        })?;

        let leaf = coerce_leaf(existing, &raw_value);
        document = set_at_path(&document, &path, leaf).ok_or_else(|| {
            ServiceError::from(FormError::UnknownPath {
                path: raw_path.clone(),
            })
        })?;
    }

    let updated = repo
        .update_setting_value(setting_id, &document)
        .map_err(ServiceError::from)?;

    broker.publish(ChangeEvent::update(TABLE, &updated));

    Ok(updated)
}

/// Header/footer/branding content shared by every public page.
#[derive(Debug, Serialize)]
pub struct SiteChrome {
    pub header: Value,
    pub footer: Value,
    pub branding: Value,
    pub social_media: Value,
    pub logo_width: Value,
}

/// Resolve the site chrome through the query cache; change notifications on
/// `site_settings` invalidate these keys so the next render re-fetches.
pub fn load_site_chrome<R>(repo: &R, cache: &QueryCache) -> ServiceResult<SiteChrome>
where
    R: SiteSettingReader + ?Sized,
{
    Ok(SiteChrome {
        header: cached_setting(repo, cache, cache::HEADER_CONTENT, "header")?,
        footer: cached_setting(repo, cache, cache::FOOTER_CONTENT, "footer")?,
        branding: cached_setting(repo, cache, cache::COMPANY_BRANDING, "company_branding")?,
        social_media: cached_setting(repo, cache, cache::SOCIAL_MEDIA, "social_media")?,
        logo_width: cached_setting(repo, cache, cache::LOGO_WIDTH, "logo_width")?,
    })
}

fn cached_setting<R>(
    repo: &R,
    cache: &QueryCache,
    cache_key: &str,
    setting_key: &str,
) -> ServiceResult<Value>
where
    R: SiteSettingReader + ?Sized,
{
    cache.get_or_load(cache_key, || {
        let value = repo
            .get_setting_by_key(setting_key)
            .map_err(ServiceError::from)?
            .map(|setting| setting.value)
            .unwrap_or(Value::Null);
        Ok(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::repository::mock::{MockSiteSettingReader, MockSiteSettingWriter};
    use crate::repository::{SiteSettingReader as _, SiteSettingWriter as _};

    fn footer_document() -> Value {
        json!({
            "tagline": "Small-batch botanical goods",
            "social_links": {
                "facebook": "https://facebook.com/old",
                "instagram": "https://instagram.com/verdura",
                "youtube": "https://youtube.com/@verdura"
            },
            "quick_links": ["Products", "Blog", "Contact"],
            "show_newsletter": true,
            "columns": 3
        })
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new("admin@example.com", "Admin", vec!["admin".to_string()])
    }

    fn setting(id: i32, key: &str, value: Value) -> SiteSetting {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        SiteSetting {
            id,
            key: key.to_string(),
            value,
            description: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn control_lookup_matches_heuristics() {
        assert_eq!(
            control_for_field("logo_url", &json!("x")),
            FieldControl::ImageUpload
        );
        assert_eq!(
            control_for_field("hero_image", &json!("x")),
            FieldControl::ImageUpload
        );
        assert_eq!(
            control_for_field("favicon", &json!("x")),
            FieldControl::ImageUpload
        );
        assert_eq!(
            control_for_field("tagline", &json!("short")),
            FieldControl::SingleLine
        );

        let long_text = "x".repeat(101);
        assert_eq!(
            control_for_field("body", &Value::String(long_text)),
            FieldControl::MultiLine
        );
    }

    #[test]
    fn flatten_visits_leaves_in_document_order() {
        let fields = flatten_value(&footer_document());
        let paths: Vec<&str> = fields.iter().map(|field| field.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "tagline",
                "social_links.facebook",
                "social_links.instagram",
                "social_links.youtube",
                "quick_links.0",
                "quick_links.1",
                "quick_links.2",
                "show_newsletter",
                "columns",
            ]
        );
    }

    #[test]
    fn path_round_trips_through_text() {
        let path = parse_path("social_links.0.url");
        assert_eq!(
            path,
            vec![
                PathSegment::Key("social_links".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("url".to_string()),
            ]
        );
        assert_eq!(path_to_string(&path), "social_links.0.url");
    }

    #[test]
    fn set_at_path_preserves_siblings_and_array_order() {
        let document = footer_document();
        let path = parse_path("social_links.facebook");

        let updated = set_at_path(
            &document,
            &path,
            Value::String("https://facebook.com/new".to_string()),
        )
        .expect("path exists");

        assert_eq!(
            updated["social_links"]["facebook"],
            "https://facebook.com/new"
        );
        // Sibling keys survive untouched.
        assert_eq!(
            updated["social_links"]["instagram"],
            "https://instagram.com/verdura"
        );
        assert_eq!(updated["quick_links"], json!(["Products", "Blog", "Contact"]));
        assert_eq!(updated["show_newsletter"], json!(true));
        // The original document is not mutated.
        assert_eq!(document["social_links"]["facebook"], "https://facebook.com/old");
    }

    #[test]
    fn set_at_path_rejects_missing_positions() {
        let document = footer_document();
        assert!(set_at_path(&document, &parse_path("social_links.twitter"), json!("x")).is_none());
        assert!(set_at_path(&document, &parse_path("quick_links.9"), json!("x")).is_none());
    }

    #[test]
    fn coerce_leaf_respects_existing_types() {
        assert_eq!(coerce_leaf(&json!(3), "5"), json!(5));
        assert_eq!(coerce_leaf(&json!(1.5), "2.25"), json!(2.25));
        assert_eq!(coerce_leaf(&json!(true), "off"), json!(false));
        assert_eq!(coerce_leaf(&json!("text"), "new text"), json!("new text"));
        // Unparsable numbers degrade to strings rather than failing.
        assert_eq!(coerce_leaf(&json!(3), "wide"), json!("wide"));
    }

    #[test]
    fn save_setting_requires_role() {
        struct NoRepo;
        impl SiteSettingReader for NoRepo {
            fn get_setting_by_id(&self, _: i32) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                unreachable!("must not be called")
            }
            fn get_setting_by_key(&self, _: &str) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                unreachable!("must not be called")
            }
            fn list_settings(&self) -> crate::repository::errors::RepositoryResult<Vec<SiteSetting>> {
                unreachable!("must not be called")
            }
        }
        impl SiteSettingWriter for NoRepo {
            fn create_setting(
                &self,
                _: &crate::domain::site_setting::NewSiteSetting,
            ) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                unreachable!("must not be called")
            }
            fn update_setting_value(&self, _: i32, _: &Value) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                unreachable!("must not be called")
            }
        }

        let user = AuthenticatedUser::new("viewer@example.com", "Viewer", Vec::new());
        let broker = ChangeBroker::new();

        let result = save_setting(&NoRepo, &user, &broker, 1, Vec::new());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn save_setting_splices_edit_and_publishes() {
        struct FakeRepo {
            reader: MockSiteSettingReader,
            writer: MockSiteSettingWriter,
        }
        impl SiteSettingReader for FakeRepo {
            fn get_setting_by_id(&self, id: i32) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                self.reader.get_setting_by_id(id)
            }
            fn get_setting_by_key(&self, key: &str) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                self.reader.get_setting_by_key(key)
            }
            fn list_settings(&self) -> crate::repository::errors::RepositoryResult<Vec<SiteSetting>> {
                self.reader.list_settings()
            }
        }
        impl SiteSettingWriter for FakeRepo {
            fn create_setting(
                &self,
                new_setting: &crate::domain::site_setting::NewSiteSetting,
            ) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                self.writer.create_setting(new_setting)
            }
            fn update_setting_value(&self, id: i32, value: &Value) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                self.writer.update_setting_value(id, value)
            }
        }

        let mut repo = FakeRepo {
            reader: MockSiteSettingReader::new(),
            writer: MockSiteSettingWriter::new(),
        };

        repo.reader
            .expect_get_setting_by_id()
            .times(1)
            .returning(|id| Ok(Some(setting(id, "footer", footer_document()))));

        repo.writer
            .expect_update_setting_value()
            .times(1)
            .withf(|id, value| {
                assert_eq!(*id, 7);
                assert_eq!(
                    value["social_links"]["facebook"],
                    "https://facebook.com/new"
                );
                assert_eq!(
                    value["social_links"]["instagram"],
                    "https://instagram.com/verdura"
                );
                assert_eq!(value["columns"], json!(4));
                true
            })
            .returning(|id, value| Ok(setting(id, "footer", value.clone())));

        let broker = ChangeBroker::new();
        let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let events_clone = std::sync::Arc::clone(&events);
        let _sub = broker.subscribe(TABLE, move |event| {
            events_clone
                .lock()
                .expect("events lock")
                .push(event.kind);
        });

        let edits = vec![
            (
                "social_links.facebook".to_string(),
                "https://facebook.com/new".to_string(),
            ),
            ("columns".to_string(), "4".to_string()),
        ];

        let updated = save_setting(&repo, &admin(), &broker, 7, edits).expect("expected success");
        assert_eq!(updated.value["columns"], json!(4));
        assert_eq!(events.lock().expect("events lock").len(), 1);
    }

    #[test]
    fn save_setting_rejects_unknown_path() {
        struct FakeRepo {
            reader: MockSiteSettingReader,
        }
        impl SiteSettingReader for FakeRepo {
            fn get_setting_by_id(&self, id: i32) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                self.reader.get_setting_by_id(id)
            }
            fn get_setting_by_key(&self, key: &str) -> crate::repository::errors::RepositoryResult<Option<SiteSetting>> {
                self.reader.get_setting_by_key(key)
            }
            fn list_settings(&self) -> crate::repository::errors::RepositoryResult<Vec<SiteSetting>> {
                self.reader.list_settings()
            }
        }
        impl SiteSettingWriter for FakeRepo {
            fn create_setting(
                &self,
                _: &crate::domain::site_setting::NewSiteSetting,
            ) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                unreachable!("must not be called")
            }
            fn update_setting_value(&self, _: i32, _: &Value) -> crate::repository::errors::RepositoryResult<SiteSetting> {
                unreachable!("no write on bad path")
            }
        }

        let mut reader = MockSiteSettingReader::new();
        reader
            .expect_get_setting_by_id()
            .returning(|id| Ok(Some(setting(id, "footer", footer_document()))));

        let repo = FakeRepo { reader };
        let broker = ChangeBroker::new();

        let edits = vec![("social_links.twitter".to_string(), "x".to_string())];
        let result = save_setting(&repo, &admin(), &broker, 7, edits);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
