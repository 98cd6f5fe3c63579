use serde::Serialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::category::Category;
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "products";

/// Product decorated with display fields for templates.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Price rendered as decimal text, e.g. `₹249.00`.
    pub price_formatted: String,
    /// Name of the owning category, when assigned.
    pub category_name: Option<String>,
}

impl ProductView {
    pub fn new(product: Product, categories: &[Category]) -> Self {
        let category_name = product.category_id.and_then(|id| {
            categories
                .iter()
                .find(|category| category.id == id)
                .map(|category| category.name.clone())
        });
        let price_formatted = format_price(product.price_cents);
        Self {
            product,
            price_formatted,
            category_name,
        }
    }
}

/// Render a price in the smallest currency unit as decimal rupee text.
pub fn format_price(cents: i32) -> String {
    format!("₹{}.{:02}", cents / 100, cents % 100)
}

/// Data required to render the public catalog page.
#[derive(Debug, Serialize)]
pub struct CatalogPageData {
    pub products: Paginated<ProductView>,
    pub categories: Vec<Category>,
    /// Category resolved from the URL filter, when one matched.
    pub active_category: Option<Category>,
    pub search: Option<String>,
}

/// Load the public catalog.
///
/// `filter` carries the raw `category`/`filter_by` URL value and is matched
/// against category slugs and names. A filter that matches no category
/// yields an empty page rather than the full catalog, so stale links do not
/// silently show everything.
pub fn load_catalog_page<R>(
    repo: &R,
    filter: Option<&str>,
    search: Option<&str>,
    page: usize,
) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let categories = repo
        .list_categories(Default::default())
        .map_err(ServiceError::from)?;

    let active_category = match filter {
        Some(value) if !value.trim().is_empty() => {
            let matched = categories
                .iter()
                .find(|category| category.matches_filter(value))
                .cloned();
            if matched.is_none() {
                return Ok(CatalogPageData {
                    products: Paginated::new(Vec::new(), page, 0),
                    categories,
                    active_category: None,
                    search: search.map(str::to_string),
                });
            }
            matched
        }
        _ => None,
    };

    let mut query = ProductListQuery::new()
        .only_available()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(category) = &active_category {
        query = query.category(category.id);
    }
    if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
        query = query.search(term.trim());
    }

    let (total, products) = repo.list_products(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let views = products
        .into_iter()
        .map(|product| ProductView::new(product, &categories))
        .collect();

    Ok(CatalogPageData {
        products: Paginated::new(views, page, total_pages),
        categories,
        active_category,
        search: search.map(str::to_string),
    })
}

/// Load one available product for the public detail page.
pub fn load_product_detail<R>(repo: &R, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .filter(|product| product.is_available)
        .ok_or(ServiceError::NotFound)?;

    let categories = repo
        .list_categories(Default::default())
        .map_err(ServiceError::from)?;

    Ok(ProductView::new(product, &categories))
}

/// Data required to render the admin product manager.
#[derive(Debug, Serialize)]
pub struct AdminProductsPage {
    pub products: Paginated<ProductView>,
    /// Categories offered in the edit form select.
    pub categories: Vec<Category>,
}

/// Load every product, including unavailable ones, for the admin manager.
pub fn load_admin_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<AdminProductsPage>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo
        .list_categories(Default::default())
        .map_err(ServiceError::from)?;

    let query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, products) = repo.list_products(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let views = products
        .into_iter()
        .map(|product| ProductView::new(product, &categories))
        .collect();

    Ok(AdminProductsPage {
        products: Paginated::new(views, page, total_pages),
        categories,
    })
}

pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_product: &NewProduct,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo.create_product(new_product).map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &product));
    Ok(product)
}

pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    product_id: i32,
    updates: &UpdateProduct,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .update_product(product_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &product));
    Ok(product)
}

/// Delete a product. The change event carries the deleted row so listeners
/// can tell which record disappeared.
pub fn delete_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_product(product_id).map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &product));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    use crate::domain::category::CategoryListQuery;
    use crate::realtime::ChangeKind;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockCategoryReader, MockProductReader, MockProductWriter};
    use crate::repository::{
        CategoryReader as _, ProductReader as _, ProductWriter as _,
    };

    struct FakeRepo {
        products: MockProductReader,
        product_writes: MockProductWriter,
        categories: MockCategoryReader,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                products: MockProductReader::new(),
                product_writes: MockProductWriter::new(),
                categories: MockCategoryReader::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.products.get_product_by_id(id)
        }
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
            self.products.list_products(query)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.product_writes.create_product(new_product)
        }
        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.product_writes.update_product(product_id, updates)
        }
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
            self.product_writes.delete_product(product_id)
        }
    }

    impl CategoryReader for FakeRepo {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
            self.categories.get_category_by_id(id)
        }
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
            self.categories.list_categories(query)
        }
    }

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
            display_order: 0,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn product(id: i32, name: &str, category_id: Option<i32>) -> Product {
        Product {
            id,
            category_id,
            name: name.to_string(),
            description: None,
            image_url: None,
            price_cents: 24900,
            is_available: true,
            is_featured: false,
            display_order: 0,
            ingredients: None,
            usage_instructions: None,
            benefits: None,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new("admin@example.com", "Admin", vec!["admin".to_string()])
    }

    #[test]
    fn format_price_renders_cents() {
        assert_eq!(format_price(24900), "₹249.00");
        assert_eq!(format_price(105), "₹1.05");
        assert_eq!(format_price(9), "₹0.09");
    }

    #[test]
    fn catalog_filter_resolves_slug_to_category() {
        let mut repo = FakeRepo::new();
        repo.categories
            .expect_list_categories()
            .returning(|_| Ok(vec![category(1, "Essential Oils"), category(2, "Soaps")]));
        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| query.category_id == Some(1) && query.only_available)
            .returning(|_| Ok((1, vec![product(10, "Lavender Oil", Some(1))])));

        let data =
            load_catalog_page(&repo, Some("essential-oils"), None, 1).expect("expected success");

        assert_eq!(
            data.active_category.as_ref().map(|c| c.id),
            Some(1)
        );
        assert_eq!(data.products.items.len(), 1);
        assert_eq!(
            data.products.items[0].category_name.as_deref(),
            Some("Essential Oils")
        );
    }

    #[test]
    fn catalog_filter_accepts_plain_name() {
        let mut repo = FakeRepo::new();
        repo.categories
            .expect_list_categories()
            .returning(|_| Ok(vec![category(2, "Soaps")]));
        repo.products
            .expect_list_products()
            .withf(|query| query.category_id == Some(2))
            .returning(|_| Ok((0, Vec::new())));

        let data = load_catalog_page(&repo, Some("Soaps"), None, 1).expect("expected success");
        assert_eq!(data.active_category.as_ref().map(|c| c.id), Some(2));
    }

    #[test]
    fn catalog_unknown_filter_yields_empty_page() {
        let mut repo = FakeRepo::new();
        repo.categories
            .expect_list_categories()
            .returning(|_| Ok(vec![category(1, "Essential Oils")]));
        // No list_products expectation: the query must never run.

        let data = load_catalog_page(&repo, Some("candles"), None, 1).expect("expected success");

        assert!(data.products.items.is_empty());
        assert!(data.active_category.is_none());
    }

    #[test]
    fn product_detail_hides_unavailable_products() {
        let mut repo = FakeRepo::new();
        repo.products.expect_get_product_by_id().returning(|id| {
            let mut item = product(id, "Neem Soap", None);
            item.is_available = false;
            Ok(Some(item))
        });

        let result = load_product_detail(&repo, 5);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_product_requires_role() {
        let repo = FakeRepo::new();
        let broker = ChangeBroker::new();
        let user = AuthenticatedUser::new("viewer@example.com", "Viewer", Vec::new());

        let result = create_product(&repo, &user, &broker, &NewProduct::new("Oil", 100));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_product_publishes_insert_event() {
        let mut repo = FakeRepo::new();
        repo.product_writes
            .expect_create_product()
            .times(1)
            .returning(|new_product| {
                Ok(product(42, &new_product.name, new_product.category_id))
            });

        let broker = ChangeBroker::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let _sub = broker.subscribe(TABLE, move |event| {
            events_clone.lock().expect("events lock").push(event.clone());
        });

        let created = create_product(
            &repo,
            &admin(),
            &broker,
            &NewProduct::new("Lavender Oil", 24900),
        )
        .expect("expected success");

        assert_eq!(created.id, 42);
        let events = events.lock().expect("events lock");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Insert);
    }

    #[test]
    fn delete_product_publishes_old_row() {
        let mut repo = FakeRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(product(id, "Neem Soap", None))));
        repo.product_writes
            .expect_delete_product()
            .times(1)
            .returning(|_| Ok(()));

        let broker = ChangeBroker::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let _sub = broker.subscribe(TABLE, move |event| {
            events_clone.lock().expect("events lock").push(event.clone());
        });

        delete_product(&repo, &admin(), &broker, 7).expect("expected success");

        let events = events.lock().expect("events lock");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Delete);
        assert_eq!(events[0].old["name"], "Neem Soap");
        assert!(events[0].new.is_null());
    }

    #[test]
    fn delete_missing_product_is_not_found() {
        let mut repo = FakeRepo::new();
        repo.products
            .expect_get_product_by_id()
            .returning(|_| Ok(None));

        let broker = ChangeBroker::new();
        let result = delete_product(&repo, &admin(), &broker, 99);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
