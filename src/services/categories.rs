use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "categories";

/// Load every category for the admin manager.
pub fn load_admin_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_categories(CategoryListQuery::new())
        .map_err(ServiceError::from)
}

pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_category: &NewCategory,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category = repo
        .create_category(new_category)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &category));
    Ok(category)
}

pub fn update_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    category_id: i32,
    updates: &UpdateCategory,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category = repo
        .update_category(category_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &category));
    Ok(category)
}

/// Delete a category. Products keep their rows; the foreign key clears
/// their `category_id` instead of cascading.
pub fn delete_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    category_id: i32,
) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category = repo
        .get_category_by_id(category_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_category(category_id)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &category));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::realtime::ChangeKind;
    use crate::repository::CategoryWriter as _;
    use crate::repository::mock::MockCategoryWriter;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new("admin@example.com", "Admin", vec!["admin".to_string()])
    }

    #[test]
    fn create_category_requires_role() {
        let repo = MockCategoryWriter::new();
        let broker = ChangeBroker::new();
        let user = AuthenticatedUser::new("viewer@example.com", "Viewer", Vec::new());

        let new_category = NewCategory {
            name: "Soaps".to_string(),
            description: None,
            image_url: None,
            display_order: 0,
        };

        let result = create_category(&repo, &user, &broker, &new_category);
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_category_publishes_insert_event() {
        let mut repo = MockCategoryWriter::new();
        repo.expect_create_category()
            .times(1)
            .returning(|new_category| {
                let at = chrono::NaiveDateTime::default();
                Ok(Category {
                    id: 3,
                    name: new_category.name.clone(),
                    description: new_category.description.clone(),
                    image_url: new_category.image_url.clone(),
                    display_order: new_category.display_order,
                    created_at: at,
                    updated_at: at,
                })
            });

        let broker = ChangeBroker::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let kinds_clone = Arc::clone(&kinds);
        let _sub = broker.subscribe(TABLE, move |event| {
            kinds_clone.lock().expect("kinds lock").push(event.kind);
        });

        let new_category = NewCategory {
            name: "Soaps".to_string(),
            description: None,
            image_url: None,
            display_order: 1,
        };

        let created =
            create_category(&repo, &admin(), &broker, &new_category).expect("expected success");
        assert_eq!(created.id, 3);
        assert_eq!(*kinds.lock().expect("kinds lock"), vec![ChangeKind::Insert]);
    }
}
