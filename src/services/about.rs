use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::about_content::{AboutContent, NewAboutContent, UpdateAboutContent};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{AboutContentReader, AboutContentWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "about_content";

/// Load the about page sections in display order.
pub fn load_about_sections<R>(repo: &R) -> ServiceResult<Vec<AboutContent>>
where
    R: AboutContentReader + ?Sized,
{
    repo.list_about_content().map_err(ServiceError::from)
}

/// Load the about page sections for the admin manager.
pub fn load_admin_about_sections<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<AboutContent>>
where
    R: AboutContentReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_about_content().map_err(ServiceError::from)
}

pub fn create_about_section<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_content: &NewAboutContent,
) -> ServiceResult<AboutContent>
where
    R: AboutContentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let content = repo
        .create_about_content(new_content)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &content));
    Ok(content)
}

pub fn update_about_section<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    content_id: i32,
    updates: &UpdateAboutContent,
) -> ServiceResult<AboutContent>
where
    R: AboutContentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let content = repo
        .update_about_content(content_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &content));
    Ok(content)
}

pub fn delete_about_section<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    content_id: i32,
) -> ServiceResult<()>
where
    R: AboutContentReader + AboutContentWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let content = repo
        .get_about_content_by_id(content_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_about_content(content_id)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &content));
    Ok(())
}
