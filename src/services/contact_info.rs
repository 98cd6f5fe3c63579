use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::contact_info::{ContactInfo, NewContactInfo, UpdateContactInfo};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{ContactInfoReader, ContactInfoWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "contact_info";

/// Load the contact channels for the public contact page, primary first.
pub fn load_contact_channels<R>(repo: &R) -> ServiceResult<Vec<ContactInfo>>
where
    R: ContactInfoReader + ?Sized,
{
    repo.list_contact_info().map_err(ServiceError::from)
}

/// Load the contact channels for the admin manager.
pub fn load_admin_contact_channels<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<ContactInfo>>
where
    R: ContactInfoReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_contact_info().map_err(ServiceError::from)
}

pub fn create_contact_channel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_info: &NewContactInfo,
) -> ServiceResult<ContactInfo>
where
    R: ContactInfoWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let info = repo
        .create_contact_info(new_info)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &info));
    Ok(info)
}

pub fn update_contact_channel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    info_id: i32,
    updates: &UpdateContactInfo,
) -> ServiceResult<ContactInfo>
where
    R: ContactInfoWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let info = repo
        .update_contact_info(info_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &info));
    Ok(info)
}

pub fn delete_contact_channel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    info_id: i32,
) -> ServiceResult<()>
where
    R: ContactInfoReader + ContactInfoWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let info = repo
        .get_contact_info_by_id(info_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_contact_info(info_id)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &info));
    Ok(())
}
