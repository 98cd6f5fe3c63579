use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::testimonial::{
    NewTestimonial, Testimonial, TestimonialListQuery, UpdateTestimonial,
};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{TestimonialReader, TestimonialWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "testimonials";

/// Load every testimonial for the admin manager.
pub fn load_admin_testimonials<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Testimonial>>
where
    R: TestimonialReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_testimonials(TestimonialListQuery::new())
        .map_err(ServiceError::from)
}

pub fn create_testimonial<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_testimonial: &NewTestimonial,
) -> ServiceResult<Testimonial>
where
    R: TestimonialWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let testimonial = repo
        .create_testimonial(new_testimonial)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &testimonial));
    Ok(testimonial)
}

pub fn update_testimonial<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    testimonial_id: i32,
    updates: &UpdateTestimonial,
) -> ServiceResult<Testimonial>
where
    R: TestimonialWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let testimonial = repo
        .update_testimonial(testimonial_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &testimonial));
    Ok(testimonial)
}

pub fn delete_testimonial<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    testimonial_id: i32,
) -> ServiceResult<()>
where
    R: TestimonialReader + TestimonialWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let testimonial = repo
        .get_testimonial_by_id(testimonial_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_testimonial(testimonial_id)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &testimonial));
    Ok(())
}
