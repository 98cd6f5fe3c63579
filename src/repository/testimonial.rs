use diesel::prelude::*;

use crate::domain::testimonial::{
    NewTestimonial as DomainNewTestimonial, Testimonial as DomainTestimonial,
    TestimonialListQuery, UpdateTestimonial as DomainUpdateTestimonial,
};
use crate::models::testimonial::{
    NewTestimonial as DbNewTestimonial, Testimonial as DbTestimonial,
    UpdateTestimonial as DbUpdateTestimonial,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TestimonialReader, TestimonialWriter};
use crate::schema::testimonials;

impl TestimonialReader for DieselRepository {
    fn get_testimonial_by_id(&self, id: i32) -> RepositoryResult<Option<DomainTestimonial>> {
        let mut conn = self.conn()?;
        let testimonial = testimonials::table
            .filter(testimonials::id.eq(id))
            .first::<DbTestimonial>(&mut conn)
            .optional()?;

        Ok(testimonial.map(Into::into))
    }

    fn list_testimonials(
        &self,
        query: TestimonialListQuery,
    ) -> RepositoryResult<Vec<DomainTestimonial>> {
        let mut conn = self.conn()?;

        let mut items = testimonials::table.into_boxed();

        if query.featured_only {
            items = items.filter(testimonials::is_featured.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items = items.filter(
                testimonials::name
                    .like(pattern.clone())
                    .or(testimonials::quote.like(pattern)),
            );
        }

        let rows = items
            .order(testimonials::created_at.desc())
            .load::<DbTestimonial>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl TestimonialWriter for DieselRepository {
    fn create_testimonial(
        &self,
        new_testimonial: &DomainNewTestimonial,
    ) -> RepositoryResult<DomainTestimonial> {
        let mut conn = self.conn()?;
        let db_new = DbNewTestimonial::from(new_testimonial);

        let created = diesel::insert_into(testimonials::table)
            .values(&db_new)
            .get_result::<DbTestimonial>(&mut conn)?;

        Ok(created.into())
    }

    fn update_testimonial(
        &self,
        testimonial_id: i32,
        updates: &DomainUpdateTestimonial,
    ) -> RepositoryResult<DomainTestimonial> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateTestimonial::from(updates);

        let updated =
            diesel::update(testimonials::table.filter(testimonials::id.eq(testimonial_id)))
                .set(&db_updates)
                .get_result::<DbTestimonial>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_testimonial(&self, testimonial_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(testimonials::table.filter(testimonials::id.eq(testimonial_id)))
                .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
