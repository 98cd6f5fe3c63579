use diesel::prelude::*;

use crate::domain::about_content::{
    AboutContent as DomainAboutContent, NewAboutContent as DomainNewAboutContent,
    UpdateAboutContent as DomainUpdateAboutContent,
};
use crate::models::about_content::{
    AboutContent as DbAboutContent, NewAboutContent as DbNewAboutContent,
    UpdateAboutContent as DbUpdateAboutContent,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AboutContentReader, AboutContentWriter, DieselRepository};
use crate::schema::about_content;

impl AboutContentReader for DieselRepository {
    fn get_about_content_by_id(&self, id: i32) -> RepositoryResult<Option<DomainAboutContent>> {
        let mut conn = self.conn()?;
        let content = about_content::table
            .filter(about_content::id.eq(id))
            .first::<DbAboutContent>(&mut conn)
            .optional()?;

        Ok(content.map(Into::into))
    }

    fn list_about_content(&self) -> RepositoryResult<Vec<DomainAboutContent>> {
        let mut conn = self.conn()?;

        let rows = about_content::table
            .order(about_content::order_index.asc())
            .load::<DbAboutContent>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl AboutContentWriter for DieselRepository {
    fn create_about_content(
        &self,
        new_content: &DomainNewAboutContent,
    ) -> RepositoryResult<DomainAboutContent> {
        let mut conn = self.conn()?;
        let db_new = DbNewAboutContent::from(new_content);

        let created = diesel::insert_into(about_content::table)
            .values(&db_new)
            .get_result::<DbAboutContent>(&mut conn)?;

        Ok(created.into())
    }

    fn update_about_content(
        &self,
        content_id: i32,
        updates: &DomainUpdateAboutContent,
    ) -> RepositoryResult<DomainAboutContent> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateAboutContent::from(updates);

        let updated = diesel::update(about_content::table.filter(about_content::id.eq(content_id)))
            .set(&db_updates)
            .get_result::<DbAboutContent>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_about_content(&self, content_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(about_content::table.filter(about_content::id.eq(content_id)))
                .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
