use diesel::prelude::*;

use crate::domain::contact_submission::{
    ContactSubmission as DomainContactSubmission, ContactSubmissionListQuery,
    NewContactSubmission as DomainNewContactSubmission,
};
use crate::models::contact_submission::{
    ContactSubmission as DbContactSubmission, NewContactSubmission as DbNewContactSubmission,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactSubmissionReader, ContactSubmissionWriter, DieselRepository};
use crate::schema::contact_submissions;

impl ContactSubmissionReader for DieselRepository {
    fn list_contact_submissions(
        &self,
        query: ContactSubmissionListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainContactSubmission>)> {
        let mut conn = self.conn()?;

        let total = contact_submissions::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = contact_submissions::table
            .order(contact_submissions::created_at.desc())
            .into_boxed();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbContactSubmission>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl ContactSubmissionWriter for DieselRepository {
    fn create_contact_submission(
        &self,
        new_submission: &DomainNewContactSubmission,
    ) -> RepositoryResult<DomainContactSubmission> {
        let mut conn = self.conn()?;
        let db_new = DbNewContactSubmission::from(new_submission);

        let created = diesel::insert_into(contact_submissions::table)
            .values(&db_new)
            .get_result::<DbContactSubmission>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_contact_submission(&self, submission_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            contact_submissions::table.filter(contact_submissions::id.eq(submission_id)),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
