use diesel::prelude::*;

use crate::domain::contact_info::{
    ContactInfo as DomainContactInfo, NewContactInfo as DomainNewContactInfo,
    UpdateContactInfo as DomainUpdateContactInfo,
};
use crate::models::contact_info::{
    ContactInfo as DbContactInfo, NewContactInfo as DbNewContactInfo,
    UpdateContactInfo as DbUpdateContactInfo,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactInfoReader, ContactInfoWriter, DieselRepository};
use crate::schema::contact_info;

impl ContactInfoReader for DieselRepository {
    fn get_contact_info_by_id(&self, id: i32) -> RepositoryResult<Option<DomainContactInfo>> {
        let mut conn = self.conn()?;
        let info = contact_info::table
            .filter(contact_info::id.eq(id))
            .first::<DbContactInfo>(&mut conn)
            .optional()?;

        Ok(info.map(Into::into))
    }

    fn list_contact_info(&self) -> RepositoryResult<Vec<DomainContactInfo>> {
        let mut conn = self.conn()?;

        let rows = contact_info::table
            .order((contact_info::is_primary.desc(), contact_info::kind.asc()))
            .load::<DbContactInfo>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ContactInfoWriter for DieselRepository {
    fn create_contact_info(
        &self,
        new_info: &DomainNewContactInfo,
    ) -> RepositoryResult<DomainContactInfo> {
        let mut conn = self.conn()?;
        let db_new = DbNewContactInfo::from(new_info);

        let created = diesel::insert_into(contact_info::table)
            .values(&db_new)
            .get_result::<DbContactInfo>(&mut conn)?;

        Ok(created.into())
    }

    fn update_contact_info(
        &self,
        info_id: i32,
        updates: &DomainUpdateContactInfo,
    ) -> RepositoryResult<DomainContactInfo> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateContactInfo::from(updates);

        let updated = diesel::update(contact_info::table.filter(contact_info::id.eq(info_id)))
            .set(&db_updates)
            .get_result::<DbContactInfo>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_contact_info(&self, info_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(contact_info::table.filter(contact_info::id.eq(info_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
