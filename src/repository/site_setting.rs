use chrono::Local;
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::site_setting::{
    NewSiteSetting as DomainNewSiteSetting, SiteSetting as DomainSiteSetting,
};
use crate::models::site_setting::{
    NewSiteSetting as DbNewSiteSetting, SiteSetting as DbSiteSetting, UpdateSiteSettingValue,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SiteSettingReader, SiteSettingWriter};
use crate::schema::site_settings;

impl SiteSettingReader for DieselRepository {
    fn get_setting_by_id(&self, id: i32) -> RepositoryResult<Option<DomainSiteSetting>> {
        let mut conn = self.conn()?;
        let setting = site_settings::table
            .filter(site_settings::id.eq(id))
            .first::<DbSiteSetting>(&mut conn)
            .optional()?;

        Ok(setting.map(Into::into))
    }

    fn get_setting_by_key(&self, key: &str) -> RepositoryResult<Option<DomainSiteSetting>> {
        let mut conn = self.conn()?;
        let setting = site_settings::table
            .filter(site_settings::key.eq(key))
            .first::<DbSiteSetting>(&mut conn)
            .optional()?;

        Ok(setting.map(Into::into))
    }

    fn list_settings(&self) -> RepositoryResult<Vec<DomainSiteSetting>> {
        let mut conn = self.conn()?;

        let rows = site_settings::table
            .order(site_settings::key.asc())
            .load::<DbSiteSetting>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl SiteSettingWriter for DieselRepository {
    fn create_setting(
        &self,
        new_setting: &DomainNewSiteSetting,
    ) -> RepositoryResult<DomainSiteSetting> {
        let mut conn = self.conn()?;
        let db_new = DbNewSiteSetting::from(new_setting);

        let created = diesel::insert_into(site_settings::table)
            .values(&db_new)
            .get_result::<DbSiteSetting>(&mut conn)?;

        Ok(created.into())
    }

    fn update_setting_value(
        &self,
        setting_id: i32,
        value: &Value,
    ) -> RepositoryResult<DomainSiteSetting> {
        let mut conn = self.conn()?;
        let db_updates = UpdateSiteSettingValue {
            value: value.to_string(),
            updated_at: Local::now().naive_utc(),
        };

        let updated = diesel::update(site_settings::table.filter(site_settings::id.eq(setting_id)))
            .set(&db_updates)
            .get_result::<DbSiteSetting>(&mut conn)?;

        Ok(updated.into())
    }
}
