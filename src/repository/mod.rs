use serde_json::Value;

use crate::db::{DbConnection, DbPool};
use crate::domain::about_content::{AboutContent, NewAboutContent, UpdateAboutContent};
use crate::domain::blog_post::{BlogPost, BlogPostListQuery, NewBlogPost, UpdateBlogPost};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::contact_info::{ContactInfo, NewContactInfo, UpdateContactInfo};
use crate::domain::contact_submission::{
    ContactSubmission, ContactSubmissionListQuery, NewContactSubmission,
};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::site_setting::{NewSiteSetting, SiteSetting};
use crate::domain::testimonial::{NewTestimonial, Testimonial, TestimonialListQuery, UpdateTestimonial};
use errors::RepositoryResult;

pub mod errors;

mod about_content;
mod blog_post;
mod category;
mod contact_info;
mod contact_submission;
mod product;
mod site_setting;
mod testimonial;

#[cfg(test)]
pub mod mock;

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over category records.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over blog post records.
pub trait BlogPostReader {
    fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<BlogPost>>;
    fn list_blog_posts(&self, query: BlogPostListQuery)
    -> RepositoryResult<(usize, Vec<BlogPost>)>;
}

/// Write operations over blog post records.
pub trait BlogPostWriter {
    fn create_blog_post(&self, new_post: &NewBlogPost) -> RepositoryResult<BlogPost>;
    fn update_blog_post(&self, post_id: i32, updates: &UpdateBlogPost)
    -> RepositoryResult<BlogPost>;
    fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over testimonial records.
pub trait TestimonialReader {
    fn get_testimonial_by_id(&self, id: i32) -> RepositoryResult<Option<Testimonial>>;
    fn list_testimonials(&self, query: TestimonialListQuery) -> RepositoryResult<Vec<Testimonial>>;
}

/// Write operations over testimonial records.
pub trait TestimonialWriter {
    fn create_testimonial(&self, new_testimonial: &NewTestimonial)
    -> RepositoryResult<Testimonial>;
    fn update_testimonial(
        &self,
        testimonial_id: i32,
        updates: &UpdateTestimonial,
    ) -> RepositoryResult<Testimonial>;
    fn delete_testimonial(&self, testimonial_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over contact info records.
pub trait ContactInfoReader {
    fn get_contact_info_by_id(&self, id: i32) -> RepositoryResult<Option<ContactInfo>>;
    fn list_contact_info(&self) -> RepositoryResult<Vec<ContactInfo>>;
}

/// Write operations over contact info records.
pub trait ContactInfoWriter {
    fn create_contact_info(&self, new_info: &NewContactInfo) -> RepositoryResult<ContactInfo>;
    fn update_contact_info(
        &self,
        info_id: i32,
        updates: &UpdateContactInfo,
    ) -> RepositoryResult<ContactInfo>;
    fn delete_contact_info(&self, info_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over contact submissions.
pub trait ContactSubmissionReader {
    fn list_contact_submissions(
        &self,
        query: ContactSubmissionListQuery,
    ) -> RepositoryResult<(usize, Vec<ContactSubmission>)>;
}

/// Write operations over contact submissions. Submissions are append-only,
/// so there is no update operation.
pub trait ContactSubmissionWriter {
    fn create_contact_submission(
        &self,
        new_submission: &NewContactSubmission,
    ) -> RepositoryResult<ContactSubmission>;
    fn delete_contact_submission(&self, submission_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over about page sections.
pub trait AboutContentReader {
    fn get_about_content_by_id(&self, id: i32) -> RepositoryResult<Option<AboutContent>>;
    fn list_about_content(&self) -> RepositoryResult<Vec<AboutContent>>;
}

/// Write operations over about page sections.
pub trait AboutContentWriter {
    fn create_about_content(&self, new_content: &NewAboutContent)
    -> RepositoryResult<AboutContent>;
    fn update_about_content(
        &self,
        content_id: i32,
        updates: &UpdateAboutContent,
    ) -> RepositoryResult<AboutContent>;
    fn delete_about_content(&self, content_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over site settings.
pub trait SiteSettingReader {
    fn get_setting_by_id(&self, id: i32) -> RepositoryResult<Option<SiteSetting>>;
    fn get_setting_by_key(&self, key: &str) -> RepositoryResult<Option<SiteSetting>>;
    fn list_settings(&self) -> RepositoryResult<Vec<SiteSetting>>;
}

/// Write operations over site settings. The admin UI edits values only;
/// rows are seeded by migrations or created programmatically.
pub trait SiteSettingWriter {
    fn create_setting(&self, new_setting: &NewSiteSetting) -> RepositoryResult<SiteSetting>;
    fn update_setting_value(&self, setting_id: i32, value: &Value)
    -> RepositoryResult<SiteSetting>;
}
