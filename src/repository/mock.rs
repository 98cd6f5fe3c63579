use mockall::mock;
use serde_json::Value;

use super::{
    AboutContentReader, AboutContentWriter, BlogPostReader, BlogPostWriter, CategoryReader,
    CategoryWriter, ContactInfoReader, ContactInfoWriter, ContactSubmissionReader,
    ContactSubmissionWriter, ProductReader, ProductWriter, SiteSettingReader, SiteSettingWriter,
    TestimonialReader, TestimonialWriter,
};
use crate::domain::{
    about_content::{AboutContent, NewAboutContent, UpdateAboutContent},
    blog_post::{BlogPost, BlogPostListQuery, NewBlogPost, UpdateBlogPost},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    contact_info::{ContactInfo, NewContactInfo, UpdateContactInfo},
    contact_submission::{ContactSubmission, ContactSubmissionListQuery, NewContactSubmission},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    site_setting::{NewSiteSetting, SiteSetting},
    testimonial::{NewTestimonial, Testimonial, TestimonialListQuery, UpdateTestimonial},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub BlogPostReader {}

    impl BlogPostReader for BlogPostReader {
        fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<BlogPost>>;
        fn list_blog_posts(&self, query: BlogPostListQuery) -> RepositoryResult<(usize, Vec<BlogPost>)>;
    }
}

mock! {
    pub BlogPostWriter {}

    impl BlogPostWriter for BlogPostWriter {
        fn create_blog_post(&self, new_post: &NewBlogPost) -> RepositoryResult<BlogPost>;
        fn update_blog_post(&self, post_id: i32, updates: &UpdateBlogPost) -> RepositoryResult<BlogPost>;
        fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub TestimonialReader {}

    impl TestimonialReader for TestimonialReader {
        fn get_testimonial_by_id(&self, id: i32) -> RepositoryResult<Option<Testimonial>>;
        fn list_testimonials(&self, query: TestimonialListQuery) -> RepositoryResult<Vec<Testimonial>>;
    }
}

mock! {
    pub TestimonialWriter {}

    impl TestimonialWriter for TestimonialWriter {
        fn create_testimonial(&self, new_testimonial: &NewTestimonial) -> RepositoryResult<Testimonial>;
        fn update_testimonial(&self, testimonial_id: i32, updates: &UpdateTestimonial) -> RepositoryResult<Testimonial>;
        fn delete_testimonial(&self, testimonial_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ContactInfoReader {}

    impl ContactInfoReader for ContactInfoReader {
        fn get_contact_info_by_id(&self, id: i32) -> RepositoryResult<Option<ContactInfo>>;
        fn list_contact_info(&self) -> RepositoryResult<Vec<ContactInfo>>;
    }
}

mock! {
    pub ContactInfoWriter {}

    impl ContactInfoWriter for ContactInfoWriter {
        fn create_contact_info(&self, new_info: &NewContactInfo) -> RepositoryResult<ContactInfo>;
        fn update_contact_info(&self, info_id: i32, updates: &UpdateContactInfo) -> RepositoryResult<ContactInfo>;
        fn delete_contact_info(&self, info_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ContactSubmissionReader {}

    impl ContactSubmissionReader for ContactSubmissionReader {
        fn list_contact_submissions(&self, query: ContactSubmissionListQuery) -> RepositoryResult<(usize, Vec<ContactSubmission>)>;
    }
}

mock! {
    pub ContactSubmissionWriter {}

    impl ContactSubmissionWriter for ContactSubmissionWriter {
        fn create_contact_submission(&self, new_submission: &NewContactSubmission) -> RepositoryResult<ContactSubmission>;
        fn delete_contact_submission(&self, submission_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub AboutContentReader {}

    impl AboutContentReader for AboutContentReader {
        fn get_about_content_by_id(&self, id: i32) -> RepositoryResult<Option<AboutContent>>;
        fn list_about_content(&self) -> RepositoryResult<Vec<AboutContent>>;
    }
}

mock! {
    pub AboutContentWriter {}

    impl AboutContentWriter for AboutContentWriter {
        fn create_about_content(&self, new_content: &NewAboutContent) -> RepositoryResult<AboutContent>;
        fn update_about_content(&self, content_id: i32, updates: &UpdateAboutContent) -> RepositoryResult<AboutContent>;
        fn delete_about_content(&self, content_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub SiteSettingReader {}

    impl SiteSettingReader for SiteSettingReader {
        fn get_setting_by_id(&self, id: i32) -> RepositoryResult<Option<SiteSetting>>;
        fn get_setting_by_key(&self, key: &str) -> RepositoryResult<Option<SiteSetting>>;
        fn list_settings(&self) -> RepositoryResult<Vec<SiteSetting>>;
    }
}

mock! {
    pub SiteSettingWriter {}

    impl SiteSettingWriter for SiteSettingWriter {
        fn create_setting(&self, new_setting: &NewSiteSetting) -> RepositoryResult<SiteSetting>;
        fn update_setting_value(&self, setting_id: i32, value: &Value) -> RepositoryResult<SiteSetting>;
    }
}
