pub mod about_content;
pub mod blog_post;
pub mod category;
pub mod contact_info;
pub mod contact_submission;
pub mod product;
pub mod site_setting;
pub mod testimonial;
