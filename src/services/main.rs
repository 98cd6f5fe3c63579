use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::ProductListQuery;
use crate::domain::testimonial::{Testimonial, TestimonialListQuery};
use crate::repository::{CategoryReader, ProductReader, TestimonialReader};
use crate::services::products::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// How many featured products the home page shows.
const FEATURED_PRODUCT_LIMIT: usize = 8;

/// Data required to render the home page.
#[derive(Debug, Serialize)]
pub struct HomePageData {
    pub featured_products: Vec<ProductView>,
    pub categories: Vec<Category>,
    pub testimonials: Vec<Testimonial>,
}

/// Load the home page: featured available products, the category tiles and
/// the featured testimonials.
pub fn load_home_page<R>(repo: &R) -> ServiceResult<HomePageData>
where
    R: ProductReader + CategoryReader + TestimonialReader + ?Sized,
{
    let categories = repo
        .list_categories(Default::default())
        .map_err(ServiceError::from)?;

    let query = ProductListQuery::new()
        .only_available()
        .only_featured()
        .paginate(1, FEATURED_PRODUCT_LIMIT);
    let (_, products) = repo.list_products(query).map_err(ServiceError::from)?;
    let featured_products = products
        .into_iter()
        .map(|product| ProductView::new(product, &categories))
        .collect();

    let testimonials = repo
        .list_testimonials(TestimonialListQuery::new().featured_only())
        .map_err(ServiceError::from)?;

    Ok(HomePageData {
        featured_products,
        categories,
        testimonials,
    })
}
