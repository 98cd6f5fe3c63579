use crate::SERVICE_ACCESS_ROLE;
use crate::auth::{AuthenticatedUser, check_role};
use crate::domain::blog_post::{BlogPost, BlogPostListQuery, NewBlogPost, UpdateBlogPost};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::realtime::{ChangeBroker, ChangeEvent};
use crate::repository::{BlogPostReader, BlogPostWriter};
use crate::services::{ServiceError, ServiceResult};

const TABLE: &str = "blog_posts";

/// Load published posts for the public blog index, newest first.
pub fn load_blog_page<R>(
    repo: &R,
    search: Option<&str>,
    page: usize,
) -> ServiceResult<Paginated<BlogPost>>
where
    R: BlogPostReader + ?Sized,
{
    let mut query = BlogPostListQuery::new()
        .published_only()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
        query = query.search(term.trim());
    }

    let (total, posts) = repo.list_blog_posts(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(posts, page, total_pages))
}

/// Load one published post for the public detail page. Drafts stay hidden
/// even when the id is known.
pub fn load_blog_post<R>(repo: &R, post_id: i32) -> ServiceResult<BlogPost>
where
    R: BlogPostReader + ?Sized,
{
    repo.get_blog_post_by_id(post_id)
        .map_err(ServiceError::from)?
        .filter(|post| post.is_published)
        .ok_or(ServiceError::NotFound)
}

/// Load every post, drafts included, for the admin manager.
pub fn load_admin_blog_posts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<Paginated<BlogPost>>
where
    R: BlogPostReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let query = BlogPostListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, posts) = repo.list_blog_posts(query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(posts, page, total_pages))
}

/// Load one post for the admin edit form, draft or not.
pub fn load_admin_blog_post<R>(
    repo: &R,
    user: &AuthenticatedUser,
    post_id: i32,
) -> ServiceResult<BlogPost>
where
    R: BlogPostReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_blog_post_by_id(post_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_blog_post<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    new_post: &NewBlogPost,
) -> ServiceResult<BlogPost>
where
    R: BlogPostWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let post = repo.create_blog_post(new_post).map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::insert(TABLE, &post));
    Ok(post)
}

pub fn update_blog_post<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    post_id: i32,
    updates: &UpdateBlogPost,
) -> ServiceResult<BlogPost>
where
    R: BlogPostWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let post = repo
        .update_blog_post(post_id, updates)
        .map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::update(TABLE, &post));
    Ok(post)
}

pub fn delete_blog_post<R>(
    repo: &R,
    user: &AuthenticatedUser,
    broker: &ChangeBroker,
    post_id: i32,
) -> ServiceResult<()>
where
    R: BlogPostReader + BlogPostWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let post = repo
        .get_blog_post_by_id(post_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_blog_post(post_id).map_err(ServiceError::from)?;
    broker.publish(ChangeEvent::delete(TABLE, &post));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::repository::BlogPostReader as _;
    use crate::repository::mock::MockBlogPostReader;

    fn post(id: i32, title: &str, is_published: bool) -> BlogPost {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        BlogPost {
            id,
            title: title.to_string(),
            content: "body".to_string(),
            summary: None,
            cover_image_url: None,
            author: "Verdura Team".to_string(),
            is_published,
            published_at: is_published.then_some(at),
            tags: vec!["skincare".to_string()],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn public_blog_requests_published_posts_only() {
        let mut repo = MockBlogPostReader::new();
        repo.expect_list_blog_posts()
            .withf(|query| query.published_only)
            .returning(|_| Ok((1, vec![post(1, "Why neem works", true)])));

        let page = load_blog_page(&repo, None, 1).expect("expected success");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn public_detail_hides_drafts() {
        let mut repo = MockBlogPostReader::new();
        repo.expect_get_blog_post_by_id()
            .returning(|id| Ok(Some(post(id, "Draft", false))));

        let result = load_blog_post(&repo, 4);
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn admin_listing_requires_role() {
        let repo = MockBlogPostReader::new();
        let user = AuthenticatedUser::new("viewer@example.com", "Viewer", Vec::new());

        let result = load_admin_blog_posts(&repo, &user, 1);
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
