use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::blog_post::{
    BlogPost as DomainBlogPost, BlogPostListQuery, NewBlogPost as DomainNewBlogPost,
    UpdateBlogPost as DomainUpdateBlogPost,
};
use crate::models::blog_post::{
    BlogPost as DbBlogPost, NewBlogPost as DbNewBlogPost, UpdateBlogPost as DbUpdateBlogPost,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BlogPostReader, BlogPostWriter, DieselRepository};
use crate::schema::blog_posts;

fn apply_filters<'a>(
    query: &BlogPostListQuery,
    mut items: blog_posts::BoxedQuery<'a, Sqlite>,
) -> blog_posts::BoxedQuery<'a, Sqlite> {
    if query.published_only {
        items = items.filter(blog_posts::is_published.eq(true));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            blog_posts::title
                .like(pattern.clone())
                .or(blog_posts::summary.like(pattern)),
        );
    }

    items
}

impl BlogPostReader for DieselRepository {
    fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<DomainBlogPost>> {
        let mut conn = self.conn()?;
        let post = blog_posts::table
            .filter(blog_posts::id.eq(id))
            .first::<DbBlogPost>(&mut conn)
            .optional()?;

        Ok(post.map(Into::into))
    }

    fn list_blog_posts(
        &self,
        query: BlogPostListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainBlogPost>)> {
        let mut conn = self.conn()?;

        let count_query = apply_filters(&query, blog_posts::table.into_boxed());
        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = apply_filters(&query, blog_posts::table.into_boxed()).order((
            blog_posts::published_at.desc(),
            blog_posts::created_at.desc(),
        ));

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_posts = items.load::<DbBlogPost>(&mut conn)?;

        Ok((total, db_posts.into_iter().map(Into::into).collect()))
    }
}

impl BlogPostWriter for DieselRepository {
    fn create_blog_post(&self, new_post: &DomainNewBlogPost) -> RepositoryResult<DomainBlogPost> {
        let mut conn = self.conn()?;
        let db_new = DbNewBlogPost::from(new_post);

        let created = diesel::insert_into(blog_posts::table)
            .values(&db_new)
            .get_result::<DbBlogPost>(&mut conn)?;

        Ok(created.into())
    }

    fn update_blog_post(
        &self,
        post_id: i32,
        updates: &DomainUpdateBlogPost,
    ) -> RepositoryResult<DomainBlogPost> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateBlogPost::from(updates);

        let updated = diesel::update(blog_posts::table.filter(blog_posts::id.eq(post_id)))
            .set(&db_updates)
            .get_result::<DbBlogPost>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(blog_posts::table.filter(blog_posts::id.eq(post_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
