//! Paginated selects for the service layer.
//!
//! One count query plus one page query; the two are not atomic.

use common::pagination::{PageInfo, Pagination};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Select};

use crate::errors::ServiceError;

/// A page of rows plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

pub async fn fetch_page<E>(
    db: &DatabaseConnection,
    select: Select<E>,
    opts: Pagination,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let (page_idx, per_page) = opts.normalize();
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_idx).await?;
    Ok(Page { items, info: PageInfo::new(opts, total) })
}

/// Escape LIKE metacharacters and build a lowercase `%term%` pattern.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.trim().to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_lowercases_and_escapes() {
        assert_eq!(like_pattern("WN-100"), "%wn-100%");
        assert_eq!(like_pattern(" 50%_off "), "%50\\%\\_off%");
    }
}
