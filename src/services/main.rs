use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::visit::VisitSummary;
use crate::dto::categories::CategoryDto;
use crate::dto::pages::PageDto;
use crate::repository::{CategoryReader, PageReader, TOP_LIST_LIMIT};
use crate::services::visits::{self, VisitStore};

use super::{ServiceError, ServiceResult};

/// Data rendered on the home page.
#[derive(Debug, Serialize, PartialEq)]
pub struct IndexData {
    pub categories: Vec<CategoryDto>,
    pub pages: Vec<PageDto>,
    pub visits: VisitSummary,
}

fn track_visit<S>(session: &mut S, now: NaiveDateTime) -> ServiceResult<VisitSummary>
where
    S: VisitStore + ?Sized,
{
    visits::track(session, now).map_err(|e| {
        log::error!("Failed to track visit: {e}");
        ServiceError::Internal
    })
}

/// Core business logic for rendering the index page.
///
/// Counts the visit against the session, then loads the most liked
/// categories and the most viewed pages.
pub fn show_index<R, S>(repo: &R, session: &mut S, now: NaiveDateTime) -> ServiceResult<IndexData>
where
    R: CategoryReader + PageReader,
    S: VisitStore + ?Sized,
{
    let visits = track_visit(session, now)?;

    let categories = repo.list_top_categories(TOP_LIST_LIMIT).map_err(|e| {
        log::error!("Failed to list top categories: {e}");
        ServiceError::Internal
    })?;

    let pages = repo.list_top_pages(TOP_LIST_LIMIT).map_err(|e| {
        log::error!("Failed to list top pages: {e}");
        ServiceError::Internal
    })?;

    Ok(IndexData {
        categories: categories.into_iter().map(CategoryDto::from).collect(),
        pages: pages.into_iter().map(PageDto::from).collect(),
        visits,
    })
}

pub fn show_about<S>(session: &mut S, now: NaiveDateTime) -> ServiceResult<VisitSummary>
where
    S: VisitStore + ?Sized,
{
    track_visit(session, now)
}
