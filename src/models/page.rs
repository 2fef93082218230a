use diesel::prelude::*;

use crate::domain::page::{NewPage as DomainNewPage, Page as DomainPage};
use crate::domain::types::{PageTitle, PageUrl, TypeConstraintError, ViewCount};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pages)]
pub struct Page {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub url: String,
    pub views: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::pages)]
pub struct NewPage {
    pub category_id: i32,
    pub title: String,
    pub url: String,
    pub views: i32,
}

impl TryFrom<Page> for DomainPage {
    type Error = TypeConstraintError;

    fn try_from(page: Page) -> Result<Self, Self::Error> {
        Ok(Self {
            id: page.id.try_into()?,
            category_id: page.category_id.try_into()?,
            title: PageTitle::new(page.title)?,
            url: PageUrl::new(page.url)?,
            views: ViewCount::new(page.views)?,
        })
    }
}

impl From<DomainNewPage> for NewPage {
    fn from(page: DomainNewPage) -> Self {
        Self {
            category_id: page.category_id.get(),
            title: page.title.into_inner(),
            url: page.url.into_inner(),
            views: page.views.get(),
        }
    }
}
