use diesel::prelude::*;

use crate::domain::page::{NewPage, Page};
use crate::domain::types::{CategoryId, PageId, PageTitle, PageUrl, ViewCount};
use crate::models::page::{NewPage as DbNewPage, Page as DbPage};
use crate::repository::{DieselRepository, PageReader, PageWriter, RepositoryError, RepositoryResult};

impl PageReader for DieselRepository {
    fn list_top_pages(&self, limit: i64) -> RepositoryResult<Vec<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let items = pages::table
            .order((pages::views.desc(), pages::id.asc()))
            .limit(limit)
            .load::<DbPage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Page>, _>>()?;

        Ok(items)
    }

    fn list_pages_for_category(&self, category_id: CategoryId) -> RepositoryResult<Vec<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let items = pages::table
            .filter(pages::category_id.eq(category_id.get()))
            .order((pages::views.desc(), pages::id.asc()))
            .load::<DbPage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Page>, _>>()?;

        Ok(items)
    }

    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .find(id.get())
            .first::<DbPage>(&mut conn)
            .optional()?;

        let page = page.map(TryInto::try_into).transpose()?;
        Ok(page)
    }
}

impl PageWriter for DieselRepository {
    fn get_or_create_page(
        &self,
        category_id: CategoryId,
        title: &PageTitle,
        url: &PageUrl,
        views: ViewCount,
    ) -> RepositoryResult<Page> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let existing = pages::table
                .filter(pages::category_id.eq(category_id.get()))
                .filter(pages::title.eq(title.as_str()))
                .select(pages::id)
                .first::<i32>(conn)
                .optional()?;

            let row = match existing {
                // Lookup hit still refreshes url and views.
                Some(id) => diesel::update(pages::table.find(id))
                    .set((pages::url.eq(url.as_str()), pages::views.eq(views.get())))
                    .returning(DbPage::as_returning())
                    .get_result::<DbPage>(conn)?,
                None => diesel::insert_into(pages::table)
                    .values(DbNewPage {
                        category_id: category_id.get(),
                        title: title.as_str().to_string(),
                        url: url.as_str().to_string(),
                        views: views.get(),
                    })
                    .returning(DbPage::as_returning())
                    .get_result::<DbPage>(conn)?,
            };

            let page: Page = row.try_into()?;
            Ok(page)
        })
    }

    fn create_page(&self, page: &NewPage) -> RepositoryResult<Page> {
        use crate::schema::pages;

        let mut conn = self.conn()?;
        let db_page: DbNewPage = page.clone().into();

        let row = diesel::insert_into(pages::table)
            .values(db_page)
            .returning(DbPage::as_returning())
            .get_result::<DbPage>(&mut conn)?;

        let page: Page = row.try_into()?;
        Ok(page)
    }

    fn increment_page_views(&self, id: PageId) -> RepositoryResult<ViewCount> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let views: i32 = diesel::update(pages::table.find(id.get()))
            .set(pages::views.eq(pages::views + 1))
            .returning(pages::views)
            .get_result(&mut conn)?;

        Ok(ViewCount::new(views)?)
    }
}
