use diesel::prelude::*;

use crate::domain::category::{Category, DeletePolicy, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, CategorySlug, LikeCount, ViewCount};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

fn insert_category(
    conn: &mut SqliteConnection,
    category: &NewCategory,
) -> RepositoryResult<DbCategory> {
    use crate::schema::categories;

    let db_category: DbNewCategory = category.clone().into();
    let row = diesel::insert_into(categories::table)
        .values(db_category)
        .returning(DbCategory::as_returning())
        .get_result::<DbCategory>(conn)?;
    Ok(row)
}

impl CategoryReader for DieselRepository {
    fn list_top_categories(&self, limit: i64) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order((categories::likes.desc(), categories::id.asc()))
            .limit(limit)
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn get_or_create_category(&self, name: &CategoryName) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Take the write lock up front so concurrent callers queue behind the
        // busy timeout instead of racing between lookup and insert.
        let created = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let existing = categories::table
                .filter(categories::name.eq(name.as_str()))
                .first::<DbCategory>(conn)
                .optional()?;

            let row = match existing {
                Some(row) => row,
                None => insert_category(conn, &NewCategory::new(name.clone())?)?,
            };

            let category: Category = row.try_into()?;
            Ok(category)
        });
        drop(conn);

        match created {
            // Another writer stored the name first; return its row.
            Err(RepositoryError::Conflict(msg)) => self
                .get_category_by_name(name)?
                .ok_or(RepositoryError::Conflict(msg)),
            other => other,
        }
    }

    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut conn = self.conn()?;

        let category: Category = insert_category(&mut conn, category)?.try_into()?;
        Ok(category)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        slug: &CategorySlug,
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let row = diesel::update(categories::table.find(id.get()))
            .set((
                categories::name.eq(name.as_str()),
                categories::slug.eq(slug.as_str()),
            ))
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        let category: Category = row.try_into()?;
        Ok(category)
    }

    fn increment_category_views(&self, id: CategoryId) -> RepositoryResult<ViewCount> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let views: i32 = diesel::update(categories::table.find(id.get()))
            .set(categories::views.eq(categories::views + 1))
            .returning(categories::views)
            .get_result(&mut conn)?;

        Ok(ViewCount::new(views)?)
    }

    fn like_category(&self, id: CategoryId) -> RepositoryResult<LikeCount> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let likes: i32 = diesel::update(categories::table.find(id.get()))
            .set(categories::likes.eq(categories::likes + 1))
            .returning(categories::likes)
            .get_result(&mut conn)?;

        Ok(LikeCount::new(likes)?)
    }

    fn delete_category(&self, id: CategoryId, policy: DeletePolicy) -> RepositoryResult<usize> {
        use crate::schema::{categories, pages};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let owned: i64 = pages::table
                .filter(pages::category_id.eq(id.get()))
                .count()
                .get_result(conn)?;

            if owned > 0 {
                match policy {
                    DeletePolicy::Block => {
                        return Err(RepositoryError::Conflict(format!(
                            "category {id} still owns {owned} page(s)"
                        )));
                    }
                    DeletePolicy::Cascade => {
                        diesel::delete(pages::table.filter(pages::category_id.eq(id.get())))
                            .execute(conn)?;
                    }
                }
            }

            let affected = diesel::delete(categories::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(affected)
        })
    }
}
