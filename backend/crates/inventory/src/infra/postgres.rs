//! PostgreSQL Repository Implementations
//!
//! Every call goes through a stored function; see `database/migrations`.
//! Prices are stored as integer cents.

use kernel::id::{ItemId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{Item, ItemDraft, LeastStockItem, Page, Supplier, SupplierStock};
use crate::domain::repository::{InventoryQueryRepository, ItemRepository, ItemSearch};
use crate::domain::value_objects::{
    ImageRef, ItemName, PageRequest, Price, Quantity, SearchField,
};
use crate::error::{InventoryError, InventoryResult};

const ITEM_COLUMNS: &str =
    "item_id, name, price_cents, quantity, image_path, supplier_id, supplier_name";

/// foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL-backed inventory repository
#[derive(Clone)]
pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_item_page(
        &self,
        sql: &str,
        binds: PageBinds<'_>,
        page: PageRequest,
    ) -> InventoryResult<Vec<ItemPageRow>> {
        let mut query = sqlx::query_as::<_, ItemPageRow>(sql);
        if let Some(supplier_id) = binds.supplier_id {
            query = query.bind(supplier_id.get());
        }
        query = query
            .bind(page.offset())
            .bind(page.page_size())
            .bind(binds.search_term);
        if let Some(field) = binds.search_field {
            query = query.bind(field.as_str());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Run a paged listing; past the last page the total comes from page one.
    async fn item_page(
        &self,
        sql: &str,
        binds: PageBinds<'_>,
        page: PageRequest,
    ) -> InventoryResult<Page<Item>> {
        let rows = self.fetch_item_page(sql, binds, page).await?;

        let total_count = match rows.first() {
            Some(row) => row.total_count,
            None if page.page_number() > 1 => self
                .fetch_item_page(sql, binds, PageRequest::new(Some(1), Some(1)))
                .await?
                .first()
                .map_or(0, |row| row.total_count),
            None => 0,
        };

        let items = rows
            .into_iter()
            .map(|row| row.item.into_item())
            .collect::<InventoryResult<Vec<_>>>()?;

        Ok(Page { items, total_count })
    }
}

impl ItemRepository for PgInventoryRepository {
    async fn create(&self, draft: &ItemDraft, image: Option<&ImageRef>) -> InventoryResult<ItemId> {
        let item_id = sqlx::query_scalar::<_, i64>("SELECT sp_create_item($1, $2, $3, $4, $5)")
            .bind(draft.name.as_str())
            .bind(draft.price.cents())
            .bind(draft.quantity.get())
            .bind(image.map(ImageRef::as_str))
            .bind(draft.supplier_id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(ItemId::new(item_id))
    }

    async fn find_by_id(&self, item_id: ItemId) -> InventoryResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM sp_get_item_by_id($1)"
        ))
        .bind(item_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn update(
        &self,
        item_id: ItemId,
        draft: &ItemDraft,
        image: Option<&ImageRef>,
    ) -> InventoryResult<u64> {
        let affected =
            sqlx::query_scalar::<_, i32>("SELECT sp_update_item($1, $2, $3, $4, $5, $6)")
                .bind(item_id.get())
                .bind(draft.name.as_str())
                .bind(draft.price.cents())
                .bind(draft.quantity.get())
                .bind(image.map(ImageRef::as_str))
                .bind(draft.supplier_id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(map_write_error)?;

        Ok(affected_rows(affected))
    }

    async fn delete(&self, item_id: ItemId) -> InventoryResult<u64> {
        let affected = sqlx::query_scalar::<_, i32>("SELECT sp_delete_item($1)")
            .bind(item_id.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(affected_rows(affected))
    }

    async fn update_price_and_quantity(
        &self,
        item_id: ItemId,
        supplier_id: UserId,
        price: Price,
        quantity: Quantity,
    ) -> InventoryResult<u64> {
        let affected = sqlx::query_scalar::<_, i32>(
            "SELECT sp_update_item_price_and_quantity($1, $2, $3, $4)",
        )
        .bind(item_id.get())
        .bind(supplier_id.get())
        .bind(price.cents())
        .bind(quantity.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(affected_rows(affected))
    }
}

impl InventoryQueryRepository for PgInventoryRepository {
    async fn list_items(
        &self,
        page: PageRequest,
        search: Option<&ItemSearch>,
    ) -> InventoryResult<Page<Item>> {
        let sql = format!("SELECT {ITEM_COLUMNS}, total_count FROM sp_get_all_items($1, $2, $3, $4)");
        let binds = PageBinds {
            supplier_id: None,
            search_term: search.map(|s| s.term.as_str()),
            search_field: Some(search.map_or(SearchField::default(), |s| s.field)),
        };
        self.item_page(&sql, binds, page).await
    }

    async fn list_supplier_items(
        &self,
        supplier_id: UserId,
        page: PageRequest,
        search_term: Option<&str>,
    ) -> InventoryResult<Page<Item>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS}, total_count FROM sp_get_items_by_supplier($1, $2, $3, $4)"
        );
        let binds = PageBinds {
            supplier_id: Some(supplier_id),
            search_term,
            search_field: None,
        };
        self.item_page(&sql, binds, page).await
    }

    async fn list_suppliers(&self) -> InventoryResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT user_id, user_name FROM sp_get_all_suppliers()",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, username)| Supplier {
                user_id: UserId::new(user_id),
                username,
            })
            .collect())
    }

    async fn least_stock_items(&self, limit: i32) -> InventoryResult<Vec<LeastStockItem>> {
        let rows = sqlx::query_as::<_, (String, i32)>(
            "SELECT name, quantity FROM sp_get_top_least_stock_items($1)",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, quantity)| LeastStockItem { name, quantity })
            .collect())
    }

    async fn least_supplier_stock(&self, limit: i32) -> InventoryResult<Vec<SupplierStock>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT user_name, total_quantity FROM sp_get_top_least_supplier_stock($1)",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(username, total_quantity)| SupplierStock {
                username,
                total_quantity,
            })
            .collect())
    }
}

#[derive(Clone, Copy)]
struct PageBinds<'a> {
    supplier_id: Option<UserId>,
    search_term: Option<&'a str>,
    search_field: Option<SearchField>,
}

fn affected_rows(affected: i32) -> u64 {
    u64::try_from(affected).unwrap_or(0)
}

/// Unknown supplier ids surface as a validation failure
fn map_write_error(error: sqlx::Error) -> InventoryError {
    let is_fk_violation = error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == FOREIGN_KEY_VIOLATION);

    if is_fk_violation {
        InventoryError::Validation("Supplier does not exist.".to_string())
    } else {
        InventoryError::Database(error)
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_id: i64,
    name: String,
    price_cents: i64,
    quantity: i32,
    image_path: Option<String>,
    supplier_id: i64,
    supplier_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ItemPageRow {
    #[sqlx(flatten)]
    item: ItemRow,
    total_count: i64,
}

impl ItemRow {
    fn into_item(self) -> InventoryResult<Item> {
        let image = self
            .image_path
            .filter(|path| !path.is_empty())
            .map(|path| ImageRef::parse(&path))
            .transpose()?;

        Ok(Item {
            item_id: ItemId::new(self.item_id),
            name: ItemName::from_db(self.name),
            price: Price::from_db(self.price_cents),
            quantity: Quantity::from_db(self.quantity),
            image,
            supplier_id: UserId::new(self.supplier_id),
            supplier_name: self.supplier_name,
        })
    }
}

/// Runs against a live database: `cargo test -p inventory --features integration`.
#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;
    use auth::domain::repository::{RegisterOutcome, UserRepository};
    use auth::domain::value_object::user_name::UserName;
    use auth::domain::value_object::user_password::{RawPassword, UserPassword};
    use auth::PgAuthRepository;
    use sqlx::postgres::PgPoolOptions;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost:5432/inventory_test".to_string());
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("failed to connect to Postgres");
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
        pool
    }

    /// Register a fresh supplier so each test owns its rows
    async fn supplier(pool: &PgPool) -> (UserId, String) {
        let name = format!("it_{}", uuid::Uuid::new_v4().simple());
        let hash =
            UserPassword::from_raw(&RawPassword::new("supplier-pass".to_string()).unwrap(), None)
                .unwrap();
        let outcome = PgAuthRepository::new(pool.clone())
            .register(&UserName::new(&name).unwrap(), &hash)
            .await
            .unwrap();
        let RegisterOutcome::Created(user) = outcome else {
            panic!("supplier name should be fresh");
        };
        (user.user_id, name)
    }

    fn draft(name: &str, supplier_id: UserId) -> ItemDraft {
        ItemDraft {
            name: ItemName::new(name).unwrap(),
            price: Price::parse("12.50").unwrap(),
            quantity: Quantity::new(3).unwrap(),
            supplier_id,
        }
    }

    #[tokio::test]
    async fn test_far_page_is_empty_with_total() {
        let pool = pool().await;
        let repo = PgInventoryRepository::new(pool.clone());
        let (supplier_id, _) = supplier(&pool).await;
        repo.create(&draft("Bolt", supplier_id), None).await.unwrap();
        repo.create(&draft("Nut", supplier_id), None).await.unwrap();

        let far = PageRequest::new(Some(i32::MAX), Some(100));

        let page = repo.list_items(far, None).await.unwrap();
        assert!(page.items.is_empty());
        assert!(page.total_count >= 2);

        let page = repo.list_supplier_items(supplier_id, far, None).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn test_supplier_listing_and_search() {
        let pool = pool().await;
        let repo = PgInventoryRepository::new(pool.clone());
        let (supplier_id, supplier_name) = supplier(&pool).await;
        repo.create(&draft("Hex Bolt", supplier_id), None).await.unwrap();
        repo.create(&draft("Washer", supplier_id), None).await.unwrap();

        let page = repo
            .list_supplier_items(supplier_id, PageRequest::new(Some(1), Some(1)), None)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 2);

        let search = ItemSearch::new(Some(supplier_name.clone()), SearchField::SupplierName);
        let page = repo
            .list_items(PageRequest::default(), search.as_ref())
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert!(
            page.items
                .iter()
                .all(|item| item.supplier_name.as_deref() == Some(supplier_name.as_str()))
        );
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let pool = pool().await;
        let repo = PgInventoryRepository::new(pool.clone());
        let (supplier_id, supplier_name) = supplier(&pool).await;

        let image = ImageRef::from_file_name("lifecycle.png").unwrap();
        let item_id = repo
            .create(&draft("Gear", supplier_id), Some(&image))
            .await
            .unwrap();

        let item = repo.find_by_id(item_id).await.unwrap().unwrap();
        assert_eq!(item.name.as_str(), "Gear");
        assert_eq!(item.price.cents(), 1250);
        assert_eq!(item.image, Some(image));
        assert_eq!(item.supplier_name.as_deref(), Some(supplier_name.as_str()));

        let updated = repo
            .update_price_and_quantity(
                item_id,
                supplier_id,
                Price::parse("3").unwrap(),
                Quantity::new(0).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let (other_supplier, _) = supplier(&pool).await;
        let foreign = repo
            .update_price_and_quantity(
                item_id,
                other_supplier,
                Price::parse("4").unwrap(),
                Quantity::new(1).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(foreign, 0);

        assert_eq!(repo.delete(item_id).await.unwrap(), 1);
        assert!(repo.find_by_id(item_id).await.unwrap().is_none());
        assert_eq!(repo.delete(item_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_supplier_is_validation_error() {
        let repo = PgInventoryRepository::new(pool().await);

        let err = repo
            .create(&draft("Orphan", UserId::new(i64::MAX)), None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, InventoryError::Validation(ref m) if m == "Supplier does not exist.")
        );
    }
}
