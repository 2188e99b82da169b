use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::ProductResult,
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// SeaORM-backed repository over the `products` table
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Price)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut updated = entity::Entity::update_many()
            .col_expr(entity::Column::Name, Expr::value(input.name))
            .col_expr(entity::Column::Price, Expr::value(input.price))
            .col_expr(entity::Column::Availability, Expr::value(input.availability))
            .col_expr(entity::Column::UpdatedAt, Expr::current_timestamp())
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        let Some(model) = updated.pop() else {
            return Ok(None);
        };

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(model.into()))
    }

    /// Flips availability in the `UPDATE` itself so concurrent toggles never
    /// read a stale value.
    async fn toggle_availability(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut updated = entity::Entity::update_many()
            .col_expr(
                entity::Column::Availability,
                Expr::col(entity::Column::Availability).not(),
            )
            .col_expr(entity::Column::UpdatedAt, Expr::current_timestamp())
            .filter(entity::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await?;

        let Some(model) = updated.pop() else {
            return Ok(None);
        };

        tracing::info!(
            product_id = id,
            availability = model.availability,
            "Toggled product availability"
        );
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: i32, name: &str, price: f64, availability: bool) -> entity::Model {
        let now = chrono::Utc::now().into();
        entity::Model {
            id,
            name: name.to_string(),
            price,
            availability,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Tablet - Testing", 4000.0, true)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .create(CreateProduct {
                name: "Tablet - Testing".to_string(),
                price: 4000.0,
                availability: None,
            })
            .await
            .unwrap();

        assert_eq!(product.id, 1);
        assert!(product.availability);
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(2, "Mouse", 20.0, true),
                model(1, "Monitor", 300.0, false),
            ]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Mouse");
        assert!(!products[1].availability);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.get_by_id(2000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_flips_stored_value() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Monitor", 300.0, false)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.toggle_availability(1).await.unwrap().unwrap();
        assert!(!product.availability);

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = log[0].statements()[0].sql.clone();
        assert!(sql.starts_with("UPDATE"), "{sql}");
        assert!(sql.contains(r#"NOT "availability""#), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
    }

    #[tokio::test]
    async fn test_toggle_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.toggle_availability(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_writes_in_one_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Monitor curvo", 450.0, false)]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .update(
                1,
                UpdateProduct {
                    name: "Monitor curvo".to_string(),
                    price: 450.0,
                    availability: false,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "Monitor curvo");

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = log[0].statements()[0].sql.clone();
        assert!(sql.starts_with("UPDATE"), "{sql}");
        assert!(sql.contains("RETURNING"), "{sql}");
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo
            .update(
                9,
                UpdateProduct {
                    name: "Monitor".to_string(),
                    price: 1.0,
                    availability: true,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_database_errors_propagate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.list().await.unwrap_err();
        assert!(matches!(err, ProductError::Database(_)));
    }
}
