// src/services/catalog_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::{CategoryRepository, ProductRepository},
    models::{
        category::{Category, CreateCategoryPayload},
        product::{CreateProductPayload, Product, UpdateProductPayload},
    },
    storefront::catalog::{self, ProductQuery},
};

#[derive(Clone)]
pub struct CatalogService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
}

impl CatalogService {
    pub fn new(product_repo: ProductRepository, category_repo: CategoryRepository) -> Self {
        Self { product_repo, category_repo }
    }

    // ---
    // Produtos
    // ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let mut products = self.product_repo.list().await?;
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Product))
    }

    pub async fn create_product(&self, payload: CreateProductPayload) -> Result<Product, AppError> {
        let product = payload.into_product(Uuid::new_v4().to_string(), Utc::now());
        self.product_repo.save(&product).await?;
        tracing::info!("📦 Produto criado: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: &str,
        patch: &UpdateProductPayload,
    ) -> Result<Product, AppError> {
        self.product_repo
            .merge(id, patch)
            .await?
            .ok_or(AppError::NotFound(Entity::Product))
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        if !self.product_repo.delete(id).await? {
            return Err(AppError::NotFound(Entity::Product));
        }
        tracing::info!("🗑️ Produto removido: {}", id);
        Ok(())
    }

    /// Vitrine: só produtos de categorias ativas, com filtros e ordenação.
    pub async fn storefront_products(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        let products = self.list_products().await?;
        let categories = self.category_repo.list().await?;
        Ok(catalog::apply_query(products, &categories, query))
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let mut categories = self.category_repo.list().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    pub async fn list_active_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = self.list_categories().await?;
        Ok(categories.into_iter().filter(|c| c.active).collect())
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Category, AppError> {
        self.category_repo
            .list()
            .await?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or(AppError::NotFound(Entity::Category))
    }

    pub async fn create_category(&self, payload: CreateCategoryPayload) -> Result<Category, AppError> {
        let category = payload.into_category(Uuid::new_v4().to_string(), Utc::now());
        self.category_repo.save(&category).await?;
        tracing::info!("🏷️ Categoria criada: {}", category.name);
        Ok(category)
    }

    /// Inverte `active`. Os produtos não são tocados: a vitrine apenas deixa de listá-los.
    pub async fn toggle_category(&self, id: &str) -> Result<Category, AppError> {
        let mut category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Category))?;

        category.active = !category.active;
        category.updated_at = Utc::now();
        self.category_repo.save(&category).await?;

        tracing::info!("🏷️ Categoria '{}' ativa = {}", category.name, category.active);
        Ok(category)
    }

    /// Categorias ativas não podem ser removidas.
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Category))?;

        if category.active {
            return Err(AppError::CategoryActive);
        }

        self.category_repo.delete(id).await?;
        tracing::info!("🗑️ Categoria removida: {}", category.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryKvStore, storefront::catalog::SortOrder};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn service() -> CatalogService {
        let store: Arc<dyn crate::db::KvStore> = Arc::new(MemoryKvStore::new());
        CatalogService::new(
            ProductRepository::new(store.clone()),
            CategoryRepository::new(store),
        )
    }

    fn new_category(name: &str, active: bool, subs: &[&str]) -> CreateCategoryPayload {
        CreateCategoryPayload {
            name: name.into(),
            description: String::new(),
            active,
            subcategories: subs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn new_product(name: &str, category: &str) -> CreateProductPayload {
        CreateProductPayload {
            name: name.into(),
            description: String::new(),
            price: Decimal::from(1500),
            category: category.into(),
            sizes: vec![],
            colors: vec![],
            image_url: String::new(),
            stock: 5,
            featured: false,
        }
    }

    #[tokio::test]
    async fn inactive_category_can_be_deleted_but_active_cannot() {
        let catalog = service();
        let test = catalog.create_category(new_category("Test", false, &[])).await.unwrap();
        catalog.delete_category(&test.id).await.unwrap();
        assert!(catalog.list_categories().await.unwrap().is_empty());

        let test = catalog.create_category(new_category("Test", false, &[])).await.unwrap();
        let toggled = catalog.toggle_category(&test.id).await.unwrap();
        assert!(toggled.active);
        assert!(matches!(catalog.delete_category(&test.id).await, Err(AppError::CategoryActive)));
        assert_eq!(catalog.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn toggling_hides_products_without_touching_them() {
        let catalog = service();
        let men = catalog.create_category(new_category("Men", true, &["Shirts"])).await.unwrap();
        let shirt = catalog.create_product(new_product("Oxford", "Shirts")).await.unwrap();

        let query = ProductQuery { sort: SortOrder::NameAsc, ..Default::default() };
        assert_eq!(catalog.storefront_products(&query).await.unwrap().len(), 1);

        catalog.toggle_category(&men.id).await.unwrap();
        assert!(catalog.storefront_products(&query).await.unwrap().is_empty());
        assert_eq!(catalog.get_product(&shirt.id).await.unwrap(), shirt);

        let active = catalog.list_active_categories().await.unwrap();
        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let catalog = service();
        assert!(matches!(
            catalog.get_product("nope").await,
            Err(AppError::NotFound(Entity::Product))
        ));
        assert!(matches!(
            catalog.delete_product("nope").await,
            Err(AppError::NotFound(Entity::Product))
        ));
        assert!(matches!(
            catalog.toggle_category("nope").await,
            Err(AppError::NotFound(Entity::Category))
        ));
    }
}
