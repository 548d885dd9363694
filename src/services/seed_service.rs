// src/services/seed_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CategoryRepository, DeliveryRepository, ProductRepository},
    models::{
        category::Category,
        delivery::DeliveryLocation,
        product::{Product, SizeLabel},
    },
};

// (nome, descrição, subcategorias)
const DEFAULT_CATEGORIES: &[(&str, &str, &[&str])] = &[
    ("Men", "Menswear essentials", &["Shirts", "Trousers", "Jackets"]),
    ("Women", "Womenswear collection", &["Dresses", "Tops", "Skirts"]),
    ("Shoes", "Footwear for everyone", &["Sneakers", "Boots", "Sandals"]),
    ("Accessories", "Finishing touches", &["Bags", "Watches", "Jewelry"]),
];

struct SampleProduct {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    category: &'static str,
    sizes: &'static [&'static str],
    numeric_sizes: &'static [f64],
    colors: &'static [&'static str],
    stock: u32,
    featured: bool,
}

const SAMPLE_PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        slug: "oxford-shirt",
        name: "Classic Oxford Shirt",
        description: "Crisp cotton oxford with a button-down collar.",
        price: 2800,
        category: "Shirts",
        sizes: &["S", "M", "L", "XL"],
        numeric_sizes: &[],
        colors: &["White", "Light Blue"],
        stock: 40,
        featured: true,
    },
    SampleProduct {
        slug: "chino-trousers",
        name: "Slim Chino Trousers",
        description: "Stretch cotton chinos for everyday wear.",
        price: 3500,
        category: "Trousers",
        sizes: &["30", "32", "34", "36"],
        numeric_sizes: &[],
        colors: &["Khaki", "Navy", "Black"],
        stock: 25,
        featured: false,
    },
    SampleProduct {
        slug: "denim-jacket",
        name: "Denim Jacket",
        description: "Washed denim with a relaxed fit.",
        price: 5200,
        category: "Jackets",
        sizes: &["M", "L", "XL"],
        numeric_sizes: &[],
        colors: &["Indigo"],
        stock: 12,
        featured: true,
    },
    SampleProduct {
        slug: "wrap-dress",
        name: "Kitenge Wrap Dress",
        description: "Bold kitenge print in a flattering wrap cut.",
        price: 4500,
        category: "Dresses",
        sizes: &["XS", "S", "M", "L"],
        numeric_sizes: &[],
        colors: &["Orange", "Green"],
        stock: 18,
        featured: true,
    },
    SampleProduct {
        slug: "linen-top",
        name: "Linen Blouse",
        description: "Lightweight linen top for warm days.",
        price: 2200,
        category: "Tops",
        sizes: &["S", "M", "L"],
        numeric_sizes: &[],
        colors: &["White", "Sand"],
        stock: 30,
        featured: false,
    },
    SampleProduct {
        slug: "canvas-sneakers",
        name: "Canvas Sneakers",
        description: "Low-top canvas sneakers with rubber soles.",
        price: 3900,
        category: "Sneakers",
        sizes: &[],
        numeric_sizes: &[38.0, 39.0, 40.0, 41.0, 42.0, 43.0],
        colors: &["White", "Black"],
        stock: 35,
        featured: false,
    },
    SampleProduct {
        slug: "leather-boots",
        name: "Leather Chelsea Boots",
        description: "Full-grain leather with elastic side panels.",
        price: 8900,
        category: "Boots",
        sizes: &[],
        numeric_sizes: &[40.0, 41.0, 42.0, 43.0, 44.0],
        colors: &["Brown"],
        stock: 8,
        featured: true,
    },
    SampleProduct {
        slug: "leather-tote",
        name: "Leather Tote Bag",
        description: "Roomy tote in hand-finished leather.",
        price: 6500,
        category: "Bags",
        sizes: &[],
        numeric_sizes: &[],
        colors: &["Tan", "Black"],
        stock: 10,
        featured: false,
    },
    SampleProduct {
        slug: "beaded-bracelet",
        name: "Maasai Beaded Bracelet",
        description: "Handmade beadwork from Kajiado artisans.",
        price: 800,
        category: "Jewelry",
        sizes: &[],
        numeric_sizes: &[],
        colors: &["Multicolor"],
        stock: 60,
        featured: false,
    },
];

// (slug, nome, região, custo)
const SAMPLE_DELIVERY_LOCATIONS: &[(&str, &str, &str, i64)] = &[
    ("nairobi-cbd", "CBD", "Nairobi", 0),
    ("westlands", "Westlands", "Nairobi", 200),
    ("kilimani", "Kilimani", "Nairobi", 250),
    ("thika", "Thika Town", "Kiambu", 400),
    ("mombasa", "Mombasa Island", "Mombasa", 600),
    ("kisumu", "Kisumu City", "Kisumu", 650),
];

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub message: String,
    pub products: usize,
    pub delivery_locations: usize,
}

// Carga inicial. IDs determinísticos: rodar duas vezes não duplica.
#[derive(Clone)]
pub struct SeedService {
    product_repo: ProductRepository,
    category_repo: CategoryRepository,
    delivery_repo: DeliveryRepository,
}

impl SeedService {
    pub fn new(
        product_repo: ProductRepository,
        category_repo: CategoryRepository,
        delivery_repo: DeliveryRepository,
    ) -> Self {
        Self { product_repo, category_repo, delivery_repo }
    }

    pub async fn init_sample_data(&self) -> Result<SeedReport, AppError> {
        let now = Utc::now();

        for sample in SAMPLE_PRODUCTS {
            let sizes = sample
                .sizes
                .iter()
                .map(|s| SizeLabel::from(*s))
                .chain(sample.numeric_sizes.iter().map(|n| SizeLabel::from(*n)))
                .collect();

            let product = Product {
                id: format!("sample-{}", sample.slug),
                name: sample.name.to_string(),
                description: sample.description.to_string(),
                price: Decimal::from(sample.price),
                category: sample.category.to_string(),
                sizes,
                colors: sample.colors.iter().map(|c| c.to_string()).collect(),
                image_url: String::new(),
                stock: sample.stock,
                featured: sample.featured,
                created_at: now,
                updated_at: now,
            };
            self.product_repo.save(&product).await?;
        }

        for (slug, name, region, cost) in SAMPLE_DELIVERY_LOCATIONS {
            let location = DeliveryLocation {
                id: format!("sample-{slug}"),
                name: name.to_string(),
                region: region.to_string(),
                cost: Decimal::from(*cost),
                created_at: now,
                updated_at: now,
            };
            self.delivery_repo.save(&location).await?;
        }

        tracing::info!(
            "🌱 Dados de exemplo: {} produtos, {} locais de entrega",
            SAMPLE_PRODUCTS.len(),
            SAMPLE_DELIVERY_LOCATIONS.len()
        );
        Ok(SeedReport {
            message: "Sample data initialized".into(),
            products: SAMPLE_PRODUCTS.len(),
            delivery_locations: SAMPLE_DELIVERY_LOCATIONS.len(),
        })
    }

    /// Categorias padrão, ativas. Reescrever uma categoria existente reativa-a.
    pub async fn init_categories(&self) -> Result<Vec<Category>, AppError> {
        let now = Utc::now();
        let mut created = Vec::with_capacity(DEFAULT_CATEGORIES.len());

        for (name, description, subs) in DEFAULT_CATEGORIES {
            let id = format!("default-{}", name.to_lowercase());
            let created_at = match self.category_repo.find_by_id(&id).await? {
                Some(existing) => existing.created_at,
                None => now,
            };
            let category = Category {
                id,
                name: name.to_string(),
                description: description.to_string(),
                active: true,
                subcategories: subs.iter().map(|s| s.to_string()).collect(),
                created_at,
                updated_at: now,
            };
            self.category_repo.save(&category).await?;
            created.push(category);
        }

        tracing::info!("🌱 {} categorias padrão gravadas", created.len());
        Ok(created)
    }

    /// Gera dois produtos de exemplo por subcategoria da categoria informada
    /// (ou pelo próprio nome, se ela não tiver subcategorias).
    pub async fn add_products_to_category(&self, category: &Category) -> Result<Vec<Product>, AppError> {
        let targets: Vec<&str> = if category.subcategories.is_empty() {
            vec![category.name.as_str()]
        } else {
            category.subcategories.iter().map(String::as_str).collect()
        };

        let now = Utc::now();
        let mut products = Vec::new();
        for target in targets {
            for (variant, price, featured) in [("Essential", 1500, false), ("Premium", 4500, true)] {
                let product = Product {
                    id: Uuid::new_v4().to_string(),
                    name: format!("{variant} {target}"),
                    description: format!("{variant} pick from our {} collection.", category.name),
                    price: Decimal::from(price),
                    category: target.to_string(),
                    sizes: ["S", "M", "L"].into_iter().map(SizeLabel::from).collect(),
                    colors: vec!["Black".into(), "White".into()],
                    image_url: String::new(),
                    stock: 20,
                    featured,
                    created_at: now,
                    updated_at: now,
                };
                self.product_repo.save(&product).await?;
                products.push(product);
            }
        }

        tracing::info!("🌱 {} produtos adicionados em '{}'", products.len(), category.name);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{KvStore, MemoryKvStore};
    use std::sync::Arc;

    fn service() -> (SeedService, Arc<dyn KvStore>) {
        let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
        let seed = SeedService::new(
            ProductRepository::new(store.clone()),
            CategoryRepository::new(store.clone()),
            DeliveryRepository::new(store.clone()),
        );
        (seed, store)
    }

    #[tokio::test]
    async fn sample_data_is_idempotent() {
        let (seed, store) = service();
        seed.init_sample_data().await.unwrap();
        seed.init_sample_data().await.unwrap();

        let products = ProductRepository::new(store.clone()).list().await.unwrap();
        assert_eq!(products.len(), SAMPLE_PRODUCTS.len());
        let free = DeliveryRepository::new(store).find_by_id("sample-nairobi-cbd").await.unwrap().unwrap();
        assert!(free.is_free());
    }

    #[tokio::test]
    async fn every_sample_product_is_visible_under_default_categories() {
        let (seed, store) = service();
        seed.init_sample_data().await.unwrap();
        let categories = seed.init_categories().await.unwrap();

        let products = ProductRepository::new(store).list().await.unwrap();
        let visible = crate::storefront::catalog::visible_products(products, &categories);
        assert_eq!(visible.len(), SAMPLE_PRODUCTS.len());
    }

    #[tokio::test]
    async fn add_products_covers_each_subcategory() {
        let (seed, _) = service();
        let categories = seed.init_categories().await.unwrap();
        let men = categories.iter().find(|c| c.name == "Men").unwrap();

        let added = seed.add_products_to_category(men).await.unwrap();
        assert_eq!(added.len(), men.subcategories.len() * 2);
        assert!(added.iter().all(|p| men.exposes(&p.category)));
    }
}
