// src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[schema(example = "Men")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Categorias inativas escondem os seus produtos da vitrine.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    #[schema(example = json!(["Shirts", "Trousers"]))]
    pub subcategories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Nomes de categoria de produto que esta categoria expõe na vitrine.
    pub fn exposes(&self, product_category: &str) -> bool {
        if self.subcategories.is_empty() {
            self.name == product_category
        } else {
            self.subcategories.iter().any(|sub| sub == product_category)
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl CreateCategoryPayload {
    pub fn into_category(self, id: String, now: DateTime<Utc>) -> Category {
        Category {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            active: self.active,
            subcategories: self
                .subcategories
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, subs: &[&str]) -> Category {
        let now = Utc::now();
        Category {
            id: "c1".into(),
            name: name.into(),
            description: String::new(),
            active: true,
            subcategories: subs.iter().map(|s| s.to_string()).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn subcategories_take_precedence_over_the_name() {
        let men = category("Men", &["Shirts", "Trousers"]);
        assert!(men.exposes("Shirts"));
        assert!(!men.exposes("Men"));

        let bags = category("Bags", &[]);
        assert!(bags.exposes("Bags"));
        assert!(!bags.exposes("bags"));
    }
}
