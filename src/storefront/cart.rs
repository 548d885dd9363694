// src/storefront/cart.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    order::OrderLine,
    product::{Product, SizeLabel},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("'{0}' está esgotado")]
    OutOfStock(String),

    #[error("apenas {available} unidades de '{name}' disponíveis")]
    InsufficientStock { name: String, available: u32 },

    #[error("item não está no carrinho")]
    LineNotFound,
}

/// Identidade de uma linha: mesmo produto, tamanho e cor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: String,
    pub size: Option<SizeLabel>,
    pub color: Option<String>,
}

impl LineKey {
    pub fn new(product_id: &str, size: Option<SizeLabel>, color: Option<String>) -> Self {
        Self {
            product_id: product_id.to_string(),
            size,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub size: Option<SizeLabel>,
    pub color: Option<String>,
    pub quantity: u32,
    /// Estoque visto no momento da adição; limita a quantidade.
    pub stock: u32,
}

impl CartItem {
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, self.size.clone(), self.color.clone())
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

// Carrinho do cliente: só existe do lado do cliente, não é persistido
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    /// Mesma (produto, tamanho, cor) incrementa a linha existente; senão cria uma nova.
    pub fn add(
        &mut self,
        product: &Product,
        size: Option<SizeLabel>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<(), CartError> {
        if product.stock == 0 {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        let key = LineKey::new(&product.id, size, color);
        let current = self.position(&key).map_or(0, |i| self.items[i].quantity);
        let wanted = current.saturating_add(quantity.max(1));
        if wanted > product.stock {
            return Err(CartError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }

        match self.position(&key) {
            Some(i) => {
                let item = &mut self.items[i];
                item.quantity = wanted;
                item.stock = product.stock;
            }
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                size: key.size,
                color: key.color,
                quantity: wanted,
                stock: product.stock,
            }),
        }
        Ok(())
    }

    /// Quantidade 0 remove a linha.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) -> Result<(), CartError> {
        let i = self.position(key).ok_or(CartError::LineNotFound)?;
        if quantity == 0 {
            self.items.remove(i);
            return Ok(());
        }

        let item = &mut self.items[i];
        if quantity > item.stock {
            return Err(CartError::InsufficientStock {
                name: item.name.clone(),
                available: item.stock,
            });
        }
        item.quantity = quantity;
        Ok(())
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(CartItem::to_order_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, price: i64, stock: u32) -> Product {
        let now = Utc::now();
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            category: "Shirts".into(),
            sizes: vec!["M".into(), "L".into()],
            colors: vec!["Black".into()],
            image_url: String::new(),
            stock,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn adding_the_same_variant_twice_merges_the_line() {
        let shirt = product("p1", 1000, 10);
        let mut cart = Cart::new();

        cart.add(&shirt, Some("M".into()), Some("Black".into()), 1).unwrap();
        cart.add(&shirt, Some("M".into()), Some("Black".into()), 1).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.subtotal(), Decimal::from(2000));
    }

    #[test]
    fn a_different_size_or_colour_is_a_new_line() {
        let shirt = product("p1", 1000, 10);
        let mut cart = Cart::new();

        cart.add(&shirt, Some("M".into()), Some("Black".into()), 1).unwrap();
        cart.add(&shirt, Some("L".into()), Some("Black".into()), 1).unwrap();
        cart.add(&shirt, Some("L".into()), None, 1).unwrap();

        assert_eq!(cart.items().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn quantity_is_capped_by_stock() {
        let shirt = product("p1", 1000, 2);
        let mut cart = Cart::new();
        cart.add(&shirt, None, None, 2).unwrap();

        let err = cart.add(&shirt, None, None, 1).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock { name: "Product p1".into(), available: 2 }
        );
        assert_eq!(cart.items()[0].quantity, 2);

        let sold_out = product("p2", 500, 0);
        assert!(matches!(cart.add(&sold_out, None, None, 1), Err(CartError::OutOfStock(_))));
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let shirt = product("p1", 1000, 5);
        let mut cart = Cart::new();
        cart.add(&shirt, None, None, 1).unwrap();
        let key = cart.items()[0].key();

        cart.update_quantity(&key, 3).unwrap();
        assert_eq!(cart.item_count(), 3);

        cart.update_quantity(&key, 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.update_quantity(&key, 1), Err(CartError::LineNotFound));
    }

    #[test]
    fn order_lines_snapshot_the_cart() {
        let shirt = product("p1", 1000, 5);
        let mut cart = Cart::new();
        cart.add(&shirt, Some(SizeLabel::Numeric(42.0)), None, 2).unwrap();

        let lines = cart.to_order_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].size, Some(SizeLabel::Numeric(42.0)));
        assert_eq!(lines[0].line_total(), Decimal::from(2000));
    }
}
