// src/storefront/wishlist.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    models::product::{Product, SizeLabel},
    storefront::cart::{Cart, CartError, LineKey},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub size: Option<SizeLabel>,
    pub color: Option<String>,
}

impl WishlistItem {
    pub fn key(&self) -> LineKey {
        LineKey::new(&self.product_id, self.size.clone(), self.color.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn contains(&self, key: &LineKey) -> bool {
        self.items.iter().any(|item| item.key() == *key)
    }

    /// Adiciona ou remove; retorna `true` se o item ficou na lista.
    pub fn toggle(&mut self, product: &Product, size: Option<SizeLabel>, color: Option<String>) -> bool {
        let key = LineKey::new(&product.id, size, color);
        if let Some(i) = self.items.iter().position(|item| item.key() == key) {
            self.items.remove(i);
            return false;
        }

        self.items.push(WishlistItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            size: key.size,
            color: key.color,
        });
        true
    }

    pub fn remove(&mut self, key: &LineKey) -> Option<WishlistItem> {
        let i = self.items.iter().position(|item| item.key() == *key)?;
        Some(self.items.remove(i))
    }

    /// Move para o carrinho. Se o carrinho recusar (estoque), o item continua aqui.
    pub fn move_to_cart(&mut self, key: &LineKey, product: &Product, cart: &mut Cart) -> Result<(), CartError> {
        if !self.contains(key) {
            return Err(CartError::LineNotFound);
        }
        cart.add(product, key.size.clone(), key.color.clone(), 1)?;
        self.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(stock: u32) -> Product {
        let now = Utc::now();
        Product {
            id: "dress".into(),
            name: "Maxi Dress".into(),
            description: String::new(),
            price: Decimal::from(4200),
            category: "Dresses".into(),
            sizes: vec!["S".into()],
            colors: vec!["Red".into()],
            image_url: String::new(),
            stock,
            featured: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let dress = product(3);
        let mut wishlist = Wishlist::new();

        assert!(wishlist.toggle(&dress, Some("S".into()), Some("Red".into())));
        assert!(wishlist.contains(&LineKey::new("dress", Some("S".into()), Some("Red".into()))));
        assert!(!wishlist.toggle(&dress, Some("S".into()), Some("Red".into())));
        assert!(wishlist.items().is_empty());
    }

    #[test]
    fn move_to_cart_keeps_item_when_out_of_stock() {
        let mut wishlist = Wishlist::new();
        let mut cart = Cart::new();
        let key = LineKey::new("dress", None, None);

        let sold_out = product(0);
        wishlist.toggle(&sold_out, None, None);
        assert!(wishlist.move_to_cart(&key, &sold_out, &mut cart).is_err());
        assert!(wishlist.contains(&key));

        let restocked = product(2);
        wishlist.move_to_cart(&key, &restocked, &mut cart).unwrap();
        assert!(!wishlist.contains(&key));
        assert_eq!(cart.item_count(), 1);
    }
}
