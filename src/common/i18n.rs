// src/common/i18n.rs

use std::{collections::HashMap, sync::LazyLock};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt"];

const EN: &[(&str, &str)] = &[
    ("error.validation", "One or more fields are invalid."),
    ("error.malformed_payload", "The request body is malformed."),
    ("error.email_exists", "This e-mail is already registered."),
    ("error.invalid_credentials", "Invalid e-mail or password."),
    ("error.invalid_token", "Unauthorized"),
    ("error.not_found.product", "Product not found"),
    ("error.not_found.category", "Category not found"),
    ("error.not_found.delivery_location", "Delivery location not found"),
    ("error.not_found.order", "Order not found"),
    ("error.not_found.payment", "Payment not found"),
    ("error.not_found.object", "File not found"),
    ("error.category_active", "Deactivate the category before deleting it."),
    ("error.empty_cart", "The cart is empty."),
    ("error.unknown_delivery_location", "Unknown delivery location."),
    ("error.invalid_phone", "Invalid M-Pesa phone number."),
    ("error.invalid_card", "Invalid card details."),
    ("error.unsupported_media_type", "Only image uploads are accepted."),
    ("error.internal", "An unexpected error occurred."),
];

const PT: &[(&str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos."),
    ("error.malformed_payload", "O corpo da requisição está malformado."),
    ("error.email_exists", "Este e-mail já está em uso."),
    ("error.invalid_credentials", "E-mail ou senha inválidos."),
    ("error.invalid_token", "Token de autenticação inválido ou ausente."),
    ("error.not_found.product", "Produto não encontrado"),
    ("error.not_found.category", "Categoria não encontrada"),
    ("error.not_found.delivery_location", "Local de entrega não encontrado"),
    ("error.not_found.order", "Pedido não encontrado"),
    ("error.not_found.payment", "Pagamento não encontrado"),
    ("error.not_found.object", "Arquivo não encontrado"),
    ("error.category_active", "Desative a categoria antes de removê-la."),
    ("error.empty_cart", "O carrinho está vazio."),
    ("error.unknown_delivery_location", "Local de entrega desconhecido."),
    ("error.invalid_phone", "Número de telefone M-Pesa inválido."),
    ("error.invalid_card", "Dados do cartão inválidos."),
    ("error.unsupported_media_type", "Apenas imagens são aceitas."),
    ("error.internal", "Ocorreu um erro inesperado."),
];

static GLOBAL: LazyLock<I18nStore> = LazyLock::new(I18nStore::new);

// Tabelas de mensagens por idioma. Chaves ausentes caem para o inglês.
#[derive(Debug)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("pt", PT.iter().copied().collect());
        Self { messages }
    }

    pub fn global() -> &'static I18nStore {
        &GLOBAL
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.messages
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|table| table.get(key))
            })
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
