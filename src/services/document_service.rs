// src/services/document_service.rs

use std::path::PathBuf;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;

use crate::{common::error::AppError, models::order::Order};

fn pdf_error(e: impl std::fmt::Display) -> AppError {
    AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
}

// Recibo do pedido em PDF
#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
    store_name: String,
    currency: String,
}

impl DocumentService {
    pub fn new(fonts_dir: PathBuf, store_name: String, currency: String) -> Self {
        Self { fonts_dir, store_name, currency }
    }

    fn money(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.currency, amount)
    }

    pub fn order_receipt_pdf(&self, order: &Order) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|e| pdf_error(format!("Fonte não encontrada em {:?}: {}", self.fonts_dir, e)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Order {}", order.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(self.store_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new(format!("RECEIPT #{}", order.id))
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Date: {}",
            order.created_at.format("%d/%m/%Y %H:%M")
        )));
        doc.push(elements::Paragraph::new(format!("Status: {:?}", order.status)));
        doc.push(elements::Break::new(1));

        // --- CLIENTE E ENTREGA ---
        doc.push(elements::Paragraph::new(format!("Customer: {}", order.customer_name)));
        doc.push(elements::Paragraph::new(format!(
            "Contact: {} / {}",
            order.customer_email, order.customer_phone
        )));
        doc.push(elements::Paragraph::new(format!(
            "Deliver to: {} ({}, {})",
            order.delivery_address, order.delivery_location.name, order.delivery_location.region
        )));
        if let Some(notes) = &order.delivery_notes {
            doc.push(
                elements::Paragraph::new(format!("Notes: {notes}"))
                    .styled(style::Style::new().italic()),
            );
        }
        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos: Produto (4), Variante (2), Qtd (1), Unitário (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 2, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Product").styled(style_bold))
            .element(elements::Paragraph::new("Variant").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Unit").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .map_err(pdf_error)?;

        for line in &order.cart {
            let variant = [
                line.size.as_ref().map(|s| s.to_string()),
                line.color.clone(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");

            table
                .row()
                .element(elements::Paragraph::new(line.name.clone()))
                .element(elements::Paragraph::new(variant))
                .element(elements::Paragraph::new(line.quantity.to_string()))
                .element(elements::Paragraph::new(self.money(line.price)))
                .element(elements::Paragraph::new(self.money(line.line_total())))
                .push()
                .map_err(pdf_error)?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let totals = order.totals();
        let delivery = if order.delivery_location.is_free() {
            "FREE".to_string()
        } else {
            self.money(totals.delivery_cost)
        };
        for (label, value) in [
            ("Subtotal", self.money(totals.subtotal)),
            ("Delivery", delivery),
            ("Tax (8%)", self.money(totals.tax)),
        ] {
            let mut p = elements::Paragraph::new(format!("{label}: {value}"));
            p.set_alignment(genpdf::Alignment::Right);
            doc.push(p);
        }
        let mut total_paragraph =
            elements::Paragraph::new(format!("TOTAL: {}", self.money(totals.total)));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));
        doc.push(elements::Break::new(2));

        // --- QR CODE com o ID do pedido (consulta no balcão) ---
        let code = QrCode::new(order.id.as_bytes()).map_err(pdf_error)?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
        let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
            .map_err(pdf_error)?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(pdf_error)?;
        Ok(buffer)
    }
}
