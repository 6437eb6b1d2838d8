//! Thermal receipt renderer
//!
//! Renders a finalized sale into ESC/POS format for thermal printers.

use caja_printer::EscPosBuilder;
use chrono::Local;
use shared::models::Sale;

/// Sale ticket renderer for thermal printers
pub struct ReceiptRenderer {
    width: usize,
    store_name: String,
}

impl ReceiptRenderer {
    /// Create a renderer with the given paper width and store banner
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize, store_name: impl Into<String>) -> Self {
        Self {
            width,
            store_name: store_name.into(),
        }
    }

    /// Render a sale to ESC/POS bytes
    pub fn render(&self, sale: &Sale) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, sale);
        self.render_items(&mut b, sale);
        self.render_footer(&mut b, sale);

        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.center();
        b.bold();
        b.double_size();
        b.line(&self.store_name);
        b.reset_size();
        b.bold_off();
        b.sep_double();

        b.left();
        let local = sale.date.with_timezone(&Local);
        b.line(&format!("Date: {}", local.format("%Y-%m-%d %H:%M:%S")));
        b.line(&format!("Ticket ID: {}", sale.id));
        b.line(&format!("Payment: {}", sale.payment_method));
        b.sep_single();
    }

    fn render_items(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.table_row("PROD", "QTY", "$$");

        for item in &sale.items {
            b.table_row(
                &item.name,
                &item.quantity.to_string(),
                &format!("{:.2}", item.subtotal),
            );
        }

        b.sep_single();
        b.line_lr("Subtotal", &format!("{:.2}", sale.subtotal));
        b.line_lr(
            &format!("Tax {}%", sale.tax_percentage),
            &format!("{:.2}", sale.tax_amount()),
        );
    }

    fn render_footer(&self, b: &mut EscPosBuilder, sale: &Sale) {
        b.right();
        b.double_size();
        b.line(&format!("TOTAL: {:.2}", sale.total));
        b.reset_size();

        b.center();
        b.line("Gracias por su compra");
        b.cut_feed(4);
    }
}
