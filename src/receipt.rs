//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError},
    pricing::{line_total, total_price},
};

/// One priced cart entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product id
    pub product_id: String,

    /// Product name at the time the receipt was built
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Price per unit
    pub unit_price: Money<'static, Currency>,

    /// `quantity` × `unit_price`
    pub subtotal: Money<'static, Currency>,
}

/// Itemised summary of a cart.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: SmallVec<[ReceiptLine; 8]>,

    /// Sum of all line subtotals
    total: Money<'static, Currency>,
}

impl Receipt {
    /// Price every entry of `cart` against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if an entry's product is missing from the catalog or
    /// the arithmetic overflows.
    pub fn from_cart(cart: &Cart, catalog: &Catalog) -> Result<Self, CartError> {
        let mut lines: SmallVec<[ReceiptLine; 8]> = SmallVec::new();

        for item in cart.items() {
            let product = catalog
                .get(item.product_id())
                .ok_or_else(|| CatalogError::ProductNotFound(item.product_id().to_string()))?;

            lines.push(ReceiptLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: item.quantity(),
                unit_price: product.price,
                subtotal: line_total(&product.price, item.quantity())?,
            });
        }

        let total = total_price(lines.iter().map(|line| line.subtotal), catalog.currency())?;

        Ok(Self { lines, total })
    }

    /// Priced entries in cart order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total amount to pay.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Whether the receipt has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Writes the receipt as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        if !self.is_empty() {
            let mut builder = Builder::default();

            builder.push_record(["", "Item", "Quantity", "Price", "Subtotal"]);

            for (idx, line) in self.lines.iter().enumerate() {
                builder.push_record([
                    format!("#{:<3}", idx + 1),
                    line.name.clone(),
                    line.quantity.to_string(),
                    line.unit_price.to_string(),
                    line.subtotal.to_string(),
                ]);
            }

            let mut table = builder.build();

            table.with(Style::modern_rounded());
            table.modify(Columns::new(2..5), Alignment::right());

            writeln!(out, "{table}")?;
        }

        writeln!(out, "Total: {}", self.total)
    }
}
