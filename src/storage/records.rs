//! On-disk record shapes

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    cart::CartItem,
    pricing::{money_from_decimal, money_to_decimal},
    products::{Product, ProductKind},
    storage::StorageError,
};

/// Value of the `type` field of a product record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Physical product, carries a `weight`
    Physical,

    /// Digital product, carries a `download_link`
    Digital,

    /// Generic product; also used for unrecognised types
    #[default]
    #[serde(other)]
    Generic,
}

/// Product record in a catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product variant
    #[serde(rename = "type", default)]
    pub product_type: ProductType,

    /// Product id; integers are accepted and read as strings
    #[serde(deserialize_with = "product_id")]
    pub product_id: String,

    /// Product name
    pub name: String,

    /// Price in major units (e.g. 99.5)
    pub price: Decimal,

    /// Units in stock
    pub quantity_available: u32,

    /// Weight in kilograms, physical products only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,

    /// Download link, digital products only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
}

impl ProductRecord {
    /// Convert into a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is invalid or a variant field is missing.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, StorageError> {
        let price = money_from_decimal(self.price, currency)?;

        let kind = match self.product_type {
            ProductType::Generic => ProductKind::Generic,
            ProductType::Physical => ProductKind::Physical {
                weight: self.weight.ok_or_else(|| StorageError::MissingField {
                    product_id: self.product_id.clone(),
                    field: "weight",
                })?,
            },
            ProductType::Digital => ProductKind::Digital {
                download_link: self.download_link.ok_or_else(|| StorageError::MissingField {
                    product_id: self.product_id.clone(),
                    field: "download_link",
                })?,
            },
        };

        Ok(Product::new(
            self.product_id,
            self.name,
            price,
            self.quantity_available,
            kind,
        ))
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        let (product_type, weight, download_link) = match &product.kind {
            ProductKind::Generic => (ProductType::Generic, None, None),
            ProductKind::Physical { weight } => (ProductType::Physical, Some(*weight), None),
            ProductKind::Digital { download_link } => {
                (ProductType::Digital, None, Some(download_link.clone()))
            }
        };

        Self {
            product_type,
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: money_to_decimal(&product.price),
            quantity_available: product.quantity_available(),
            weight,
            download_link,
        }
    }
}

/// Cart record in a cart file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Id of the product in the catalog
    #[serde(deserialize_with = "product_id")]
    pub product_id: String,

    /// Units held in the cart
    pub quantity: u32,
}

impl From<&CartItem> for CartRecord {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            quantity: item.quantity(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Integer(i64),
}

fn product_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawProductId::deserialize(deserializer)? {
        RawProductId::Text(id) => id,
        RawProductId::Integer(id) => id.to_string(),
    })
}
