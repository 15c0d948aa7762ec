//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError},
    config::Config,
    menu::{Menu, MenuChoice, MenuError},
    pricing::{PriceError, parse_currency},
    products::{Product, ProductKey, ProductKind},
    receipt::{Receipt, ReceiptLine},
    session::{Checkout, Session, SessionError, SessionPaths},
    storage::StorageError,
};
