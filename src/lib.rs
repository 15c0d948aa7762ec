//! Trolley
//!
//! Trolley is a single-user shopping cart: a product catalog with stock counts and a
//! cart whose quantities are reserved against that stock, both kept in flat files and
//! driven from a text menu.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod menu;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod session;
pub mod storage;
