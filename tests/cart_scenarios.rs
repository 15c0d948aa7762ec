//! End-to-end cart scenarios against catalog and cart files on disk.

use std::{fs, path::Path};

use rusty_money::{Money, iso::INR};
use tempfile::tempdir;
use testresult::TestResult;

use trolley::{prelude::*, storage};

const SINGLE_PRODUCT: &str = r#"[
    {"type": "generic", "product_id": "P1", "name": "Widget", "price": 100, "quantity_available": 5}
]"#;

fn open(dir: &Path, catalog: &str) -> TestResult<Session> {
    let paths = SessionPaths {
        catalog: dir.join("products.json"),
        cart: dir.join("cart.json"),
        persist_catalog: false,
    };

    fs::write(&paths.catalog, catalog)?;

    Ok(Session::open(paths, INR))
}

#[test]
fn add_update_remove_reconciles_stock_and_total() -> TestResult {
    let dir = tempdir()?;
    let mut session = open(dir.path(), SINGLE_PRODUCT)?;

    session.add("P1", 3)?;

    assert_eq!(session.catalog().stock("P1"), Some(2));
    assert_eq!(session.total()?, Money::from_minor(30_000, INR));

    session.update("P1", 1)?;

    assert_eq!(session.catalog().stock("P1"), Some(4));
    assert_eq!(session.total()?, Money::from_minor(10_000, INR));

    session.remove("P1")?;

    assert_eq!(session.catalog().stock("P1"), Some(5));
    assert!(session.cart().is_empty(), "cart should be empty");
    assert_eq!(session.total()?, Money::from_minor(0, INR));

    Ok(())
}

#[test]
fn failed_add_leaves_state_unchanged() -> TestResult {
    let dir = tempdir()?;
    let mut session = open(dir.path(), SINGLE_PRODUCT)?;

    let result = session.add("P1", 6);

    assert!(
        matches!(
            result,
            Err(SessionError::Cart(CartError::Catalog(
                CatalogError::InsufficientStock { .. }
            )))
        ),
        "unexpected result: {result:?}"
    );
    assert_eq!(session.catalog().stock("P1"), Some(5));
    assert!(session.cart().is_empty(), "cart should be empty");

    Ok(())
}

#[test]
fn cart_survives_a_restart_but_stock_does_not() -> TestResult {
    let dir = tempdir()?;
    let mut session = open(dir.path(), SINGLE_PRODUCT)?;

    session.add("P1", 2)?;

    let reopened = Session::open(session.paths().clone(), INR);

    assert_eq!(reopened.cart().quantity("P1"), Some(2));
    assert_eq!(reopened.catalog().stock("P1"), Some(5));

    Ok(())
}

#[test]
fn checkout_is_final() -> TestResult {
    let dir = tempdir()?;
    let mut session = open(dir.path(), SINGLE_PRODUCT)?;

    session.add("P1", 4)?;

    let checkout = session.checkout()?;

    assert_eq!(checkout.receipt.lines().len(), 1);
    assert_eq!(checkout.receipt.total(), Money::from_minor(40_000, INR));
    assert!(checkout.save_error.is_none(), "save should succeed");
    assert!(session.cart().is_empty(), "cart should be empty");
    assert_eq!(session.catalog().stock("P1"), Some(1));

    let saved = storage::read_cart(&session.paths().cart, session.catalog())?;

    assert_eq!(saved.map(|cart| cart.len()), Some(0));

    Ok(())
}

#[test]
fn malformed_files_start_an_empty_session() -> TestResult {
    let dir = tempdir()?;
    let session = open(dir.path(), "[{\"product_id\": ")?;

    assert!(session.catalog().is_empty(), "catalog should be empty");
    assert!(session.cart().is_empty(), "cart should be empty");

    Ok(())
}

#[test]
fn bundled_catalogs_load_in_both_formats() -> TestResult {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");

    let json = storage::read_catalog(&fixtures.join("products.json"), INR)?
        .ok_or("Expected JSON catalog")?;
    let yaml = storage::read_catalog(&fixtures.join("products.yml"), INR)?
        .ok_or("Expected YAML catalog")?;

    assert_eq!(json.len(), 4);
    assert_eq!(
        json.get("P2").map(|p| p.price),
        Some(Money::from_minor(249_950, INR))
    );

    assert_eq!(yaml.len(), 3);
    assert_eq!(yaml.stock("42"), Some(1000));

    Ok(())
}
