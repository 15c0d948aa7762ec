//! Scripted runs of the interactive menu.

use std::{fs, io::Cursor, path::Path};

use rusty_money::iso::INR;
use tempfile::tempdir;
use testresult::TestResult;

use trolley::{
    menu::Menu,
    session::{Session, SessionPaths},
};

const CATALOG: &str = r#"[
    {"type": "physical", "product_id": "P1", "name": "Laptop", "price": 100, "quantity_available": 5, "weight": 2},
    {"type": "digital", "product_id": "P2", "name": "Manual", "price": 15, "quantity_available": 10, "download_link": "https://example.com/manual"}
]"#;

fn session(dir: &Path) -> TestResult<Session> {
    let paths = SessionPaths {
        catalog: dir.join("products.json"),
        cart: dir.join("cart.json"),
        persist_catalog: false,
    };

    fs::write(&paths.catalog, CATALOG)?;

    Ok(Session::open(paths, INR))
}

fn run(session: &mut Session, script: &str) -> TestResult<String> {
    let mut output = Vec::new();

    Menu::new(session, Cursor::new(script.as_bytes()), &mut output).run()?;

    Ok(String::from_utf8(output)?)
}

#[test]
fn exit_says_goodbye() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "7\n")?;

    assert!(output.contains("1. View Products"), "output: {output}");
    assert!(output.contains("Enter your choice: "), "output: {output}");
    assert!(
        output.ends_with("Exiting... Thank you for shopping!\n"),
        "output: {output}"
    );

    Ok(())
}

#[test]
fn view_products_lists_the_catalog() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "1\n7\n")?;

    assert!(output.contains("Available Products:-"), "output: {output}");
    assert!(output.contains("Laptop"), "output: {output}");
    assert!(output.contains("Link: https://example.com/manual"), "output: {output}");

    Ok(())
}

#[test]
fn add_update_and_remove_through_the_menu() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "2\nP1\n3\n4\nP1\n1\n3\n5\nP1\n7\n")?;

    assert!(output.contains("Item added."), "output: {output}");
    assert!(output.contains("Quantity updated"), "output: {output}");
    assert!(output.contains("Total: "), "output: {output}");
    assert!(output.contains("Item removed"), "output: {output}");
    assert!(session.cart().is_empty(), "cart should be empty");
    assert_eq!(session.catalog().stock("P1"), Some(5));

    Ok(())
}

#[test]
fn invalid_input_is_reported_and_the_loop_continues() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "9\n2\nP1\nmany\n4\nP1\n-1\n2\nP9\n1\n7\n")?;

    assert!(
        output.contains("Invalid choice! Please enter a valid number"),
        "output: {output}"
    );
    assert!(output.contains("Invalid input!"), "output: {output}");
    assert!(output.contains("Quantity cannot be negative."), "output: {output}");
    assert!(output.contains("Failed to add item"), "output: {output}");
    assert!(output.ends_with("Exiting... Thank you for shopping!\n"), "output: {output}");
    assert_eq!(session.catalog().stock("P1"), Some(5));

    Ok(())
}

#[test]
fn update_of_item_not_in_cart_fails() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "4\nP1\n2\n7\n")?;

    assert!(output.contains("Failed to update"), "output: {output}");

    Ok(())
}

#[test]
fn remove_and_checkout_on_empty_cart_do_not_prompt() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "5\n6\n7\n")?;

    assert_eq!(output.matches("Cart is empty!").count(), 2);
    assert!(
        !output.contains("Enter product ID to remove: "),
        "output: {output}"
    );

    Ok(())
}

#[test]
fn remove_of_unknown_item_is_reported() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "2\nP2\n1\n5\nP1\n7\n")?;

    assert!(output.contains("Item not found in cart!"), "output: {output}");
    assert_eq!(session.cart().quantity("P2"), Some(1));

    Ok(())
}

#[test]
fn checkout_prints_receipt_and_keeps_stock_sold() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "2\nP2\n3\n6\n7\n")?;

    assert!(output.contains("Manual"), "output: {output}");
    assert!(output.contains("Proceeding to checkout..."), "output: {output}");
    assert!(output.contains("Thank you for shopping!"), "output: {output}");
    assert!(session.cart().is_empty(), "cart should be empty");
    assert_eq!(session.catalog().stock("P2"), Some(7));

    Ok(())
}

#[test]
fn checkout_warns_when_the_emptied_cart_cannot_be_saved() -> TestResult {
    let dir = tempdir()?;
    let paths = SessionPaths {
        catalog: dir.path().join("products.json"),
        cart: dir.path().join("missing").join("cart.json"),
        persist_catalog: false,
    };

    fs::write(&paths.catalog, CATALOG)?;

    let mut session = Session::open(paths, INR);

    let output = run(&mut session, "2\nP1\n1\n6\n7\n")?;
    let (_, after_checkout) = output
        .split_once("Thank you for shopping!")
        .ok_or("Expected checkout to complete")?;

    assert!(
        after_checkout.contains("Warning: the cart could not be saved."),
        "output: {output}"
    );
    assert!(session.cart().is_empty(), "cart should be empty");

    Ok(())
}

#[test]
fn end_of_input_stops_the_menu() -> TestResult {
    let dir = tempdir()?;
    let mut session = session(dir.path())?;

    let output = run(&mut session, "2\nP1\n")?;

    assert!(output.ends_with("Enter quantity: "), "output: {output}");
    assert!(session.cart().is_empty(), "cart should be empty");

    Ok(())
}
