//! Interactive menu

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, error};

use crate::session::{Session, SessionError};

/// Menu errors. Only terminal I/O failures end the menu early.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Reading input or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1. View Products
    ViewProducts,
    /// 2. Add Product to Cart
    AddToCart,
    /// 3. View Cart
    ViewCart,
    /// 4. Update Quantity
    UpdateQuantity,
    /// 5. Remove Item
    RemoveItem,
    /// 6. Checkout
    Checkout,
    /// 7. Exit
    Exit,
}

/// The input was not one of the menu numbers
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid menu choice: {0:?}")]
pub struct InvalidChoice(pub String);

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::ViewProducts),
            "2" => Ok(MenuChoice::AddToCart),
            "3" => Ok(MenuChoice::ViewCart),
            "4" => Ok(MenuChoice::UpdateQuantity),
            "5" => Ok(MenuChoice::RemoveItem),
            "6" => Ok(MenuChoice::Checkout),
            "7" => Ok(MenuChoice::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

/// Reasons a quantity entered at the prompt is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    /// Not a whole number
    #[error("not a whole number: {0:?}")]
    NotANumber(String),

    /// Below zero
    #[error("quantity cannot be negative: {0}")]
    Negative(i64),

    /// Larger than any stock count
    #[error("quantity too large: {0}")]
    TooLarge(i64),
}

/// Parse a quantity typed at the prompt.
///
/// # Errors
///
/// Returns a [`QuantityError`] for anything other than a whole number in `0..=u32::MAX`.
pub fn parse_quantity(input: &str) -> Result<u32, QuantityError> {
    let trimmed = input.trim();

    let value = trimmed
        .parse::<i64>()
        .map_err(|_err| QuantityError::NotANumber(trimmed.to_string()))?;

    if value < 0 {
        return Err(QuantityError::Negative(value));
    }

    u32::try_from(value).map_err(|_err| QuantityError::TooLarge(value))
}

const MENU: &str = concat!(
    "\n1. View Products\n",
    "2. Add Product to Cart\n",
    "3. View Cart\n",
    "4. Update Quantity\n",
    "5. Remove Item\n",
    "6. Checkout\n",
    "7. Exit",
);

/// Answer to a prompt
enum Reply<T> {
    Value(T),
    Rejected,
    Closed,
}

/// Text menu driving a [`Session`] from line-based input.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu reading from `input` and writing to `output`.
    pub fn new(session: &'a mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`] if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), MenuError> {
        loop {
            writeln!(self.output, "{MENU}")?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("input closed");

                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(err) => {
                    debug!(%err, "rejected menu input");
                    writeln!(self.output, "Invalid choice! Please enter a valid number")?;

                    continue;
                }
            };

            let keep_going = match choice {
                MenuChoice::ViewProducts => self.view_products(),
                MenuChoice::AddToCart => self.add_to_cart(),
                MenuChoice::ViewCart => self.view_cart(),
                MenuChoice::UpdateQuantity => self.update_quantity(),
                MenuChoice::RemoveItem => self.remove_item(),
                MenuChoice::Checkout => self.checkout(),
                MenuChoice::Exit => {
                    writeln!(self.output, "Exiting... Thank you for shopping!")?;

                    return Ok(());
                }
            }?;

            if !keep_going {
                debug!("input closed");

                return Ok(());
            }
        }
    }

    /// Write `text` and read one line. `None` means input has ended.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, MenuError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for a quantity, reporting rejected input to the user.
    fn prompt_quantity(&mut self, text: &str) -> Result<Reply<u32>, MenuError> {
        let Some(line) = self.prompt(text)? else {
            return Ok(Reply::Closed);
        };

        match parse_quantity(&line) {
            Ok(quantity) => Ok(Reply::Value(quantity)),
            Err(err @ QuantityError::Negative(_)) => {
                debug!(%err, "rejected quantity");
                writeln!(self.output, "Quantity cannot be negative.")?;

                Ok(Reply::Rejected)
            }
            Err(err) => {
                debug!(%err, "rejected quantity");
                writeln!(self.output, "Invalid input!")?;

                Ok(Reply::Rejected)
            }
        }
    }

    fn view_products(&mut self) -> Result<bool, MenuError> {
        writeln!(self.output, "Available Products:-")?;

        self.session.catalog().write_to(&mut self.output)?;

        Ok(true)
    }

    fn add_to_cart(&mut self) -> Result<bool, MenuError> {
        let Some(product_id) = self.prompt("Enter product ID: ")? else {
            return Ok(false);
        };

        let quantity = match self.prompt_quantity("Enter quantity: ")? {
            Reply::Value(quantity) => quantity,
            Reply::Rejected => return Ok(true),
            Reply::Closed => return Ok(false),
        };

        let result = self.session.add(product_id.trim(), quantity);

        self.report(result, "Item added.", "Failed to add item")?;

        Ok(true)
    }

    fn view_cart(&mut self) -> Result<bool, MenuError> {
        match self.session.receipt() {
            Ok(receipt) => receipt.write_to(&mut self.output)?,
            Err(err) => {
                error!(%err, "could not price cart");
                writeln!(self.output, "Could not display cart.")?;
            }
        }

        Ok(true)
    }

    fn update_quantity(&mut self) -> Result<bool, MenuError> {
        let Some(product_id) = self.prompt("Enter product ID: ")? else {
            return Ok(false);
        };

        let quantity = match self.prompt_quantity("Enter new quantity: ")? {
            Reply::Value(quantity) => quantity,
            Reply::Rejected => return Ok(true),
            Reply::Closed => return Ok(false),
        };

        let result = self.session.update(product_id.trim(), quantity);

        self.report(result, "Quantity updated", "Failed to update")?;

        Ok(true)
    }

    fn remove_item(&mut self) -> Result<bool, MenuError> {
        if self.session.cart().is_empty() {
            writeln!(self.output, "Cart is empty!")?;

            return Ok(true);
        }

        let Some(product_id) = self.prompt("Enter product ID to remove: ")? else {
            return Ok(false);
        };

        let result = self.session.remove(product_id.trim());

        self.report(result, "Item removed", "Item not found in cart!")?;

        Ok(true)
    }

    fn checkout(&mut self) -> Result<bool, MenuError> {
        if self.session.cart().is_empty() {
            writeln!(self.output, "Cart is empty!")?;

            return Ok(true);
        }

        match self.session.checkout() {
            Ok(checkout) => {
                checkout.receipt.write_to(&mut self.output)?;
                writeln!(self.output, "Proceeding to checkout...")?;
                writeln!(self.output, "Thank you for shopping!")?;

                if let Some(err) = checkout.save_error {
                    error!(%err, "checked out but the emptied cart could not be saved");
                    writeln!(self.output, "Warning: the cart could not be saved.")?;
                }
            }
            Err(err) => {
                error!(%err, "checkout failed");
                writeln!(self.output, "Checkout failed.")?;
            }
        }

        Ok(true)
    }

    fn report(
        &mut self,
        result: Result<(), SessionError>,
        success: &str,
        failure: &str,
    ) -> Result<(), MenuError> {
        match result {
            Ok(()) => writeln!(self.output, "{success}")?,
            Err(SessionError::Cart(err)) => {
                debug!(%err, "cart operation rejected");
                writeln!(self.output, "{failure}")?;
            }
            Err(SessionError::Storage(err)) => {
                error!(%err, "cart changed but could not be saved");
                writeln!(self.output, "{success}")?;
                writeln!(self.output, "Warning: the cart could not be saved.")?;
            }
        }

        Ok(())
    }
}
