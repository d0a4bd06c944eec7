//! # Operator Commands
//!
//! One command per input line. Cart lines are addressed by their 1-based
//! position in the `cart` listing.
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Category      Command              Effect                              │
//! │  ────────      ───────              ──────                              │
//! │  Lookup        lookup <barcode>     manual entry, same path as a scan   │
//! │  Draft         name <text>          set draft name                      │
//! │                price <amount>       set draft price (e.g. 1.50)         │
//! │                qty <n>              set draft quantity                  │
//! │                add                  submit draft to the cart            │
//! │  Cart          set <line> <n>       overwrite quantity                  │
//! │                inc <line>           quantity + 1                        │
//! │                dec <line>           quantity - 1 (stops at 1)           │
//! │                rm <line>            remove line                         │
//! │                clear                empty cart                          │
//! │                checkout             complete order, then empty cart     │
//! │  View          cart | status | help                                     │
//! │  Session       quit                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use scanpos_core::{Money, MAX_ITEM_QUANTITY};

use crate::error::{AppError, AppResult};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup(String),
    Name(String),
    Price(Money),
    Qty(i64),
    Add,
    Set { line: usize, quantity: i64 },
    Inc(usize),
    Dec(usize),
    Remove(usize),
    Clear,
    Checkout,
    Cart,
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parses an input line. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> AppResult<Option<Command>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word.to_lowercase().as_str() {
            "lookup" | "l" | "scan" => Ok(Command::Lookup(required(rest, "lookup <barcode>")?)),
            "name" => Ok(Command::Name(required(rest, "name <text>")?)),
            "price" => {
                let raw = required(rest, "price <amount>")?;
                Money::parse_decimal(&raw)
                    .map(Command::Price)
                    .map_err(AppError::from)
            }
            "qty" | "quantity" => {
                let quantity = parse_number::<i64>(rest, "qty <n>")?;
                if quantity < 1 {
                    return Err(AppError::validation("Quantity must be at least 1"));
                }
                if quantity > MAX_ITEM_QUANTITY {
                    return Err(AppError::validation(format!(
                        "Quantity cannot exceed {}",
                        MAX_ITEM_QUANTITY
                    )));
                }
                Ok(Command::Qty(quantity))
            }
            "add" => Ok(Command::Add),
            "set" => {
                let mut parts = rest.split_whitespace();
                let line = parse_number::<usize>(parts.next().unwrap_or(""), "set <line> <n>")?;
                let quantity = parse_number::<i64>(parts.next().unwrap_or(""), "set <line> <n>")?;
                Ok(Command::Set { line, quantity })
            }
            "inc" | "+" => Ok(Command::Inc(parse_number(rest, "inc <line>")?)),
            "dec" | "-" => Ok(Command::Dec(parse_number(rest, "dec <line>")?)),
            "rm" | "remove" => Ok(Command::Remove(parse_number(rest, "rm <line>")?)),
            "clear" => Ok(Command::Clear),
            "checkout" | "done" => Ok(Command::Checkout),
            "cart" | "ls" => Ok(Command::Cart),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(AppError::unknown_command(format!(
                "Unknown command: '{}'. Type 'help' for a list of commands.",
                other
            ))),
        }
    }
}

fn required(rest: &str, usage: &str) -> AppResult<String> {
    if rest.is_empty() {
        Err(AppError::validation(format!("Usage: {}", usage)))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_number<T: FromStr>(raw: &str, usage: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Usage: {}", usage)))
}

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  lookup <barcode>   look up a barcode (manual entry)
  name <text>        set the product name in the draft
  price <amount>     set the product price in the draft (e.g. 1.50)
  qty <n>            set the quantity in the draft
  add                add the draft to the cart
  set <line> <n>     set the quantity of a cart line
  inc <line>         increase a cart line by one
  dec <line>         decrease a cart line by one
  rm <line>          remove a cart line
  clear              empty the cart
  checkout           complete the order
  cart               show the cart
  status             show scanner status and the draft
  help               show this help
  quit               exit";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "lookup 4760001234567".parse::<Command>().unwrap(),
            Command::Lookup("4760001234567".to_string())
        );
        assert_eq!(
            "name Sparkling Water".parse::<Command>().unwrap(),
            Command::Name("Sparkling Water".to_string())
        );
        assert_eq!(
            "price 1.50".parse::<Command>().unwrap(),
            Command::Price(Money::from_cents(150))
        );
        assert_eq!("qty 3".parse::<Command>().unwrap(), Command::Qty(3));
        assert_eq!(
            "set 2 5".parse::<Command>().unwrap(),
            Command::Set { line: 2, quantity: 5 }
        );
        assert_eq!("  RM 1 ".parse::<Command>().unwrap(), Command::Remove(1));
        assert_eq!("checkout".parse::<Command>().unwrap(), Command::Checkout);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_set_allows_zero_for_ledger_to_ignore() {
        assert_eq!(
            "set 1 0".parse::<Command>().unwrap(),
            Command::Set { line: 1, quantity: 0 }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "frobnicate".parse::<Command>().unwrap_err().code,
            ErrorCode::UnknownCommand
        );
        assert!("lookup".parse::<Command>().is_err());
        assert!("price abc".parse::<Command>().is_err());
        assert!("qty 0".parse::<Command>().is_err());
        assert_eq!(
            "qty 1000".parse::<Command>().unwrap_err().message,
            "Quantity cannot exceed 999"
        );
        assert!("set 1".parse::<Command>().is_err());
        assert!("inc x".parse::<Command>().is_err());
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
        assert_eq!(Command::parse_line("cart").unwrap(), Some(Command::Cart));
    }
}
