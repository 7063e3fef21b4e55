//! # Menu Session
//!
//! The interactive loop: read a command, run it, repeat.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add      register a purchase (new product or restock)                 │
//! │  list     products, quantities and sell prices                         │
//! │  sale     sell one or more products, then print the receipt            │
//! │  profits  gross profit, total costs, net profit                        │
//! │  help     describe the commands                                        │
//! │  exit     leave (end of input does the same)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A refused operation (unknown product, not enough stock, an amount too
//! large to record) is reported and the menu carries on. A failed save is
//! reported too; the in-memory change stays and the next successful save
//! writes it.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::error;

use sprout_core::{
    CoreError, InventoryListing, Money, ProductName, ProductRecord, SaleSession,
};
use sprout_store::{LoadOutcome, Register, StoreError};

use crate::prompt::Prompter;

const MENU: &str = "Hello! Choose which operation to perform:\n\
                    1. add\n\
                    2. list\n\
                    3. sale\n\
                    4. profits\n\
                    5. help\n\
                    6. exit";

const HELP: &str = "1. add: register new products, with name, quantity, selling price and purchase price.\n\
                    2. list: list all products present in the warehouse.\n\
                    3. sale: register sales made for each product and display the receipt.\n\
                    4. profits: show total gross and net profits accumulated.\n\
                    5. help: display the menu with the description of commands\n\
                    6. exit: terminate program execution.";

/// Whether the menu keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive run of the register.
pub struct Session<R, W> {
    register: Register,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(register: Register, input: R, output: W) -> Self {
        Session {
            register,
            io: Prompter::new(input, output),
        }
    }

    /// Tells the user what was found on disk.
    pub fn greet(&mut self, outcome: LoadOutcome) -> io::Result<()> {
        self.io.say(match outcome {
            LoadOutcome::Existing => "The warehouse contains already registered products",
            LoadOutcome::Created => "The list of products in the warehouse is empty!",
            LoadOutcome::Recovered => "Cannot open file, a new one will be created.",
        })
    }

    /// Runs commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(command) = self.io.ask(MENU)? else {
                break;
            };

            match self.dispatch(&command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => match e.downcast_ref::<StoreError>() {
                    Some(store) => {
                        error!(error = %store, "Command failed");
                        self.io.say(format_args!("Operation failed: {store}"))?;
                    }
                    None => return Err(e),
                },
            }
        }

        self.io.say("End.")?;
        Ok(())
    }

    pub fn into_register(self) -> Register {
        self.register
    }

    fn dispatch(&mut self, command: &str) -> Result<Flow> {
        match command {
            "add" | "1" => {
                self.io.say("You requested operation 1: Register a new product")?;
                self.add()
            }
            "list" | "2" => {
                self.io.say("You requested operation 2: List products in warehouse")?;
                self.list()?;
                Ok(Flow::Continue)
            }
            "sale" | "3" => {
                self.io.say("You requested operation 3: Register a sale")?;
                self.sale()
            }
            "profits" | "4" => {
                self.io.say(self.register.report_profits())?;
                self.io.say(self.register.report_costs())?;
                Ok(Flow::Continue)
            }
            "help" | "5" => {
                self.io.say(HELP)?;
                Ok(Flow::Continue)
            }
            "exit" | "6" => {
                self.io.say("bye bye")?;
                Ok(Flow::Exit)
            }
            "" => {
                self.io.say("Enter the name of the chosen operation.")?;
                Ok(Flow::Continue)
            }
            _ => {
                self.io
                    .say("The command you entered is not valid, try again!")?;
                Ok(Flow::Continue)
            }
        }
    }

    // =========================================================================
    // add
    // =========================================================================

    /// Registers a purchase.
    ///
    /// For a product already in stock only the added quantity is asked for,
    /// plus any price the entry lacks. The record handed to the register
    /// carries `existing + added` as its quantity.
    fn add(&mut self) -> Result<Flow> {
        let Some(name) = self.io.ask_name("Product name:")? else {
            return Ok(Flow::Exit);
        };

        let existing = self.register.inventory().get(&name).cloned();
        let record = match existing {
            Some(entry) => {
                self.io
                    .say(format_args!("Product {name} already present in warehouse."))?;
                let Some(added) = self.io.ask_quantity("Quantity:")? else {
                    return Ok(Flow::Exit);
                };
                self.io
                    .say(format_args!("Quantity added to {name} equal to {added}."))?;

                let (buy_price, sell_price) = match (entry.buy_price, entry.sell_price) {
                    (Some(buy), Some(sell)) => (buy, sell),
                    (buy, sell) => {
                        self.io.say(format_args!(
                            "The existing product {name} does not have a registered purchase or selling price."
                        ))?;
                        let Some((new_buy, new_sell)) = self.ask_prices()? else {
                            return Ok(Flow::Exit);
                        };
                        (buy.unwrap_or(new_buy), sell.unwrap_or(new_sell))
                    }
                };

                let Some(quantity) = entry.quantity.checked_add(added) else {
                    self.io.say(CoreError::Overflow {
                        product: name.to_string(),
                    })?;
                    return Ok(Flow::Continue);
                };
                ProductRecord::new(name, quantity, buy_price, sell_price)
            }
            None => {
                let Some((buy_price, sell_price)) = self.ask_prices()? else {
                    return Ok(Flow::Exit);
                };
                let Some(quantity) = self.io.ask_quantity("Quantity:")? else {
                    return Ok(Flow::Exit);
                };
                ProductRecord::new(name, quantity, buy_price, sell_price)
            }
        };

        match self.register.add_product(&record) {
            Ok(_) => Ok(Flow::Continue),
            Err(StoreError::Core(rejection)) => {
                self.report_rejection(&record.name, &rejection)?;
                Ok(Flow::Continue)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn ask_prices(&mut self) -> io::Result<Option<(Money, Money)>> {
        let Some(buy) = self.io.ask_price("Purchase price:")? else {
            return Ok(None);
        };
        let Some(sell) = self.io.ask_price("Selling price:")? else {
            return Ok(None);
        };
        Ok(Some((buy, sell)))
    }

    // =========================================================================
    // list
    // =========================================================================

    fn list(&mut self) -> io::Result<()> {
        match self.register.list_inventory() {
            InventoryListing::Empty => self.io.say("The warehouse is empty."),
            InventoryListing::Rows(rows) => {
                self.io.say("PRODUCT QUANTITY PRICE")?;
                for row in rows {
                    let price = self
                        .register
                        .config()
                        .format_money(row.sell_price.unwrap_or_default());
                    self.io
                        .say(format_args!("{} {} {}", row.name, row.quantity, price))?;
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // sale
    // =========================================================================

    /// Sells products one line at a time, then prints the receipt.
    ///
    /// Each confirmed line is committed immediately. Asking for more stock
    /// than is available ends the session; lines already sold stay sold.
    fn sale(&mut self) -> Result<Flow> {
        let mut session = SaleSession::new();
        let flow = self.sale_lines(&mut session)?;

        if !session.is_empty() {
            self.io
                .say(self.register.report_transaction(session.lines()))?;
        }
        Ok(flow)
    }

    fn sale_lines(&mut self, session: &mut SaleSession) -> Result<Flow> {
        loop {
            let Some(name) = self.io.ask_name("Product name to sell:")? else {
                return Ok(Flow::Exit);
            };

            if !self.register.inventory().contains(&name) {
                self.io
                    .say(format_args!("Product {name} not present in warehouse."))?;
                match self.io.ask_yes_no("Try with another product? [yes/no]")? {
                    Some(true) => continue,
                    Some(false) => return Ok(Flow::Continue),
                    None => return Ok(Flow::Exit),
                }
            }

            let Some(quantity) = self.io.ask_quantity("Quantity:")? else {
                return Ok(Flow::Exit);
            };

            match self.register.sell(&name, quantity) {
                Ok(line) => {
                    self.io.say(format_args!(
                        "Sale Registered: {}X {}: {}",
                        line.quantity, line.product, line.unit_price
                    ))?;
                    session.push(line);
                }
                Err(StoreError::Core(rejection)) => {
                    self.report_rejection(&name, &rejection)?;
                    return Ok(Flow::Continue);
                }
                Err(e) => return Err(e.into()),
            }

            match self.io.ask_yes_no("Add another product? [yes/no]")? {
                Some(true) => continue,
                Some(false) => return Ok(Flow::Continue),
                None => return Ok(Flow::Exit),
            }
        }
    }

    fn report_rejection(&mut self, name: &ProductName, rejection: &CoreError) -> io::Result<()> {
        match rejection {
            CoreError::InsufficientStock { .. } => self.io.say(format_args!(
                "You are selling a quantity of {name} not available in warehouse"
            )),
            other => self.io.say(other),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
