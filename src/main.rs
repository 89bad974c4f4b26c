//! loan-simulator CLI
//!
//! Run Price-table simulations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List the product catalogue
//! loan-simulator products
//!
//! # Simulate against a catalogue product (term and amount caps apply)
//! loan-simulator simulate --product cx-1 --amount 10000 --term 12
//!
//! # Simulate an ad-hoc annual rate, JSON output
//! loan-simulator simulate --rate 0.24 --amount 10000 --term 12 --format json
//! ```
//!
//! Set `RUST_LOG=debug` to trace each simulation.

use loan_simulator::amortization::engine::AmortizationEngine;
use loan_simulator::core::format::{currency_brl, percent};
use loan_simulator::core::money::parse_decimal;
use loan_simulator::core::product::{LoanProduct, SimulationRequest};
use loan_simulator::registry::catalogue::ProductRegistry;
use rust_decimal::Decimal;
use std::process;

fn print_usage() {
    eprintln!(
        r#"loan-simulator: fixed-installment (Price table) loan simulation

USAGE:
    loan-simulator <COMMAND> [OPTIONS]

COMMANDS:
    products    List the loan product catalogue
    simulate    Compute an amortization schedule
    help        Show this message

OPTIONS (products):
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (simulate):
    --amount <AMOUNT>   Principal, plain decimal (e.g. 12345.67)
    --term <MONTHS>     Number of monthly installments
    --product <ID>      Catalogue product to simulate (caps enforced)
    --rate <FRACTION>   Ad-hoc annual rate instead of a product (0.24 = 24%)
    --format <FORMAT>   Output format: text (default) or json

EXAMPLES:
    loan-simulator products
    loan-simulator simulate --product cx-2 --amount 30000 --term 48
    loan-simulator simulate --rate 0 --amount 6000 --term 6 --format json"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn take_value(args: &[String], i: usize, flag: &str, expected: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires {}", flag, expected)))
}

fn parse_format(value: String) -> String {
    if value == "text" || value == "json" {
        value
    } else {
        fail(format!("unknown format '{}': expected 'text' or 'json'", value))
    }
}

fn cmd_products(args: &[String]) {
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                i += 1;
                format = parse_format(take_value(args, i, "--format", "'text' or 'json'"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let registry = ProductRegistry::default();

    if format == "json" {
        let json = serde_json::to_string_pretty(registry.list())
            .unwrap_or_else(|e| fail(format!("serializing products: {}", e)));
        println!("{}", json);
    } else {
        println!(
            "{:<8}  {:<24}  {:>10}  {:>10}  {:>16}",
            "ID", "NAME", "RATE a.a.", "MAX TERM", "MAX AMOUNT"
        );
        for product in registry.list() {
            println!(
                "{:<8}  {:<24}  {:>10}  {:>10}  {:>16}",
                product.id().as_str(),
                product.name(),
                percent(product.annual_rate()),
                product.max_term_months(),
                product
                    .max_amount()
                    .map(currency_brl)
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }
}

fn cmd_simulate(args: &[String]) {
    let mut product_id: Option<String> = None;
    let mut rate: Option<Decimal> = None;
    let mut amount: Option<Decimal> = None;
    let mut term: Option<u32> = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--product" => {
                i += 1;
                product_id = Some(take_value(args, i, "--product", "a product id"));
            }
            "--rate" => {
                i += 1;
                let raw = take_value(args, i, "--rate", "an annual rate fraction");
                rate = Some(parse_decimal(&raw).unwrap_or_else(|e| fail(e)));
            }
            "--amount" => {
                i += 1;
                let raw = take_value(args, i, "--amount", "a decimal amount");
                amount = Some(parse_decimal(&raw).unwrap_or_else(|e| fail(e)));
            }
            "--term" => {
                i += 1;
                let raw = take_value(args, i, "--term", "a number of months");
                term = Some(
                    raw.parse()
                        .unwrap_or_else(|_| fail(format!("invalid term '{}'", raw))),
                );
            }
            "--format" => {
                i += 1;
                format = parse_format(take_value(args, i, "--format", "'text' or 'json'"));
            }
            _ => fail(format!("unknown option: {}", args[i])),
        }
        i += 1;
    }

    let amount = amount.unwrap_or_else(|| fail("--amount <AMOUNT> is required"));
    let term = term.unwrap_or_else(|| fail("--term <MONTHS> is required"));

    let result = match (product_id, rate) {
        (Some(id), None) => {
            let registry = ProductRegistry::default();
            registry
                .simulate(&SimulationRequest::new(id, amount, term))
                .unwrap_or_else(|e| fail(e))
        }
        (None, Some(rate)) => {
            let product = LoanProduct::new("ad-hoc", "Ad-hoc rate", rate, term);
            AmortizationEngine::simulate(&product, amount, term).unwrap_or_else(|e| fail(e))
        }
        (Some(_), Some(_)) => fail("use either --product or --rate, not both"),
        (None, None) => fail("one of --product <ID> or --rate <FRACTION> is required"),
    };

    if format == "json" {
        let json = serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| fail(format!("serializing result: {}", e)));
        println!("{}", json);
    } else {
        print!("{}", result);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "products" => cmd_products(rest),
        "simulate" => cmd_simulate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
