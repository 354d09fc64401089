//! # Seed Data Generator
//!
//! Populates a SQLite database with a laundry shop's price list, a few
//! customers and employees, and a run of transactions for development.
//!
//! ## Usage
//! ```bash
//! # 30 transactions (default) into ./laundry_dev.db
//! cargo run -p laundry-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p laundry-db --bin seed -- --transactions 200 --db ./data/laundry.db
//! ```
//!
//! Transactions cycle through customers, employees and products, so the
//! `startDate` / `endDate` / `productName` filters have something to bite on.

use std::env;

use chrono::{Days, NaiveDate};
use laundry_core::{BillDates, ContactDraft, LineItemRequest, NewTransaction, ProductDraft};
use laundry_db::{Database, DbConfig};

/// Price list: (name, unit, price)
const PRODUCTS: &[(&str, &str, i64)] = &[
    ("Cuci + Setrika", "kg", 7000),
    ("Cuci Kering", "kg", 5000),
    ("Setrika Saja", "kg", 4000),
    ("Shirt Wash", "pcs", 8000),
    ("Shirt Dry Clean", "pcs", 15000),
    ("Bed Cover", "pcs", 25000),
    ("Blanket", "pcs", 20000),
    ("Curtain", "m", 12000),
    ("Jacket", "pcs", 18000),
    ("Shoes", "pair", 30000),
];

/// (name, phone, address)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Jessica", "081234567890", "Jl. Melati No. 5, Jakarta"),
    ("Andi", "081298765432", "Jl. Kenanga No. 12, Depok"),
    ("Sari", "085711223344", "Jl. Mawar No. 3, Bogor"),
    ("Rudi", "087855667788", "Jl. Anggrek No. 8, Bekasi"),
    ("Maya", "081377889900", "Jl. Dahlia No. 21, Tangerang"),
];

const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Budi", "081311112222", "Jl. Cempaka No. 1, Jakarta"),
    ("Siti", "081333334444", "Jl. Flamboyan No. 7, Jakarta"),
];

fn contact((name, phone, address): (&str, &str, &str)) -> ContactDraft {
    ContactDraft {
        name: name.to_string(),
        phone_number: phone.to_string(),
        address: address.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 30;
    let mut db_path = String::from("./laundry_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--transactions" | "-t" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Laundry Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --transactions <N>  Number of transactions to generate (default: 30)");
                println!("  -d, --db <PATH>         SQLite file path (default: ./laundry_dev.db)");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Laundry Seed Data Generator");
    println!("==============================");
    println!("Database:     {}", db_path);
    println!("Transactions: {}", count);
    println!();

    let db = Database::new(DbConfig::sqlite(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for &(name, unit, price) in PRODUCTS {
        let product = db
            .products()
            .create(ProductDraft {
                name: name.to_string(),
                unit: unit.to_string(),
                price,
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("✓ {} products", product_ids.len());

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for &row in CUSTOMERS {
        customer_ids.push(db.customers().create(contact(row)).await?.id);
    }
    println!("✓ {} customers", customer_ids.len());

    let mut employee_ids = Vec::with_capacity(EMPLOYEES.len());
    for &row in EMPLOYEES {
        employee_ids.push(db.employees().create(contact(row)).await?.id);
    }
    println!("✓ {} employees", employee_ids.len());

    println!();
    println!("Generating transactions...");

    let first_day = NaiveDate::from_ymd_opt(2024, 1, 2).ok_or("invalid start date")?;
    let start = std::time::Instant::now();
    let mut generated = 0;

    for n in 0..count {
        let entry = first_day
            .checked_add_days(Days::new((n as u64 * 3) % 365))
            .ok_or("date out of range")?;
        let finish = entry
            .checked_add_days(Days::new(2 + (n as u64 % 3)))
            .ok_or("date out of range")?;

        let item_count = 1 + n % 3;
        let items = (0..item_count)
            .map(|k| LineItemRequest {
                product_id: product_ids[(n * 7 + k * 3) % product_ids.len()],
                qty: 1 + ((n + k) % 5) as i64,
            })
            .collect();

        let bill = NewTransaction {
            customer_id: customer_ids[n % customer_ids.len()],
            employee_id: employee_ids[n % employee_ids.len()],
            dates: BillDates {
                bill_date: entry,
                entry_date: entry,
                finish_date: finish,
            },
            items,
        };

        match db.transactions().create(&bill).await {
            Ok(_) => generated += 1,
            Err(e) => eprintln!("Failed to insert transaction {}: {}", n, e),
        }
    }

    let elapsed = start.elapsed();
    println!("✓ Generated {} transactions in {:?}", generated, elapsed);

    println!();
    println!("Verifying...");
    println!("  Transactions stored: {}", db.transactions().count().await?);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
