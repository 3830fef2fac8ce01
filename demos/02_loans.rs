/// loans - qualifying deposits, delayed grants and instant grants
use bankist_rs::{Bank, BankConfig, Money, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== loans example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    // standard config: loans land three seconds after the request
    let mut bank = Bank::with_demo_accounts(BankConfig::standard())?;
    bank.login("jessica", 2222, &time)?;

    // largest deposit is 8500, so anything above 85000 is refused
    match bank.request_loan(Money::from_major(100_000), &time) {
        Ok(_) => println!("unexpected approval"),
        Err(e) => println!("refused: {}", e),
    }

    let approval = bank.request_loan(Money::from_major(5_000), &time)?;
    println!("approved {} (pending)", approval.amount);
    println!("balance now: {}", bank.dashboard(&time)?.balance);

    controller.advance(Duration::seconds(3));
    bank.advance(&time)?;
    println!("balance after 3s: {}", bank.dashboard(&time)?.balance);

    // initials as usernames, loans credited on the spot
    println!("\n--- instant loans ---");
    let mut instant = Bank::with_demo_accounts(BankConfig::initials_instant_loans())?;
    instant.login("stw", 3333, &time)?;
    instant.request_loan(Money::from_major(1_000), &time)?;
    let view = instant.dashboard(&time)?;
    println!("{}", view.welcome);
    println!("balance: {}", view.balance);
    for row in view.rows.iter().take(3) {
        println!("  {:<14} {:>12}  {}", row.label, row.amount, row.date);
    }

    Ok(())
}
