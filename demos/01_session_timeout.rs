/// session timeout - the auto logout countdown under controlled time
use bankist_rs::{Bank, BankConfig, Event, Money, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== session timeout example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut bank = Bank::with_demo_accounts(BankConfig::standard())?;
    bank.login("jessica", 2222, &time)?;
    println!("logged in at {}", time.now().format("%H:%M:%S"));
    println!("countdown: {}", bank.countdown().unwrap_or_default());

    // two and a half idle minutes
    controller.advance(Duration::seconds(150));
    bank.advance(&time)?;
    println!("\nafter 150s idle: {}", bank.countdown().unwrap_or_default());

    // any transfer restarts the countdown
    bank.transfer("john", Money::from_major(20), &time)?;
    println!("after a transfer: {}", bank.countdown().unwrap_or_default());

    // now stay idle for the full five minutes
    controller.advance(Duration::seconds(300));
    bank.advance(&time)?;
    println!("\nafter 300s idle, logged in: {}", bank.is_logged_in());

    for event in bank.take_events() {
        if let Event::LoggedOut { reason, timestamp, .. } = event {
            println!("logged out ({:?}) at {}", reason, timestamp.format("%H:%M:%S"));
        }
    }

    Ok(())
}
