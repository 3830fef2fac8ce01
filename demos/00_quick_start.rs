/// quick start - log in, move some money, print the dashboard
use bankist_rs::{Bank, BankConfig, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut bank = Bank::with_demo_accounts(BankConfig::standard())?;

    // log in as john
    bank.login("john", 1111, &time)?;

    // send jessica some money
    bank.transfer("jessica", Money::from_major(250), &time)?;

    // print current dashboard
    println!("{}", bank.dashboard(&time)?.to_json()?);

    bank.logout(&time)?;
    Ok(())
}
