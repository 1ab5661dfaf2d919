/// evaluating the same client at different test clocks
use chrono::{NaiveDate, TimeZone, Utc};
use payment_plan_rs::{
    Client, ContractTerms, EventStore, FinancingCatalog, Money, SafeTimeProvider, ScheduleEngine,
    TimeSource, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let mut client = Client::new(
        Uuid::new_v4(),
        31,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        created,
    )?;
    let mut events = EventStore::new();
    client.apply_contract_terms(
        &ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(10),
            plan_key: 3,
        },
        &FinancingCatalog::default(),
        &mut events,
        created,
    );

    for (label, y, m, d) in [
        ("before first due date", 2024, 1, 15),
        ("on the due date", 2024, 1, 31),
        ("one day late", 2024, 2, 1),
        ("three months late", 2024, 4, 30),
    ] {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
        ));
        let engine = ScheduleEngine::new(&time);
        println!("-- {label} --");
        for i in engine.pending(&client, &[]) {
            println!("{} | due {} | {:?}", i.description, i.due_date, i.status);
        }
    }

    Ok(())
}
