/// serializing client state for the external store
use chrono::{NaiveDate, TimeZone, Utc};
use payment_plan_rs::{
    Client, ContractTerms, EventStore, FinancingCatalog, Money, PaymentRecord, PaymentStatus, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let mut client = Client::new(
        Uuid::new_v4(),
        15,
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        created,
    )?;
    let mut events = EventStore::new();
    client.apply_contract_terms(
        &ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(10),
            plan_key: 6,
        },
        &FinancingCatalog::default(),
        &mut events,
        created,
    );

    client.register_validated_payment(
        &PaymentRecord {
            payment_date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            amount_paid: Money::from_str_exact("192780.00")?,
            recorded_at: Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap(),
            status: PaymentStatus::Validated,
        },
        &mut events,
    )?;

    // the denormalized record as the persistence collaborator stores it
    println!("{}", serde_json::to_string_pretty(&client)?);

    // events drained after the operation
    for event in events.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
