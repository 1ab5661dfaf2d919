/// the three schedule shapes: financed, single payment, open-ended recurring
use chrono::{NaiveDate, TimeZone, Utc};
use payment_plan_rs::{
    payment_timeline, pending_installments, Client, ContractTerms, EventStore, FinancingCatalog,
    Money, PaymentRecord, PaymentStatus, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = FinancingCatalog::default();
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

    // financed client, two installments already validated
    let mut financed = Client::new(
        Uuid::new_v4(),
        15,
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
        created,
    )?;
    let mut events = EventStore::new();
    financed.apply_contract_terms(
        &ContractTerms {
            contract_value: Money::from_major(1_000_000),
            apply_iva: true,
            down_payment_percentage: dec!(10),
            plan_key: 6,
        },
        &catalog,
        &mut events,
        created,
    );
    financed.payments_made_count = 2;

    let history: Vec<PaymentRecord> = [(2, 14), (3, 16)]
        .into_iter()
        .map(|(m, d)| PaymentRecord {
            payment_date: NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
            amount_paid: Money::from_str_exact("192780.00").unwrap(),
            recorded_at: Utc.with_ymd_and_hms(2024, m, d, 12, 0, 0).unwrap(),
            status: PaymentStatus::Validated,
        })
        .collect();

    println!("-- pending (financed, 2 of 6 paid) --");
    for i in pending_installments(&financed, &history, today) {
        println!("{} | due {} | {:?}", i.description, i.due_date, i.status);
    }

    println!("-- full timeline --");
    for e in payment_timeline(&financed, &history, today) {
        println!(
            "#{} due {} {:?} balance {}",
            e.number, e.due_date, e.status, e.remaining_balance
        );
    }

    // open-ended recurring client: zero contract, amount entered directly
    let mut recurring = Client::new(
        Uuid::new_v4(),
        5,
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        created,
    )?;
    recurring.set_recurring_amount(Money::from_major(50_000), &mut events, created);
    recurring.payments_made_count = 3;

    println!("-- pending (recurring) --");
    for i in pending_installments(&recurring, &[], today) {
        println!("{} #{} | due {} | {}", i.description, i.number, i.due_date, i.amount);
    }

    Ok(())
}
