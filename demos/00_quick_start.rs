/// quick start - compute a financing breakdown and its pending schedule
use chrono::{NaiveDate, Utc};
use payment_plan_rs::{
    compute_financing, pending_installments, Client, ContractTerms, FinancingCatalog, Money, Uuid,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = FinancingCatalog::default();

    // 1,000,000 contract with IVA, 10% down, financed over 6 months
    let terms = ContractTerms {
        contract_value: Money::from_major(1_000_000),
        apply_iva: true,
        down_payment_percentage: dec!(10),
        plan_key: 6,
    };
    let breakdown = compute_financing(&terms, &catalog);
    println!("total with IVA:      {}", breakdown.total_with_iva);
    println!("down payment:        {}", breakdown.down_payment);
    println!("amount to finance:   {}", breakdown.amount_to_finance);
    println!("monthly installment: {}", breakdown.monthly_installment);

    // persist the breakdown onto a client and derive the schedule
    let next_due = NaiveDate::from_ymd_opt(2024, 3, 31).ok_or("bad date")?;
    let mut client = Client::new(Uuid::new_v4(), 31, next_due, Utc::now())?;
    let mut events = payment_plan_rs::EventStore::new();
    client.apply_contract_terms(&terms, &catalog, &mut events, Utc::now());

    let today = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("bad date")?;
    for installment in pending_installments(&client, &[], today) {
        println!(
            "{} | {} | {} | {:?}",
            installment.description, installment.due_date, installment.amount, installment.status
        );
    }

    Ok(())
}
