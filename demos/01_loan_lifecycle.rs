//! lifecycle - create a weekly loan and watch installment statuses move
use loan_schedule_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_schedule_rs::{
    Client, ClientStatus, EngineConfig, InMemoryClientRepository, InMemoryLoanRepository,
    LoanRequest, LoanService, Money, Rate, SafeTimeProvider, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
    ));

    let client = Client {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "Mabote".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+258841234567".to_string(),
        address: "Maputo".to_string(),
        status: ClientStatus::Active,
        created_at: NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
    };
    let client_id = client.id;
    let mut clients = InMemoryClientRepository::new();
    clients.insert(client);

    let mut service = LoanService::new(InMemoryLoanRepository::new(), clients, EngineConfig::default(), time);

    let request = LoanRequest {
        amount: Some(Money::from_major(2_000)),
        origination_date: NaiveDate::from_ymd_opt(2024, 3, 4),
        interest_rate: Some(Rate::from_percentage(8)),
        amortization_method: "CONSTANT_PRINCIPAL".to_string(),
        frequency: "WEEKLY".to_string(),
        installment_count: Some(4),
        client_id: Some(client_id),
    };

    let created = service.create_loan(&request)?;
    println!("created loan {} for {}\n", created.id, created.client_name);

    for day in 0..4 {
        let view = service.loan_details(created.id)?;
        println!("day {}:", day * 5);
        for i in &view.installments {
            println!("  #{} due {} {:?} ({} days)", i.number, i.due_date, i.status, i.days_until_due);
        }
        service.time().test_control().unwrap().advance(Duration::days(5));
    }

    println!("{}", service.loan_details(created.id)?.to_json()?);

    println!("\nevents:");
    for event in service.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
