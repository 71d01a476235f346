//! preview - compare both amortization methods for the same loan
use loan_schedule_rs::chrono::{TimeZone, Utc};
use loan_schedule_rs::{
    EngineConfig, InMemoryClientRepository, InMemoryLoanRepository, LoanRequest, LoanService,
    SafeTimeProvider, ScheduleSummary, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let service = LoanService::new(
        InMemoryLoanRepository::new(),
        InMemoryClientRepository::new(),
        EngineConfig::default(),
        time,
    );

    let form = r#"{
        "amount": "12000.00",
        "date": "2024-01-01",
        "interestRate": "0.03",
        "amortizationType": "CONSTANT_INSTALLMENT",
        "frequency": "MONTHLY",
        "numberOfInstallments": 12
    }"#;
    let mut request: LoanRequest = serde_json::from_str(form)?;

    for method in ["CONSTANT_INSTALLMENT", "CONSTANT_PRINCIPAL"] {
        request.amortization_method = method.to_string();
        let schedule = service.preview_schedule(&request)?;

        println!("=== {} ===", method);
        println!("{:>3}  {:<10}  {:>10}  {:>10}  {:>10}", "#", "due", "principal", "interest", "total");
        for i in &schedule {
            println!(
                "{:>3}  {:<10}  {:>10}  {:>10}  {:>10}",
                i.number, i.due_date, i.principal, i.interest, i.total
            );
        }

        let summary = ScheduleSummary::from_installments(request.amount.unwrap_or_default(), &schedule);
        println!(
            "total interest {}, total payable {}, closing balance {}\n",
            summary.total_interest, summary.total_payable, summary.closing_balance
        );
    }

    // an unknown frequency is reported, not guessed
    request.frequency = "QUARTERLY".to_string();
    match service.preview_schedule(&request) {
        Ok(_) => println!("unexpected schedule"),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
