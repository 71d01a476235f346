pub mod client;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod lifecycle;
pub mod loan;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod types;
pub mod validation;
pub mod views;

// re-export key types
pub use client::Client;
pub use config::{EngineConfig, Rounding, RoundingPolicy};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use lifecycle::{next_status, refresh, Refreshed, StatusTransition};
pub use loan::{Installment, Loan};
pub use repository::{ClientRepository, InMemoryClientRepository, InMemoryLoanRepository, LoanRepository};
pub use schedule::{due_date, normalize, ScheduleGenerator, ScheduleSummary};
pub use service::LoanService;
pub use types::{AmortizationMethod, ClientId, ClientStatus, Frequency, InstallmentStatus, LoanId};
pub use validation::{validate, LoanParameters, LoanRequest};
pub use views::{InstallmentView, LoanView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
