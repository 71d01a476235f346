use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::lifecycle;
use crate::loan::{Installment, Loan};
use crate::repository::{ClientRepository, LoanRepository};
use crate::schedule::ScheduleGenerator;
use crate::types::{ClientId, LoanId};
use crate::validation::{LoanParameters, LoanRequest};
use crate::views::LoanView;

/// loan creation and detail reads on top of the schedule engine
pub struct LoanService<L, C> {
    loans: L,
    clients: C,
    generator: ScheduleGenerator,
    time: SafeTimeProvider,
    events: EventStore,
}

impl<L: LoanRepository, C: ClientRepository> LoanService<L, C> {
    pub fn new(loans: L, clients: C, config: EngineConfig, time: SafeTimeProvider) -> Self {
        Self {
            loans,
            clients,
            generator: ScheduleGenerator::new(config.rounding),
            time,
            events: EventStore::new(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.time.now().date_naive()
    }

    /// validate and generate a schedule without storing anything
    pub fn preview_schedule(&self, request: &LoanRequest) -> Result<Vec<Installment>> {
        let params = LoanParameters::from_request(request, self.today())?;
        let schedule = self.generator.generate(&params)?;
        debug!(
            method = %params.method,
            frequency = %params.frequency,
            installments = schedule.len(),
            "previewed schedule"
        );
        Ok(schedule)
    }

    /// create a loan with its full schedule and store it
    pub fn create_loan(&mut self, request: &LoanRequest) -> Result<LoanView> {
        let today = self.today();
        let params = LoanParameters::from_request(request, today)?;

        let client_id = params.client_id.ok_or(LoanError::MissingClientReference)?;
        let client_name = self.client_name(client_id)?;

        let installments = self.generator.generate(&params)?;
        let loan = Loan::new(Uuid::new_v4(), client_id, &params, installments)?;
        self.loans.save(&loan)?;

        info!(
            loan_id = %loan.id,
            client_id = %client_id,
            principal = %loan.principal,
            method = %loan.method,
            installments = loan.installment_count(),
            "loan created"
        );
        self.events.emit(Event::LoanCreated {
            loan_id: loan.id,
            client_id,
            principal: loan.principal,
            method: loan.method,
            installment_count: params.installment_count,
            timestamp: self.time.now(),
        });

        Ok(LoanView::from_loan(&loan, client_name, today))
    }

    /// load a loan, bring installment statuses up to today, and return it
    ///
    /// the loan is written back only when a status changed.
    pub fn loan_details(&mut self, id: LoanId) -> Result<LoanView> {
        let today = self.today();
        let loan = self
            .loans
            .find_by_id(id)?
            .ok_or(LoanError::LoanNotFound { id })?;

        let refreshed = lifecycle::refresh(loan, today);
        for transition in &refreshed.transitions {
            info!(
                loan_id = %id,
                installment = transition.installment_number,
                from = ?transition.from,
                to = ?transition.to,
                "installment status updated"
            );
        }

        if refreshed.changed() {
            self.loans.save(&refreshed.loan)?;
            let timestamp = self.time.now();
            for transition in &refreshed.transitions {
                let due_date = refreshed
                    .loan
                    .installment(transition.installment_number)
                    .map(|i| i.due_date)
                    .unwrap_or(today);
                self.events.emit(Event::InstallmentStatusChanged {
                    loan_id: id,
                    installment_number: transition.installment_number,
                    due_date,
                    old_status: transition.from,
                    new_status: transition.to,
                    timestamp,
                });
            }
        }

        let client_name = self.client_name(refreshed.loan.client_id)?;
        debug!(
            loan_id = %id,
            installments = refreshed.loan.installment_count(),
            saved = refreshed.changed(),
            "fetched loan details"
        );

        Ok(LoanView::from_loan(&refreshed.loan, client_name, today))
    }

    fn client_name(&self, id: ClientId) -> Result<String> {
        match self.clients.find_by_id(id)? {
            Some(client) => Ok(client.display_name()),
            None => {
                warn!(client_id = %id, "client not found");
                Err(LoanError::ClientNotFound { id })
            }
        }
    }

    /// clock the service reads "today" from
    pub fn time(&self) -> &SafeTimeProvider {
        &self.time
    }

    pub fn loans(&self) -> &L {
        &self.loans
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
