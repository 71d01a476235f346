pub mod amortization;
pub mod dates;
pub mod rate;

pub use amortization::{ScheduleGenerator, ScheduleSummary};
pub use dates::due_date;
pub use rate::normalize;
