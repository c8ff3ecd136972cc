mod store;
mod wizard;

pub use store::WizardStore;
pub use wizard::{parse_date, parse_time, Wizard, WizardError, WizardStep, DATE_TIME_FORMAT};

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Client-facing snapshot of a draft.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub services: Vec<String>,
    pub specifications: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub date_time: Option<String>,
    pub can_advance: bool,
}

impl From<&Wizard> for WizardView {
    fn from(wizard: &Wizard) -> Self {
        WizardView {
            step: wizard.step(),
            step_number: wizard.step().number(),
            services: wizard.services().to_vec(),
            specifications: wizard.specifications().to_string(),
            date: wizard.date(),
            time: wizard.time(),
            date_time: wizard.date_time(),
            can_advance: wizard.can_advance(),
        }
    }
}
