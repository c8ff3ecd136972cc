use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::catalog;
use crate::models::NewAppointment;

/// Stored display format of an appointment's date and time.
pub const DATE_TIME_FORMAT: &str = "%b %d, %Y %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ServiceSelection,
    DateTimeSelection,
    Confirmation,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::ServiceSelection => 1,
            WizardStep::DateTimeSelection => 2,
            WizardStep::Confirmation => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            WizardStep::ServiceSelection => "service selection",
            WizardStep::DateTimeSelection => "date and time selection",
            WizardStep::Confirmation => "confirmation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    NoDraft,
    NoServiceSelected,
    DateTimeIncomplete,
    UnknownService(String),
    InvalidDate(String),
    InvalidTime(String),
    WrongStep { current: WizardStep, required: WizardStep },
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::NoDraft => f.write_str("No appointment in progress"),
            WizardError::NoServiceSelected => f.write_str("Select at least one service"),
            WizardError::DateTimeIncomplete => f.write_str("Select both a date and a time"),
            WizardError::UnknownService(name) => write!(f, "Unknown service: {name}"),
            WizardError::InvalidDate(value) => {
                write!(f, "Invalid date '{value}', expected YYYY-MM-DD")
            }
            WizardError::InvalidTime(value) => write!(f, "Invalid time '{value}', expected HH:MM"),
            WizardError::WrongStep { current, required } => write!(
                f,
                "Only available at the {} step, currently at {}",
                required.label(),
                current.label()
            ),
        }
    }
}

/// In-progress appointment: a linear three-step flow with back transitions
/// to the previous step only. Values survive stepping back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    services: Vec<String>,
    specifications: String,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::ServiceSelection,
            services: Vec::new(),
            specifications: String::new(),
            date: None,
            time: None,
        }
    }

    /// A wizard seeded from the catalog. Still starts at service selection.
    pub fn prefilled(
        services: Vec<String>,
        specifications: impl Into<String>,
    ) -> Result<Self, WizardError> {
        let mut wizard = Self::new();
        wizard.select_services(services)?;
        wizard.specifications = specifications.into();
        Ok(wizard)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn specifications(&self) -> &str {
        &self.specifications
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Replaces the selection. Keeps first-seen order and drops repeats.
    pub fn select_services(&mut self, services: Vec<String>) -> Result<(), WizardError> {
        self.require(WizardStep::ServiceSelection)?;
        let mut selected: Vec<String> = Vec::with_capacity(services.len());
        for service in services {
            let service = service.trim();
            if service.is_empty() {
                continue;
            }
            let known = catalog::find_service(service)
                .ok_or_else(|| WizardError::UnknownService(service.to_string()))?;
            if !selected.iter().any(|s| s == known.name) {
                selected.push(known.name.to_string());
            }
        }
        self.services = selected;
        Ok(())
    }

    pub fn set_specifications(
        &mut self,
        specifications: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require(WizardStep::ServiceSelection)?;
        self.specifications = specifications.into();
        Ok(())
    }

    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.require(WizardStep::DateTimeSelection)?;
        self.date = Some(date);
        Ok(())
    }

    pub fn set_time(&mut self, time: NaiveTime) -> Result<(), WizardError> {
        self.require(WizardStep::DateTimeSelection)?;
        self.time = Some(time);
        Ok(())
    }

    /// Whether `next()` would succeed from the current step.
    pub fn can_advance(&self) -> bool {
        self.advance_gate().is_ok()
    }

    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.step = self.advance_gate()?;
        Ok(self.step)
    }

    /// Moves to the previous step. `None` means the user left the flow.
    pub fn back(&mut self) -> Option<WizardStep> {
        let previous = match self.step {
            WizardStep::ServiceSelection => return None,
            WizardStep::DateTimeSelection => WizardStep::ServiceSelection,
            WizardStep::Confirmation => WizardStep::DateTimeSelection,
        };
        self.step = previous;
        Some(previous)
    }

    /// The stored date-time text, once both parts are chosen.
    pub fn date_time(&self) -> Option<String> {
        let (date, time) = (self.date?, self.time?);
        Some(date.and_time(time).format(DATE_TIME_FORMAT).to_string())
    }

    pub fn service_type(&self) -> String {
        self.services.join(", ")
    }

    /// Builds the row to insert. Only valid at the confirmation step.
    pub fn confirm(&self, user_id: i64, user_name: &str) -> Result<NewAppointment, WizardError> {
        self.require(WizardStep::Confirmation)?;
        let date_time = self.date_time().ok_or(WizardError::DateTimeIncomplete)?;
        if self.services.is_empty() {
            return Err(WizardError::NoServiceSelected);
        }
        Ok(NewAppointment {
            user_id,
            user_name: user_name.to_string(),
            service_type: self.service_type(),
            specifications: self.specifications.clone(),
            date_time,
        })
    }

    fn advance_gate(&self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::ServiceSelection if self.services.is_empty() => {
                Err(WizardError::NoServiceSelected)
            }
            WizardStep::ServiceSelection => Ok(WizardStep::DateTimeSelection),
            WizardStep::DateTimeSelection if self.date_time().is_none() => {
                Err(WizardError::DateTimeIncomplete)
            }
            WizardStep::DateTimeSelection => Ok(WizardStep::Confirmation),
            WizardStep::Confirmation => Err(WizardError::WrongStep {
                current: WizardStep::Confirmation,
                required: WizardStep::DateTimeSelection,
            }),
        }
    }

    fn require(&self, required: WizardStep) -> Result<(), WizardError> {
        if self.step == required {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                current: self.step,
                required,
            })
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, WizardError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| WizardError::InvalidDate(value.to_string()))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, WizardError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| WizardError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn at_confirmation() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.select_services(services(&["Haircut", "Beard Trim"])).unwrap();
        wizard.set_specifications("short fade").unwrap();
        wizard.next().unwrap();
        wizard.set_date(parse_date("2025-01-05").unwrap()).unwrap();
        wizard.set_time(parse_time("14:30").unwrap()).unwrap();
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn next_needs_a_service() {
        let mut wizard = Wizard::new();
        assert!(!wizard.can_advance());
        assert_eq!(wizard.next(), Err(WizardError::NoServiceSelected));
        assert_eq!(wizard.step(), WizardStep::ServiceSelection);

        wizard.select_services(services(&["Hair Dye"])).unwrap();
        assert!(wizard.can_advance());
        assert_eq!(wizard.next(), Ok(WizardStep::DateTimeSelection));
    }

    #[test]
    fn next_needs_date_and_time() {
        let mut wizard = Wizard::prefilled(services(&["Haircut"]), "CR7").unwrap();
        wizard.next().unwrap();

        wizard.set_date(parse_date("2025-03-01").unwrap()).unwrap();
        assert_eq!(wizard.next(), Err(WizardError::DateTimeIncomplete));

        wizard.set_time(parse_time("09:05").unwrap()).unwrap();
        assert_eq!(wizard.date_time().as_deref(), Some("Mar 01, 2025 09:05"));
        assert_eq!(wizard.next(), Ok(WizardStep::Confirmation));
    }

    #[test]
    fn confirm_joins_services() {
        let appointment = at_confirmation().confirm(3, "Luis").unwrap();
        assert_eq!(appointment.user_id, 3);
        assert_eq!(appointment.user_name, "Luis");
        assert_eq!(appointment.service_type, "Haircut, Beard Trim");
        assert_eq!(appointment.specifications, "short fade");
        assert_eq!(appointment.date_time, "Jan 05, 2025 14:30");
    }

    #[test]
    fn confirm_only_at_last_step() {
        let mut wizard = at_confirmation();
        wizard.back();
        assert!(matches!(
            wizard.confirm(1, "x"),
            Err(WizardError::WrongStep { .. })
        ));
    }

    #[test]
    fn no_next_from_confirmation() {
        let mut wizard = at_confirmation();
        assert!(!wizard.can_advance());
        assert!(wizard.next().is_err());
        assert_eq!(wizard.step(), WizardStep::Confirmation);
    }

    #[test]
    fn back_walks_one_step_and_keeps_values() {
        let mut wizard = at_confirmation();
        assert_eq!(wizard.back(), Some(WizardStep::DateTimeSelection));
        assert_eq!(wizard.back(), Some(WizardStep::ServiceSelection));
        assert_eq!(wizard.services(), ["Haircut", "Beard Trim"]);
        assert!(wizard.date_time().is_some());
        assert_eq!(wizard.back(), None);
    }

    #[test]
    fn fields_are_locked_to_their_step() {
        let mut wizard = Wizard::new();
        assert!(wizard.set_date(parse_date("2025-01-05").unwrap()).is_err());

        let mut wizard = at_confirmation();
        assert!(wizard.select_services(services(&["Haircut"])).is_err());
        assert!(wizard.set_specifications("long").is_err());
    }

    #[test]
    fn selection_is_validated_and_deduplicated() {
        let mut wizard = Wizard::new();
        assert_eq!(
            wizard.select_services(services(&["Haircut", "Massage"])),
            Err(WizardError::UnknownService("Massage".to_string()))
        );
        wizard
            .select_services(services(&["Haircut", " ", "Haircut", "Hair Dye"]))
            .unwrap();
        assert_eq!(wizard.service_type(), "Haircut, Hair Dye");
    }

    #[test]
    fn rejects_malformed_date_and_time() {
        assert!(matches!(parse_date("05/01/2025"), Err(WizardError::InvalidDate(_))));
        assert!(matches!(parse_time("25:00"), Err(WizardError::InvalidTime(_))));
    }
}
