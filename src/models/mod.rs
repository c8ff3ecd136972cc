mod appointment;
mod user;

pub use appointment::{Appointment, NewAppointment};
pub use user::User;
