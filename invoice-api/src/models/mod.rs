//! Document schemas for the invoice and contact collections.

mod address;
mod contact;
mod invoice;
mod record;
mod timestamp;

pub use address::{Address, Party};
pub use contact::Contact;
pub use invoice::{Invoice, Timesheet, WorkHourEntry};
pub use record::Record;
