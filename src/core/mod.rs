pub mod checker;
pub mod phone;
pub mod signal;
pub mod tags;

pub use crate::domain::model::{CheckOutcome, LookupResult, NormalizedPhone, OrderEvent};
pub use crate::domain::ports::{OrderTagger, ReportLookup};
pub use crate::utils::error::Result;
