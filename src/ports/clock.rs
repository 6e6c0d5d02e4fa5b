//! Clock port - where the application layer reads "now".
//!
//! The detector takes `now` as an argument; handlers get it from here so
//! tests can pin time.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
