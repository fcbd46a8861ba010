//! Proximity module
//!
//! Circle-overlap sensors and arena walls feeding contact events to agents.

mod sensors;

pub use sensors::{Arena, Contact, ContactList, ContactPhase, ContactTag, Sensors};
