//! Configuration access port trait.
//!
//! Absence is meaningful to the traveler's lazy validation, so accessors
//! return `Option` instead of defaults.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Option<i64>;
}
