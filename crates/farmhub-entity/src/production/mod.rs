//! Milk production records.

pub mod milk;

pub use milk::{MilkRecord, MilkRecordChanges, MilkRecordFilter, NewMilkRecord, normalize_liters};
