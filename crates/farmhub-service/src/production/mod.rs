//! Milk production services.

pub mod milk;

pub use milk::MilkRecordService;
