//! Milk record entity model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use farmhub_core::error::AppError;
use farmhub_core::result::AppResult;
use farmhub_core::traits::Resource;
use farmhub_core::types::{CowId, MilkRecordId, ResourceKind};

/// Largest quantity a `NUMERIC(6, 2)` column can hold.
const MAX_LITERS: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Daily milk yield of one cow. At most one record per cow and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MilkRecord {
    /// Unique record identifier.
    pub id: MilkRecordId,
    /// The cow milked.
    pub cow_id: CowId,
    /// Day of the yield.
    pub date: NaiveDate,
    /// Quantity in litres, two decimal places.
    pub liters: Decimal,
}

impl Resource for MilkRecord {
    type Id = MilkRecordId;
    type New = NewMilkRecord;
    type Changes = MilkRecordChanges;
    type Filter = MilkRecordFilter;

    const KIND: ResourceKind = ResourceKind::MilkRecord;

    fn by_id(id: MilkRecordId) -> MilkRecordFilter {
        MilkRecordFilter {
            id: Some(id),
            ..Default::default()
        }
    }
}

/// Data required to record a yield.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewMilkRecord {
    /// The cow milked.
    #[serde(alias = "cow")]
    pub cow_id: CowId,
    /// Day of the yield.
    pub date: NaiveDate,
    /// Quantity in litres.
    pub liters: Decimal,
}

/// Partial update for a milk record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilkRecordChanges {
    /// Move to another cow.
    #[serde(default, alias = "cow")]
    pub cow_id: Option<CowId>,
    /// New day.
    pub date: Option<NaiveDate>,
    /// New quantity.
    pub liters: Option<Decimal>,
}

/// Attribute filter for milk record listings. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilkRecordFilter {
    /// Exact id.
    #[serde(skip)]
    pub id: Option<MilkRecordId>,
    /// Only records of this cow.
    #[serde(alias = "cow")]
    pub cow_id: Option<CowId>,
    /// Earliest date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub date_to: Option<NaiveDate>,
}

impl MilkRecordFilter {
    /// Whether a record satisfies the filter.
    pub fn matches(&self, record: &MilkRecord) -> bool {
        self.id.is_none_or(|id| record.id == id)
            && self.cow_id.is_none_or(|c| record.cow_id == c)
            && self.date_from.is_none_or(|from| record.date >= from)
            && self.date_to.is_none_or(|to| record.date <= to)
    }
}

/// Check a quantity fits `NUMERIC(6, 2)` and is not negative, and return it
/// at exactly two decimal places.
pub fn normalize_liters(liters: Decimal) -> AppResult<Decimal> {
    if liters.is_sign_negative() && !liters.is_zero() {
        return Err(AppError::validation("liters: must not be negative"));
    }
    if liters.normalize().scale() > 2 {
        return Err(AppError::validation(
            "liters: ensure that there are no more than 2 decimal places",
        ));
    }
    if liters > MAX_LITERS {
        return Err(AppError::validation(
            "liters: ensure that there are no more than 6 digits in total",
        ));
    }
    let mut liters = if liters.is_zero() { Decimal::ZERO } else { liters };
    liters.rescale(2);
    Ok(liters)
}
