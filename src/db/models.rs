use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::clock;

/// Transaction lifecycle. The only legal transition is
/// `Processing -> Processed`, enforced by the store's conditional update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Processing,
    Processed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Processing => write!(f, "PROCESSING"),
            TransactionStatus::Processed => write!(f, "PROCESSED"),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub source_account: String,
    pub destination_account: String,
    #[serde(with = "amount_serde")]
    pub amount: BigDecimal,
    pub currency: String,
    pub status: TransactionStatus,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub processed_at: Option<NaiveDateTime>,
}

impl Transaction {
    pub fn new(
        transaction_id: String,
        source_account: String,
        destination_account: String,
        amount: BigDecimal,
        currency: String,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            transaction_id,
            source_account,
            destination_account,
            amount: amount.with_scale(2),
            currency,
            status: TransactionStatus::Processing,
            created_at,
            processed_at: None,
        }
    }
}

/// Amounts go over the wire as JSON numbers, not decimal strings.
mod amount_serde {
    use bigdecimal::{BigDecimal, ToPrimitive};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(amount: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        let value = amount
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom("amount is not representable as f64"))?;
        serializer.serialize_f64(value)
    }
}

fn serialize_timestamp<S: serde::Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&clock::format_timestamp(*ts))
}

fn serialize_optional_timestamp<S: serde::Serializer>(
    ts: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_timestamp(ts, serializer),
        None => serializer.serialize_none(),
    }
}
