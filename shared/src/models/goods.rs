//! Goods Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Owner of a goods record
///
/// `quantity` is reserved for per-owner holdings. It is carried through
/// unchanged and never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Company identifier
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl Owner {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            quantity: None,
        }
    }
}

/// Goods entity, stored as JSON under `goods:<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    /// `<issuer><month code><day code>`, assigned once at issue
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub postage: Decimal,
    #[serde(default)]
    pub owners: Vec<Owner>,
    /// Issuing company, immutable
    pub issuer: String,
    /// Free-form lifecycle tag (e.g. "new", "settled")
    pub state: String,
}

impl Goods {
    pub fn is_owned_by(&self, company: &str) -> bool {
        self.owners.iter().any(|o| o.company == company)
    }
}

/// Issue payload
///
/// ```json
/// {
///   "name": "Bond",
///   "price": 100.5,
///   "postage": 7.5,
///   "owners": [{ "company": "company1", "quantity": 5 }],
///   "issuer": "acme",
///   "state": "new"
/// }
/// ```
///
/// `owners` may be omitted. Any `id` in the payload is ignored; the ledger
/// derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsInput {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub postage: Decimal,
    #[serde(default)]
    pub owners: Vec<Owner>,
    pub issuer: String,
    pub state: String,
}

impl GoodsInput {
    /// Build the stored record, appending the issuer as an owner
    pub fn into_goods(self, id: impl Into<String>) -> Goods {
        let mut owners = self.owners;
        owners.push(Owner::new(self.issuer.clone()));

        Goods {
            id: id.into(),
            name: self.name,
            price: self.price,
            postage: self.postage,
            owners,
            issuer: self.issuer,
            state: self.state,
        }
    }
}
