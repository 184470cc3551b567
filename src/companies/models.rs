use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::common::helpers::deserialize_nullable;

/// Legal form of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CompanyType {
    /// Sole proprietorship
    Sole,
    /// Small and medium-sized enterprise
    Sme,
    /// Corporation
    Corp,
    /// Civil society organization
    Cso,
}

impl CompanyType {
    pub const ALL: [CompanyType; 4] = [
        CompanyType::Sole,
        CompanyType::Sme,
        CompanyType::Corp,
        CompanyType::Cso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Sole => "sole",
            CompanyType::Sme => "sme",
            CompanyType::Corp => "corp",
            CompanyType::Cso => "cso",
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompanyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Company as stored and as returned over the wire; followers are never included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub company_type: CompanyType,
    pub country: String,
    pub url: String,
    pub employee_count: i64,
}

/// Body of POST, PUT and PATCH on companies
///
/// Every field is optional at the wire level so missing fields are reported
/// by the validator with a per-field message instead of a parse failure.
/// The outer `Option` is presence, the inner one is an explicit `null`.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyPayload {
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub image: Option<Option<String>>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_nullable")]
    pub company_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub employee_count: Option<Option<i64>>,
}

/// Fully validated input for a new company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub image: Option<String>,
    pub company_type: CompanyType,
    pub country: String,
    pub url: String,
    pub employee_count: i64,
}

/// Validated subset of fields to change; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub image: Option<Option<String>>,
    pub company_type: Option<CompanyType>,
    pub country: Option<String>,
    pub url: Option<String>,
    pub employee_count: Option<i64>,
}

impl CompanyChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.company_type.is_none()
            && self.country.is_none()
            && self.url.is_none()
            && self.employee_count.is_none()
    }
}

/// Raw list filter query; values are validated before use
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CompanyFilterParams {
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub country: Option<String>,
    pub min_employee: Option<String>,
    pub max_employee: Option<String>,
}

/// Validated list filter
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompanyFilter {
    pub company_type: Option<CompanyType>,
    pub country: Option<String>,
    pub min_employee: Option<f64>,
    pub max_employee: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FollowStatus {
    pub follow: bool,
}
