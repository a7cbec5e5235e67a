//! Domain models for Kirai freight-commission records.
//!
//! - [`KiraiRecord`] - One freight transaction (the aggregate)
//! - [`RiceMill`], [`DhalariDetails`] - Party snapshots embedded in a record
//! - [`LorryDetails`], [`LoadingDetails`], [`WeightageDetails`],
//!   [`KiraiDetails`], [`Mediator`], [`TransportOffice`] - Nested groups
//! - [`LoginResponse`], [`User`], [`Tokens`] - Auth service payloads
//!
//! Every group and every leaf is optional. Keys the model does not know are
//! kept in `extra` so store bookkeeping survives a read and stays visible to
//! the view projection.

pub mod lenient;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{FormError, FormResult};

/// Unknown keys carried alongside a record or group.
pub type Extra = BTreeMap<String, Value>;

// =============================================================================
// Aggregate
// =============================================================================

/// A single Kirai (freight) transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KiraiRecord {
    /// KL number, the human-assigned unique identifier.
    #[serde(default, deserialize_with = "lenient::required_text")]
    pub klno: String,

    #[serde(default, deserialize_with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub loading_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::date", skip_serializing_if = "Option::is_none")]
    pub reached_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rice_mill: Option<RiceMill>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhalari_details: Option<DhalariDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lorry_details: Option<LorryDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_details: Option<LoadingDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weightage_details: Option<WeightageDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kirai_details: Option<KiraiDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mediator: Option<Mediator>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_offices: Option<TransportOffice>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl KiraiRecord {
    /// Create an otherwise empty record with the given KL number.
    pub fn new(klno: impl Into<String>) -> Self {
        Self {
            klno: klno.into(),
            ..Default::default()
        }
    }

    /// The only rule checked before submission: `klno` must be non-empty.
    pub fn validate(&self) -> FormResult<()> {
        if self.klno.trim().is_empty() {
            return Err(FormError::MissingKlNo);
        }
        Ok(())
    }

    /// Name of the embedded rice mill, if any.
    pub fn rice_mill_name(&self) -> Option<&str> {
        self.rice_mill.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Name of the embedded dhalari, if any.
    pub fn dhalari_name(&self) -> Option<&str> {
        self.dhalari_details.as_ref().and_then(|d| d.name.as_deref())
    }

    /// The record as a JSON object, with absent leaves omitted.
    ///
    /// This is the shape the projections walk: a key is present exactly when
    /// the record holds a value for it.
    pub fn to_json_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

// =============================================================================
// Party snapshots
// =============================================================================

/// Rice mill snapshot embedded in a record (also a lookup entry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiceMill {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gst: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl RiceMill {
    /// Name for pick lists.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Mill")
    }
}

/// Dhalari (broker) snapshot embedded in a record (also a lookup entry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhalariDetails {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub rythu_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl DhalariDetails {
    /// Name for pick lists.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed")
    }
}

// =============================================================================
// Nested groups
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorryDetails {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub driver_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub owner_location: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub lorry_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub driver_number: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Bags, rates and commission for the pickup.
///
/// `total_rate` is informational; the client never recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingDetails {
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub per_bag: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub delivery_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub rice_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub bag_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub wayment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub loading_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub total_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Weighment slip. `empty <= total` is expected but not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightageDetails {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub empty: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub item_weight: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Freight charges. `balance` stays text so annotated values survive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KiraiDetails {
    #[serde(rename = "type", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub per_ton: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub advance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal", skip_serializing_if = "Option::is_none")]
    pub driver_allowances: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mediator {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOffice {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

// =============================================================================
// Auth payloads
// =============================================================================

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub tokens: Tokens,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokens {
    pub access: Token,
    #[serde(default)]
    pub refresh: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    #[serde(default)]
    pub expires: Option<String>,
}

/// Profile of the logged-in staff member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub email: String,
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
    pub role: String,
    pub gender: String,
    pub dob: String,
    pub phone: String,
    pub username: String,
    pub user_type: String,
    pub deleted: bool,
    pub active: bool,
    pub email_verified: bool,
}

impl User {
    /// First name for greetings, "User" when the profile has none.
    pub fn greeting_name(&self) -> &str {
        if self.firstname.trim().is_empty() {
            "User"
        } else {
            &self.firstname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_record_deserializes() {
        let record: KiraiRecord = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "klno": "KL-1001",
            "loadingDate": "2024-03-01T00:00:00.000Z",
            "riceMill": { "_id": "m1", "name": "Sri Rama Mills", "phone": 9440012345u64 },
            "loadingDetails": { "bagCount": "120", "perBag": 25, "riceType": "Sona" },
            "kiraiDetails": { "balance": "4000 (cash)", "perTon": "950" },
            "__v": 0
        }))
        .unwrap();

        assert_eq!(record.klno, "KL-1001");
        assert_eq!(record.loading_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.rice_mill_name(), Some("Sri Rama Mills"));
        let mill = record.rice_mill.as_ref().unwrap();
        assert_eq!(mill.phone.as_deref(), Some("9440012345"));
        assert_eq!(mill.extra.get("_id"), Some(&json!("m1")));
        let loading = record.loading_details.as_ref().unwrap();
        assert_eq!(loading.bag_count, Some(120.0));
        assert_eq!(loading.per_bag, Some(25.0));
        let kirai = record.kirai_details.as_ref().unwrap();
        assert_eq!(kirai.balance.as_deref(), Some("4000 (cash)"));
        assert_eq!(kirai.per_ton, Some(950.0));
        assert_eq!(record.extra.get("_id"), Some(&json!("65f0c0ffee")));
    }

    #[test]
    fn test_numeric_text_leaves_do_not_fail_a_page() {
        let page: Vec<KiraiRecord> = serde_json::from_value(json!([
            { "klno": "A1" },
            {
                "klno": 1001,
                "riceMill": { "name": 7, "contactPerson": 42 },
                "dhalariDetails": { "name": 3, "rythuName": 9 },
                "lorryDetails": { "driverName": 12345, "ownerName": { "first": "x" } },
                "loadingDetails": { "riceType": 1, "deliveryType": true },
                "weightageDetails": { "type": 2 },
                "mediator": { "name": 5 },
                "transportOffices": { "name": 6 }
            }
        ]))
        .unwrap();

        assert_eq!(page.len(), 2);
        let odd = &page[1];
        assert_eq!(odd.klno, "1001");
        assert_eq!(odd.rice_mill_name(), Some("7"));
        let lorry = odd.lorry_details.as_ref().unwrap();
        assert_eq!(lorry.driver_name.as_deref(), Some("12345"));
        assert_eq!(lorry.owner_name, None);
        let loading = odd.loading_details.as_ref().unwrap();
        assert_eq!(loading.rice_type.as_deref(), Some("1"));
        assert_eq!(loading.delivery_type.as_deref(), Some("true"));
        assert_eq!(odd.weightage_details.as_ref().unwrap().kind.as_deref(), Some("2"));
        assert_eq!(odd.mediator.as_ref().unwrap().name.as_deref(), Some("5"));
    }

    #[test]
    fn test_serialization_omits_absent_leaves() {
        let mut record = KiraiRecord::new("KL-7");
        record.loading_details = Some(LoadingDetails {
            bag_count: Some(0.0),
            ..Default::default()
        });
        record.loading_date = NaiveDate::from_ymd_opt(2024, 1, 5);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["klno"], "KL-7");
        assert_eq!(value["loadingDate"], "2024-01-05");
        assert_eq!(value["loadingDetails"]["bagCount"], json!(0.0));
        assert!(value["loadingDetails"].get("perBag").is_none());
        assert!(value.get("riceMill").is_none());
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_type_fields_use_wire_name() {
        let record: KiraiRecord = serde_json::from_value(json!({
            "klno": "A",
            "weightageDetails": { "type": "Lorry Scale" },
            "kiraiDetails": { "type": "Per Ton" }
        }))
        .unwrap();
        assert_eq!(record.weightage_details.unwrap().kind.as_deref(), Some("Lorry Scale"));
        assert_eq!(record.kirai_details.unwrap().kind.as_deref(), Some("Per Ton"));
    }

    #[test]
    fn test_validate_requires_klno() {
        assert_eq!(KiraiRecord::default().validate(), Err(FormError::MissingKlNo));
        assert_eq!(KiraiRecord::new("   ").validate(), Err(FormError::MissingKlNo));
        assert!(KiraiRecord::new("KL-1001").validate().is_ok());
    }

    #[test]
    fn test_login_response_and_greeting() {
        let response: LoginResponse = serde_json::from_value(json!({
            "user": { "id": "u1", "email": "staff@agency.in", "firstname": "Ravi", "emailVerified": true },
            "tokens": {
                "access": { "token": "acc", "expires": "2024-03-01T10:00:00Z" },
                "refresh": { "token": "ref", "expires": "2024-03-31T10:00:00Z" }
            }
        }))
        .unwrap();
        assert_eq!(response.tokens.access.token, "acc");
        assert_eq!(response.user.greeting_name(), "Ravi");
        assert!(response.user.email_verified);
        assert_eq!(User::default().greeting_name(), "User");
    }

    #[test]
    fn test_lookup_display_names() {
        assert_eq!(RiceMill::default().display_name(), "Unnamed Mill");
        assert_eq!(DhalariDetails::default().display_name(), "Unnamed");
    }
}
