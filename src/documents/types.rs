// 3rd party crates
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A goods introduction document, in the registry's field naming.
///
/// Dates are written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub description: Option<Description>,
    #[serde(rename = "doc_id")]
    pub id: Option<String>,
    #[serde(rename = "doc_status")]
    pub status: Option<String>,
    #[serde(rename = "doc_type")]
    pub kind: Option<String>,
    #[serde(rename = "importRequest", default)]
    pub import_request: bool,
    pub owner_inn: Option<String>,
    pub participant_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub production_type: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
    pub reg_date: Option<NaiveDate>,
    pub reg_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "participantInn")]
    pub participant_inn: String,
}

/// A single product line of a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub certificate_document: Option<String>,
    pub certificate_document_date: Option<NaiveDate>,
    pub certificate_document_number: Option<String>,
    pub owner_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub tnved_code: Option<String>,
    pub uit_code: Option<String>,
    pub uitu_code: Option<String>,
}

/// Registry reply to a document submission.
///
/// Only `value` (the registered document id) is interpreted; everything else
/// is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// JSON codec backed by serde_json.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;
