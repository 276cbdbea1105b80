//! Input validation for create operations
//!
//! Each input type declares its accepted fields up front. Request bodies are
//! checked against that table before they are deserialized, so every problem
//! in a body is reported at once instead of only the first serde failure.
//! Fields that are not declared (ids, statuses, counters, timestamps the
//! server assigns) are ignored.

use agro_types::{
    NewBarterOffer, NewLiquidityPool, NewMarketplaceItem, NewMicrojob, NewProposal, NewUser,
    RiskLevel, UserType,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Any JSON number
    Number,
    /// A JSON number without a fractional part
    Integer,
    Boolean,
    /// RFC 3339 string
    Timestamp,
    /// String restricted to the listed values
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    InvalidEnumValue,
    InvalidTimestamp,
}

/// One problem found in a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub path: Vec<String>,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    fn at(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            code,
            message: message.into(),
        }
    }
}

/// An input type with a statically declared field table
pub trait Validate: DeserializeOwned {
    const FIELDS: &'static [Field];
}

/// Check a body against a field table, collecting every issue.
pub fn check(body: &Value, fields: &[Field]) -> Vec<Issue> {
    let Some(object) = body.as_object() else {
        return vec![Issue {
            path: Vec::new(),
            code: IssueCode::InvalidType,
            message: format!("Expected object, received {}", type_name(body)),
        }];
    };

    fields
        .iter()
        .filter_map(|field| check_field(object, field))
        .collect()
}

fn check_field(object: &Map<String, Value>, field: &Field) -> Option<Issue> {
    let value = match object.get(field.name) {
        None | Some(Value::Null) if field.required => {
            return Some(Issue::at(field.name, IssueCode::Required, "Required"));
        }
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };

    let expected = match field.kind {
        FieldKind::String if value.is_string() => return None,
        FieldKind::String => "string",
        FieldKind::Number if value.is_number() => return None,
        FieldKind::Number => "number",
        FieldKind::Integer if value.is_i64() => return None,
        FieldKind::Integer => "integer",
        FieldKind::Boolean if value.is_boolean() => return None,
        FieldKind::Boolean => "boolean",
        FieldKind::Timestamp => {
            return match value.as_str() {
                Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => None,
                Some(_) => Some(Issue::at(
                    field.name,
                    IssueCode::InvalidTimestamp,
                    "Invalid date, expected RFC 3339",
                )),
                None => Some(Issue::at(
                    field.name,
                    IssueCode::InvalidType,
                    format!("Expected timestamp string, received {}", type_name(value)),
                )),
            };
        }
        FieldKind::OneOf(allowed) => {
            return match value.as_str() {
                Some(s) if allowed.contains(&s) => None,
                _ => Some(Issue::at(
                    field.name,
                    IssueCode::InvalidEnumValue,
                    format!("Invalid enum value. Expected {}", allowed.join(" | ")),
                )),
            };
        }
    };

    Some(Issue::at(
        field.name,
        IssueCode::InvalidType,
        format!("Expected {}, received {}", expected, type_name(value)),
    ))
}

/// Validate a body and deserialize it into `T`.
pub fn parse<T: Validate>(body: Value) -> Result<T, Vec<Issue>> {
    let issues = check(&body, T::FIELDS);
    if !issues.is_empty() {
        return Err(issues);
    }

    serde_json::from_value(body).map_err(|e| {
        vec![Issue {
            path: Vec::new(),
            code: IssueCode::InvalidType,
            message: e.to_string(),
        }]
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Validate for NewUser {
    const FIELDS: &'static [Field] = &[
        required("username", FieldKind::String),
        required("password", FieldKind::String),
        required("fullName", FieldKind::String),
        required("userType", FieldKind::OneOf(UserType::VALUES)),
        required("location", FieldKind::String),
        optional("walletAddress", FieldKind::String),
        optional("bio", FieldKind::String),
        optional("profileImage", FieldKind::String),
    ];
}

impl Validate for NewMarketplaceItem {
    const FIELDS: &'static [Field] = &[
        required("userId", FieldKind::Integer),
        required("title", FieldKind::String),
        required("description", FieldKind::String),
        required("category", FieldKind::String),
        required("price", FieldKind::Number),
        required("unit", FieldKind::String),
        required("quantity", FieldKind::Number),
        required("location", FieldKind::String),
        optional("imageUrl", FieldKind::String),
    ];
}

impl Validate for NewBarterOffer {
    const FIELDS: &'static [Field] = &[
        required("offerUserId", FieldKind::Integer),
        required("receiveUserId", FieldKind::Integer),
        required("offerItemId", FieldKind::Integer),
        required("requestItemId", FieldKind::Integer),
    ];
}

impl Validate for NewMicrojob {
    const FIELDS: &'static [Field] = &[
        required("userId", FieldKind::Integer),
        required("title", FieldKind::String),
        required("description", FieldKind::String),
        required("skillsRequired", FieldKind::String),
        required("compensation", FieldKind::Number),
        required("location", FieldKind::String),
        required("duration", FieldKind::String),
    ];
}

impl Validate for NewProposal {
    const FIELDS: &'static [Field] = &[
        required("userId", FieldKind::Integer),
        required("title", FieldKind::String),
        required("description", FieldKind::String),
        required("endsAt", FieldKind::Timestamp),
    ];
}

impl Validate for NewLiquidityPool {
    const FIELDS: &'static [Field] = &[
        required("name", FieldKind::String),
        required("description", FieldKind::String),
        required("poolType", FieldKind::String),
        required("totalLiquidity", FieldKind::Number),
        required("asset", FieldKind::String),
        required("apy", FieldKind::Number),
        required("participants", FieldKind::Integer),
        required("risk", FieldKind::OneOf(RiskLevel::VALUES)),
        required("duration", FieldKind::String),
        required("userId", FieldKind::Integer),
        optional("imageUrl", FieldKind::String),
    ];
}
