use platform::AttributeValue;

use super::Row;
use crate::attributes::AttributeSchema;
use crate::{MigrateError, Result};

const IDENTITY_COLUMNS: [&str; 3] = ["password", "eolymp_user_id", "eolymp_username"];

pub fn validate_member_header(header: &[String]) -> Result<()> {
    if !header.iter().any(|c| c == "name") {
        return Err(MigrateError::InvalidHeader(
            "CSV file must contain column \"name\" with member's name".to_string(),
        ));
    }
    if !IDENTITY_COLUMNS
        .iter()
        .any(|column| header.iter().any(|c| c == column))
    {
        return Err(MigrateError::InvalidHeader(
            "CSV file must contain one of columns identifying user: \"password\", \
             \"eolymp_username\" or \"eolymp_user_id\""
                .to_string(),
        ));
    }
    Ok(())
}

/// Where a member's login comes from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    Password(String),
    UserId(String),
    Username(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub name: String,
    pub identity: Option<IdentitySource>,
    pub inactive: Option<bool>,
    pub unofficial: Option<bool>,
    pub rating: Option<i32>,
    pub groups: Option<Vec<String>>,
    pub attributes: Vec<AttributeValue>,
}

impl MemberRow {
    /// Parses a member row. Rows with an empty name yield `None`. Attribute
    /// coercion errors are returned as [`MigrateError::InvalidAttributeValue`].
    pub fn parse(row: &Row, schema: &AttributeSchema) -> Result<Option<Self>> {
        let Some(name) = row.get("name") else {
            return Ok(None);
        };

        let identity = if let Some(password) = row.get("password") {
            Some(IdentitySource::Password(password.to_string()))
        } else if let Some(user_id) = row.get("eolymp_user_id") {
            Some(IdentitySource::UserId(user_id.to_string()))
        } else {
            row.get("eolymp_username")
                .map(|username| IdentitySource::Username(username.to_string()))
        };

        Ok(Some(Self {
            name: name.to_string(),
            identity,
            inactive: row.parse_bool("inactive")?,
            unofficial: row.parse_bool("unofficial")?,
            rating: row.parse("rating")?,
            groups: row
                .get("groups")
                .map(|groups| groups.split_whitespace().map(str::to_string).collect()),
            attributes: schema.coerce(row.cells())?,
        }))
    }
}
