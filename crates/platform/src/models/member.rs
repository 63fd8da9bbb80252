use serde::{Deserialize, Serialize};

/// Marks a member that is not backed by a real account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ghost {
    pub name: String,
}

/// Credentials linking a member to an account. Either `issuer` + `subject`
/// (an external account) or `issuer` + `nickname` + `password` (a space-local login).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Identity {
    pub const ACCOUNTS_ISSUER: &'static str = "https://accounts.eolymp.com";

    pub fn with_password(
        issuer: impl Into<String>,
        nickname: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: None,
            nickname: Some(nickname.into()),
            password: Some(password.into()),
        }
    }

    pub fn with_user_id(user_id: impl Into<String>) -> Self {
        Self {
            issuer: Self::ACCOUNTS_ISSUER.to_string(),
            subject: Some(user_id.into()),
            nickname: None,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Number,
    String,
}

/// Declaration of a custom member attribute in a space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: AttributeType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeValue {
    pub attribute_key: String,
    pub value: Value,
}

/// Fields of a member that an update may touch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberField {
    Name,
    Identities,
    Inactive,
    Unofficial,
    Rating,
    Groups,
    Attributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Member {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost: Option<Ghost>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unofficial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeValue>,
}

impl Member {
    pub fn ghost(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ghost: Some(Ghost { name: name.clone() }),
            name,
            ..Default::default()
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost.is_some()
    }

    /// Fields carrying a value in this payload.
    pub fn present_fields(&self) -> Vec<MemberField> {
        let mut fields = Vec::new();
        if !self.name.is_empty() {
            fields.push(MemberField::Name);
        }
        if !self.identities.is_empty() {
            fields.push(MemberField::Identities);
        }
        if self.inactive.is_some() {
            fields.push(MemberField::Inactive);
        }
        if self.unofficial.is_some() {
            fields.push(MemberField::Unofficial);
        }
        if self.rating.is_some() {
            fields.push(MemberField::Rating);
        }
        if self.groups.is_some() {
            fields.push(MemberField::Groups);
        }
        if !self.attributes.is_empty() {
            fields.push(MemberField::Attributes);
        }
        fields
    }
}
