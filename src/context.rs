use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Type alias for a HashMap representing key-value pairs of attributes.
///
/// # Examples
/// ```
/// # use gofeatureflag::{Attributes, AttributeValue};
/// let attributes = [
///     ("age".to_owned(), 30.into()),
///     ("anonymous".to_owned(), false.into()),
///     ("email".to_owned(), "john.doe@gofeatureflag.org".into()),
/// ].into_iter().collect::<Attributes>();
/// ```
pub type Attributes = HashMap<String, AttributeValue>;

/// Enum representing possible values of an evaluation context attribute.
///
/// Conveniently implements `From` conversions for `bool`, `i64`, `f64`, `String`, `&str`, lists,
/// and nested attribute maps.
#[derive(Debug, Serialize, Deserialize, PartialEq, From, Clone)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Number(f64),
    /// A string value.
    String(String),
    /// A list of values.
    List(Vec<AttributeValue>),
    /// A nested mapping.
    Object(HashMap<String, AttributeValue>),
    /// A null value or absence of value.
    Null,
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

/// Caller-supplied evaluation context: a targeting key and free-form attributes.
///
/// ```
/// # use gofeatureflag::EvaluationContext;
/// let context = EvaluationContext::new("d45e303a-38c2-11ed-a261-0242ac120002")
///     .with_attribute("email", "john.doe@gofeatureflag.org")
///     .with_attribute("anonymous", false);
/// assert_eq!(context.targeting_key.as_deref(), Some("d45e303a-38c2-11ed-a261-0242ac120002"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationContext {
    /// Stable identifier of the evaluated entity.
    pub targeting_key: Option<String>,
    /// Free-form attributes used by targeting rules.
    #[serde(default)]
    pub attributes: Attributes,
}

impl EvaluationContext {
    /// Create a context with the given targeting key and no attributes.
    pub fn new(targeting_key: impl Into<String>) -> Self {
        EvaluationContext {
            targeting_key: Some(targeting_key.into()),
            attributes: Attributes::new(),
        }
    }

    /// Add or replace an attribute.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// User representation expected by the relay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoteUser<'a> {
    pub key: &'a str,
    pub anonymous: bool,
    pub custom: &'a Attributes,
}

const ANONYMOUS_ATTRIBUTE: &str = "anonymous";

impl<'a> RemoteUser<'a> {
    /// Convert an evaluation context into the relay's user.
    ///
    /// `custom` carries every attribute unchanged, `anonymous` included.
    pub fn from_context(context: Option<&'a EvaluationContext>) -> Result<RemoteUser<'a>> {
        let context = context.ok_or(Error::InvalidContext)?;

        let key = context
            .targeting_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(Error::TargetingKeyMissing)?;

        let anonymous = match context.attributes.get(ANONYMOUS_ATTRIBUTE) {
            None | Some(AttributeValue::Null) => true,
            Some(AttributeValue::Boolean(anonymous)) => *anonymous,
            Some(_) => return Err(Error::InvalidAnonymous),
        };

        Ok(RemoteUser {
            key,
            anonymous,
            custom: &context.attributes,
        })
    }
}
