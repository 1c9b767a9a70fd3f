use std::{borrow::Cow, str::FromStr};

use compact_str::{CompactString, ToCompactString};
use derive_more::{Debug, Display};
use documented::Documented;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{
    PartialSchema, ToSchema,
    openapi::{ObjectBuilder, Type},
};

use crate::{Error, parse};

/// Build metadata: the part after `+` in `1.0.0+20250101`.
///
/// Metadata is opaque. It orders by ordinal string comparison,
/// with no metadata sorting before any metadata,
/// and only breaks ties between versions that are otherwise equal.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Debug, Display, Documented)]
pub enum Build {
    /// The version has no build metadata.
    #[default]
    #[display("")]
    None,

    /// The build metadata, trimmed and non-empty.
    #[display("{_0}")]
    #[debug("{_0:?}")]
    Identifier(CompactString),
}

impl Build {
    /// Create build metadata, treating blank input as [`Build::None`].
    ///
    /// No syntax checks are applied; use [`Build::parse`] for untrusted input.
    pub fn of(metadata: impl AsRef<str>) -> Self {
        match metadata.as_ref().trim() {
            "" => Self::None,
            metadata => Self::Identifier(metadata.to_compact_string()),
        }
    }

    /// Parse build metadata, without the leading `+`.
    ///
    /// Blank input parses as [`Build::None`].
    #[tracing::instrument]
    pub fn parse(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Self::None);
        }

        parse::complete(input, parse::dotted).map(Self::of)
    }

    /// Whether there is no build metadata.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// View the metadata as a string; no metadata is empty.
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Identifier(metadata) => metadata.as_str(),
        }
    }
}

impl FromStr for Build {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Build {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Build {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for Build {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Build {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

impl PartialSchema for Build {
    fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
        ObjectBuilder::new()
            .description(Some(Self::DOCS))
            .examples([json!("20250101"), json!("exp.sha.5114f85")])
            .schema_type(Type::String)
            .build()
            .into()
    }
}

impl ToSchema for Build {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Build")
    }
}
