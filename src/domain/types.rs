//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and media references are enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// A slug contained characters reserved by the router.
    #[error("slug contains reserved characters: {0}")]
    InvalidSlug(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    SubCategoryId,
    "Unique identifier for a sub-category.",
    "sub_category_id"
);
id_newtype!(
    PortfolioItemId,
    "Unique identifier for a portfolio item.",
    "portfolio_item_id"
);

non_empty_string_newtype!(
    CategoryName,
    "Category display name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    SubCategoryName,
    "Sub-category display name enforcing non-empty values.",
    "sub-category name"
);
non_empty_string_newtype!(
    ItemTitle,
    "Portfolio item title enforcing non-empty values.",
    "title"
);

/// Characters that would break `category/<slug>` routing.
const RESERVED_SLUG_CHARS: [char; 3] = ['/', '#', '?'];

/// URL-safe routing key of a category, unique among categories.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Accepts an already formed slug.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "slug")?;
        if trimmed.contains(RESERVED_SLUG_CHARS) || trimmed.contains(char::is_whitespace) {
            return Err(TypeConstraintError::InvalidSlug(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Derives a slug from a display name: lowercased, trimmed, whitespace
    /// runs collapsed into `-`. Non-ASCII letters are kept.
    pub fn from_name(name: &CategoryName) -> Self {
        let slug = name
            .as_str()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .replace(RESERVED_SLUG_CHARS, "-");
        Self(slug)
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned slug.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CategorySlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for CategorySlug {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Reference to a stored media asset.
///
/// Either an absolute `http(s)` URL or a site-relative path such as
/// `/media/projects/1700000000000-logo.png`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Constructs a trimmed media reference and validates its format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "media url")?;
        let site_relative = trimmed.starts_with('/') && !trimmed.starts_with("//");
        if !site_relative && !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("media url"));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned URL.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for MediaUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of asset a portfolio item points at.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Detects the media type from an upload's MIME essence (`image/png`).
    pub fn from_mime(mime: &str) -> Result<Self, TypeConstraintError> {
        match mime.split('/').next().map(str::trim) {
            Some("image") => Ok(Self::Image),
            Some("video") => Ok(Self::Video),
            _ => Err(TypeConstraintError::InvalidValue(format!(
                "unsupported media type: {mime}"
            ))),
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for MediaType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" | "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "media type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for MediaType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.as_str().to_string()
    }
}

/// How a portfolio item records its sub-category.
///
/// Older records carry a free-text label; newer ones point at a
/// [`crate::domain::sub_category::SubCategory`] row. Both are resolved into a
/// single display label by [`crate::grouping::normalize_items`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubCategoryRef {
    #[default]
    None,
    LegacyLabel { label: String },
    EntityRef { id: SubCategoryId },
}

impl SubCategoryRef {
    /// Builds the reference from the two persisted columns. The relational id
    /// wins over the legacy label; blank labels count as absent.
    pub fn from_columns(id: Option<SubCategoryId>, label: Option<String>) -> Self {
        if let Some(id) = id {
            return Self::EntityRef { id };
        }
        match label.map(|l| l.trim().to_string()) {
            Some(label) if !label.is_empty() => Self::LegacyLabel { label },
            _ => Self::None,
        }
    }

    /// Splits the reference back into `(sub_category_id, sub_category)` columns.
    pub fn into_columns(self) -> (Option<i32>, Option<String>) {
        match self {
            Self::None => (None, None),
            Self::LegacyLabel { label } => (None, Some(label)),
            Self::EntityRef { id } => (Some(id.get()), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = NonEmptyString::new("  poster  ").unwrap();
        assert_eq!(value.as_str(), "poster");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = PortfolioItemId::new(0).unwrap_err();
        assert_eq!(
            err,
            TypeConstraintError::NonPositiveId("portfolio_item_id")
        );
    }

    #[test]
    fn slug_from_name_collapses_whitespace() {
        let name = CategoryName::new("  Graphic   Design ").unwrap();
        assert_eq!(CategorySlug::from_name(&name).as_str(), "graphic-design");
    }

    #[test]
    fn slug_from_name_keeps_arabic_letters() {
        let name = CategoryName::new("تصميم جرافيك").unwrap();
        assert_eq!(CategorySlug::from_name(&name).as_str(), "تصميم-جرافيك");
    }

    #[test]
    fn slug_from_name_replaces_router_characters() {
        let name = CategoryName::new("UI/UX").unwrap();
        assert_eq!(CategorySlug::from_name(&name).as_str(), "ui-ux");
    }

    #[test]
    fn slug_rejects_reserved_characters() {
        assert!(CategorySlug::new("a/b").is_err());
        assert!(CategorySlug::new("with space").is_err());
        assert!(CategorySlug::new("photo").is_ok());
    }

    #[test]
    fn media_url_accepts_absolute_and_site_relative() {
        assert!(MediaUrl::new("https://example.com/a.png").is_ok());
        assert!(MediaUrl::new("/media/projects/a.png").is_ok());
        assert_eq!(
            MediaUrl::new("//evil.example/a.png").unwrap_err(),
            TypeConstraintError::InvalidUrl("media url")
        );
        assert!(MediaUrl::new("not a url").is_err());
    }

    #[test]
    fn media_type_defaults_to_image() {
        assert_eq!(MediaType::default(), MediaType::Image);
        assert_eq!(MediaType::try_from("").unwrap(), MediaType::Image);
        assert_eq!(MediaType::try_from("video").unwrap(), MediaType::Video);
        assert!(MediaType::try_from("audio").is_err());
    }

    #[test]
    fn media_type_from_mime() {
        assert_eq!(MediaType::from_mime("video/mp4").unwrap(), MediaType::Video);
        assert_eq!(MediaType::from_mime("image/webp").unwrap(), MediaType::Image);
        assert!(MediaType::from_mime("application/pdf").is_err());
    }

    #[test]
    fn sub_category_ref_prefers_entity_id() {
        let id = SubCategoryId::new(3).unwrap();
        assert_eq!(
            SubCategoryRef::from_columns(Some(id), Some("Posters".into())),
            SubCategoryRef::EntityRef { id }
        );
        assert_eq!(
            SubCategoryRef::from_columns(None, Some("  ".into())),
            SubCategoryRef::None
        );
        assert_eq!(
            SubCategoryRef::from_columns(None, Some(" Posters ".into())),
            SubCategoryRef::LegacyLabel {
                label: "Posters".into()
            }
        );
    }
}
