//! Strongly-typed value objects used by the catalog and account entities.
//!
//! Entities carry these wrappers instead of raw primitives so that names,
//! slugs, URLs and counters are checked once, at the boundary where data
//! enters the domain.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A counter was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than its minimum after trimming.
    #[error("{0} must be at least {1} characters")]
    TooShort(&'static str, usize),
    /// A string exceeded the column width.
    #[error("{0} must be at most {1} characters")]
    TooLong(&'static str, usize),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// The name contained nothing that survives slug normalization.
    #[error("{0} must contain at least one letter or digit")]
    EmptySlug(&'static str),
}

impl TypeConstraintError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId(field)
            | Self::NegativeNumber(field)
            | Self::EmptyString(field)
            | Self::TooShort(field, _)
            | Self::TooLong(field, _)
            | Self::InvalidUrl(field)
            | Self::InvalidEmail(field)
            | Self::EmptySlug(field) => *field,
        }
    }
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

fn require_char_bounds(
    value: String,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, TypeConstraintError> {
    let len = value.chars().count();
    if len < min {
        Err(TypeConstraintError::TooShort(field, min))
    } else if len > max {
        Err(TypeConstraintError::TooLong(field, max))
    } else {
        Ok(value)
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

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Trimmed, non-empty text with bounds on its length.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $min:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Shortest accepted value, in characters, measured after trimming.
            pub const MIN_CHARS: usize = $min;
            /// Longest accepted value, in characters.
            pub const MAX_CHARS: usize = $max;

            /// Trims the input and rejects empty, too short or overlong values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                require_char_bounds(trimmed, $field, $min, $max).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
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

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
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

macro_rules! counter_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            Serialize,
            Deserialize,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Constructs a counter that must be zero or greater.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

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

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(CategoryId, "Unique identifier for a category.", "category_id");
id_newtype!(PageId, "Unique identifier for a page.", "page_id");
id_newtype!(UserId, "Unique identifier for a registered user.", "user_id");

bounded_string_newtype!(CategoryName, "Human-readable category name.", "name", 1, 128);
bounded_string_newtype!(PageTitle, "Title of a page within a category.", "title", 1, 128);
bounded_string_newtype!(Username, "Login name of a registered user.", "username", 3, 32);

url_string_newtype!(PageUrl, "Address a page links to.", "url");
url_string_newtype!(WebsiteUrl, "Optional personal website of a user.", "website");

counter_newtype!(ViewCount, "Number of times an entity was viewed.", "views");
counter_newtype!(LikeCount, "Number of likes a category received.", "likes");

/// Email address accepted at registration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?;
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EmailAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL-safe key derived from a [`CategoryName`].
///
/// The derivation lowercases the name, collapses whitespace runs into a single
/// hyphen and drops every character that is not alphanumeric, `-` or `_`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Derives the slug for a category name.
    pub fn from_name(name: &CategoryName) -> Result<Self, TypeConstraintError> {
        Self::new(slugify(name.as_str())).map_err(|_| TypeConstraintError::EmptySlug("name"))
    }

    /// Wraps an already-normalized slug, e.g. one read from a URL or a row.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptySlug("slug"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

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

/// Lowercase `value`, turn whitespace runs into `-` and strip everything else
/// that is not alphanumeric, `-` or `_`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = !slug.is_empty();
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(ch);
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_bounded_strings() {
        let value = CategoryName::new("  Python  ").unwrap();
        assert_eq!(value.as_str(), "Python");
    }

    #[test]
    fn rejects_overlong_names() {
        let err = CategoryName::new("x".repeat(129)).unwrap_err();
        assert_eq!(err, TypeConstraintError::TooLong("name", 128));
    }

    #[test]
    fn username_minimum_applies_after_trimming() {
        assert_eq!(
            Username::new("  ab  ").unwrap_err(),
            TypeConstraintError::TooShort("username", 3)
        );
        assert_eq!(Username::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = PageId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("page_id"));
    }

    #[test]
    fn validates_urls() {
        assert!(PageUrl::new("http://docs.python.org/3/tutorial/").is_ok());
        let err = PageUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("url"));
    }

    #[test]
    fn counters_reject_negative_values() {
        assert_eq!(
            ViewCount::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("views")
        );
        assert_eq!(LikeCount::default().get(), 0);
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slugify("Other Frameworks"), "other-frameworks");
        assert_eq!(slugify("  Python  "), "python");
        assert_eq!(slugify("Django   REST\tframework"), "django-rest-framework");
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slugify("C++ & Rust!"), "c-rust");
        assert_eq!(slugify("snake_case - names"), "snake_case-names");
    }

    #[test]
    fn slug_from_name_rejects_symbol_only_names() {
        let name = CategoryName::new("!!!").unwrap();
        assert_eq!(
            CategorySlug::from_name(&name).unwrap_err(),
            TypeConstraintError::EmptySlug("name")
        );
    }

    #[test]
    fn validates_emails() {
        assert!(EmailAddress::new("laura@example.com").is_ok());
        assert!(EmailAddress::new("laura").is_err());
    }
}
