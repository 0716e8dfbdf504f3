//! Strongly-typed ID newtypes for domain entities.
//!
//! Admins, companies, and courses are all identified by integers owned by
//! other services. Wrapping each in its own newtype prevents passing a
//! `CourseId` where a `CompanyId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use parkgolf_models::ids::{CompanyId, CourseId};
//!
//! fn open_company(id: CompanyId) { /* ... */ }
//!
//! open_company(CompanyId(1));    // OK
//! // open_company(CourseId(1));  // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype.
///
/// Generates a transparent wrapper around `i64` that serializes as a bare
/// number and parses from its decimal string form.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the inner integer value.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(v: i64) -> Self {
                Self(v)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of an administrator account.
    AdminId
);

define_id!(
    /// Identifier of a golf company (tenant).
    CompanyId
);

define_id!(
    /// Identifier of a golf course owned by a company.
    CourseId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: AdminId = " 42 ".parse().unwrap();
        assert_eq!(id, AdminId(42));
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{:?}", id), "AdminId(42)");
        assert!("abc".parse::<CompanyId>().is_err());
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&CourseId(9)).unwrap();
        assert_eq!(json, "9");
        let parsed: CompanyId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, CompanyId(3));
    }
}
