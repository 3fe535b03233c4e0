//! Typed identifiers.
//!
//! Products and users are both keyed by UUID v4. Wrapping each in its own
//! newtype keeps a `UserId` from being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// A `Uuid` newtype that binds, decodes and serializes as the bare UUID.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, sqlx::Type, ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        /// Surrounding whitespace is ignored.
        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog product.
    ProductId
);

define_id!(
    /// Identifier of a registered user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_random() {
        assert_ne!(ProductId::new(), ProductId::new());
        assert!(!UserId::new().into_inner().is_nil());
    }

    #[test]
    fn test_id_from_str() {
        let id: ProductId = "12345678-1234-1234-1234-123456789abc".parse().unwrap();
        assert_eq!(
            id.into_inner(),
            Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc)
        );
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!("not-an-id".parse::<ProductId>().is_err());
        assert!("".parse::<UserId>().is_err());
        assert!("5f8d0d55b54764421b7156c9".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UserId::from(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""12345678-1234-1234-1234-123456789abc""#);

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_debug_names_the_type() {
        let id = ProductId::from(Uuid::nil());
        assert!(format!("{:?}", id).starts_with("ProductId("));
    }
}
