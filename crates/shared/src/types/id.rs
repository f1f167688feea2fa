//! Typed IDs for type-safe entity references.
//!
//! The back-office API keys every record with a positive integer. Wrapping
//! them prevents passing a `BancoId` where a `BancoCuentaId` is expected.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a typed ID from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id: {0}")]
pub struct ParseIdError(pub String);

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw backend value.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw backend value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Returns true if the ID can reference a persisted record.
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i64>() {
                    Ok(raw) if raw > 0 => Ok(Self(raw)),
                    _ => Err(ParseIdError(s.to_string())),
                }
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

typed_id!(UsuarioId, "Identifier of the acting back-office user.");
typed_id!(BancoId, "Unique identifier for a bank.");
typed_id!(BancoCuentaId, "Unique identifier for a bank account.");
typed_id!(BancoMovimientoId, "Unique identifier for a bank movement.");
typed_id!(ChequeraId, "Unique identifier for a checkbook.");
typed_id!(ChequeId, "Unique identifier for a cheque.");
typed_id!(ClienteId, "Unique identifier for a customer.");
typed_id!(ProveedorId, "Unique identifier for a vendor.");
typed_id!(VentaId, "Unique identifier for a sale.");
typed_id!(ProductoId, "Unique identifier for a product.");
typed_id!(LocalId, "Unique identifier for a store location.");
typed_id!(LugarId, "Unique identifier for a storage place inside a location.");
typed_id!(EstadoStockId, "Unique identifier for a stock condition.");
typed_id!(StockMovimientoId, "Unique identifier for a stock movement.");
typed_id!(OrdenCompraId, "Unique identifier for a purchase order.");
typed_id!(CompraId, "Unique identifier for a purchase.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_roundtrip() {
        let id = ChequeId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(ChequeId::from_str("42").unwrap(), id);
    }

    #[test]
    fn test_typed_id_rejects_non_positive() {
        assert!(BancoId::from_str("0").is_err());
        assert!(BancoId::from_str("-3").is_err());
        assert!(BancoId::from_str("abc").is_err());
        assert!(!BancoId::new(0).is_valid());
        assert!(BancoId::new(1).is_valid());
    }

    #[test]
    fn test_typed_id_serializes_transparently() {
        let json = serde_json::to_string(&ProveedorId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: ProveedorId = serde_json::from_str("7").unwrap();
        assert_eq!(back, ProveedorId::new(7));
    }
}
