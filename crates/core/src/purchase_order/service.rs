//! Purchase order status rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use tesoreria_shared::types::UsuarioId;

use super::error::PurchaseOrderError;
use super::types::{
    GeneratePurchase, PurchaseOrderInput, PurchaseOrderLine, PurchaseOrderStatus, StatusChange,
};

/// Stateless service for purchase order transitions and edits.
pub struct PurchaseOrderService;

impl PurchaseOrderService {
    /// Statuses reachable from `from` through `PUT /estado`.
    #[must_use]
    pub const fn next_statuses(from: PurchaseOrderStatus) -> &'static [PurchaseOrderStatus] {
        use PurchaseOrderStatus::{Approved, Draft, PendingApproval, Rejected};
        match from {
            Draft => &[PendingApproval, Approved],
            PendingApproval => &[Approved, Rejected, Draft],
            Approved | Rejected | PurchaseOrderStatus::Closed => &[],
        }
    }

    /// Returns true if `from → to` is a valid status change.
    #[must_use]
    pub fn is_valid_transition(from: PurchaseOrderStatus, to: PurchaseOrderStatus) -> bool {
        Self::next_statuses(from).contains(&to)
    }

    /// Builds a status change request.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is invalid, or targets CLOSED.
    pub fn change_status(
        from: PurchaseOrderStatus,
        to: PurchaseOrderStatus,
        motivo: Option<String>,
        usuario_id: Option<UsuarioId>,
    ) -> Result<StatusChange, PurchaseOrderError> {
        if to == PurchaseOrderStatus::Closed {
            return Err(PurchaseOrderError::CloseThroughPurchase);
        }
        if !Self::is_valid_transition(from, to) {
            return Err(PurchaseOrderError::InvalidTransition { from, to });
        }
        Ok(StatusChange {
            estado: to,
            motivo: motivo.filter(|m| !m.trim().is_empty()),
            usuario_log_id: usuario_id,
        })
    }

    /// Returns true if lines may be edited.
    #[must_use]
    pub fn lines_editable(status: PurchaseOrderStatus) -> bool {
        status == PurchaseOrderStatus::Draft
    }

    /// Fails unless lines may be edited.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseOrderError::LinesLocked`] outside DRAFT.
    pub fn ensure_lines_editable(status: PurchaseOrderStatus) -> Result<(), PurchaseOrderError> {
        if Self::lines_editable(status) {
            Ok(())
        } else {
            Err(PurchaseOrderError::LinesLocked(status))
        }
    }

    /// Returns true if a purchase can be generated.
    #[must_use]
    pub fn can_generate_purchase(status: PurchaseOrderStatus) -> bool {
        status == PurchaseOrderStatus::Approved
    }

    /// Builds the generate-purchase request, which closes the order.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseOrderError::NotApproved`] unless APPROVED.
    pub fn generate_purchase(
        status: PurchaseOrderStatus,
        fecha: NaiveDate,
        nro_comprobante: Option<String>,
        usuario_id: Option<UsuarioId>,
    ) -> Result<GeneratePurchase, PurchaseOrderError> {
        if !Self::can_generate_purchase(status) {
            return Err(PurchaseOrderError::NotApproved(status));
        }
        Ok(GeneratePurchase {
            fecha,
            nro_comprobante: nro_comprobante.filter(|n| !n.trim().is_empty()),
            usuario_log_id: usuario_id,
        })
    }

    /// Validates an order before it is created or updated.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(input: &PurchaseOrderInput) -> Result<(), PurchaseOrderError> {
        if !input.proveedor_id.is_valid() {
            return Err(PurchaseOrderError::VendorRequired);
        }
        if input.lineas.is_empty() {
            return Err(PurchaseOrderError::NoLines);
        }
        for (i, line) in input.lineas.iter().enumerate() {
            Self::validate_line(line).map_err(|reason| PurchaseOrderError::InvalidLine {
                line: i + 1,
                reason,
            })?;
        }
        Ok(())
    }

    fn validate_line(line: &PurchaseOrderLine) -> Result<(), &'static str> {
        let hundred = Decimal::ONE_HUNDRED;
        if !line.producto_id.is_valid() {
            return Err("product is required");
        }
        if line.cantidad <= Decimal::ZERO {
            return Err("quantity must be positive");
        }
        if line.costo_unit_estimado.is_negative() {
            return Err("unit cost cannot be negative");
        }
        if line.alicuota_iva_pct < Decimal::ZERO || line.alicuota_iva_pct > hundred {
            return Err("VAT rate must be between 0 and 100");
        }
        if line.descuento_pct < Decimal::ZERO || line.descuento_pct > hundred {
            return Err("discount must be between 0 and 100");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use tesoreria_shared::types::{Cents, Currency, ProductoId, ProveedorId};

    use PurchaseOrderStatus::{Approved, Closed, Draft, PendingApproval, Rejected};

    #[rstest]
    #[case(Draft, PendingApproval, true)]
    #[case(Draft, Approved, true)]
    #[case(PendingApproval, Approved, true)]
    #[case(PendingApproval, Rejected, true)]
    #[case(PendingApproval, Draft, true)]
    #[case(Draft, Rejected, false)]
    #[case(Approved, Draft, false)]
    #[case(Rejected, Draft, false)]
    #[case(Closed, Approved, false)]
    fn test_transitions(
        #[case] from: PurchaseOrderStatus,
        #[case] to: PurchaseOrderStatus,
        #[case] valid: bool,
    ) {
        assert_eq!(PurchaseOrderService::is_valid_transition(from, to), valid);
        assert_eq!(
            PurchaseOrderService::change_status(from, to, None, None).is_ok(),
            valid
        );
    }

    #[test]
    fn test_closed_only_through_purchase() {
        assert_eq!(
            PurchaseOrderService::change_status(Approved, Closed, None, None),
            Err(PurchaseOrderError::CloseThroughPurchase)
        );
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        let body = PurchaseOrderService::generate_purchase(Approved, date, Some("A-0001".into()), None)
            .expect("approved");
        assert_eq!(body.nro_comprobante.as_deref(), Some("A-0001"));
        assert_eq!(
            PurchaseOrderService::generate_purchase(Draft, date, None, None),
            Err(PurchaseOrderError::NotApproved(Draft))
        );
    }

    #[test]
    fn test_lines_locked_outside_draft() {
        assert!(PurchaseOrderService::ensure_lines_editable(Draft).is_ok());
        for status in [PendingApproval, Approved, Rejected, Closed] {
            assert_eq!(
                PurchaseOrderService::ensure_lines_editable(status),
                Err(PurchaseOrderError::LinesLocked(status))
            );
        }
    }

    #[test]
    fn test_status_change_drops_blank_reason() {
        let change = PurchaseOrderService::change_status(
            PendingApproval,
            Rejected,
            Some("  ".into()),
            Some(UsuarioId::new(3)),
        )
        .expect("valid");
        assert_eq!(change.motivo, None);
        assert_eq!(change.usuario_log_id, Some(UsuarioId::new(3)));
    }

    #[test]
    fn test_validate_order() {
        let line = PurchaseOrderLine {
            producto_id: ProductoId::new(1),
            descripcion: None,
            cantidad: dec!(2),
            costo_unit_estimado: Cents::new(1000),
            alicuota_iva_pct: dec!(21),
            descuento_pct: dec!(0),
        };
        let mut input = PurchaseOrderInput {
            proveedor_id: ProveedorId::new(4),
            local_id: None,
            fecha_estimada_entrega: None,
            observaciones: None,
            moneda: Currency::Ars,
            lineas: vec![line.clone()],
            usuario_log_id: None,
        };
        assert!(PurchaseOrderService::validate(&input).is_ok());

        input.lineas.push(PurchaseOrderLine {
            cantidad: dec!(0),
            ..line
        });
        assert_eq!(
            PurchaseOrderService::validate(&input),
            Err(PurchaseOrderError::InvalidLine {
                line: 2,
                reason: "quantity must be positive"
            })
        );

        input.lineas.clear();
        assert_eq!(PurchaseOrderService::validate(&input), Err(PurchaseOrderError::NoLines));
        input.proveedor_id = ProveedorId::new(0);
        assert_eq!(
            PurchaseOrderService::validate(&input),
            Err(PurchaseOrderError::VendorRequired)
        );
    }
}
