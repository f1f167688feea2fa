//! Stock movement validation.

use rust_decimal::Decimal;
use serde::Serialize;

use tesoreria_shared::AppError;
use tesoreria_shared::types::{
    Currency, EstadoStockId, LocalId, LugarId, ProductoId, UsuarioId,
};

use super::error::StockValidationError;
use super::types::{NewStockMovement, SignRule, StockMovementDraft, StockMovementKind, clamp_notes};

/// Outcome of validating a draft: every problem found, not just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockValidation {
    /// Problems found.
    pub errors: Vec<StockValidationError>,
}

impl StockValidation {
    /// True when no problem was found.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joined messages, for a single notification.
    #[must_use]
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// `{ok, errors}` view of a validation, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Whether the draft can be submitted.
    pub ok: bool,
    /// Human-readable problems.
    pub errors: Vec<String>,
}

impl From<&StockValidation> for ValidationReport {
    fn from(v: &StockValidation) -> Self {
        Self {
            ok: v.ok(),
            errors: v.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<StockValidation> for AppError {
    fn from(v: StockValidation) -> Self {
        Self::Validation(v.message())
    }
}

/// Stateless validator for stock movement drafts.
pub struct StockMovementValidator;

impl StockMovementValidator {
    /// Collects every problem in the draft.
    #[must_use]
    pub fn validate(draft: &StockMovementDraft) -> StockValidation {
        let mut errors = Vec::new();

        if !draft.producto_id.is_some_and(|id| id > 0) {
            errors.push(StockValidationError::ProductRequired);
        }
        if !draft.local_id.is_some_and(|id| id > 0) {
            errors.push(StockValidationError::LocationRequired);
        }

        let kind = StockMovementKind::parse(&draft.tipo);
        match kind {
            None => errors.push(StockValidationError::UnknownKind(draft.tipo.clone())),
            Some(kind) => {
                if let Some(err) = Self::check_sign(kind, draft.delta) {
                    errors.push(err);
                }
                if kind.requires_reference() && !has_reference(draft) {
                    errors.push(StockValidationError::ReferenceRequired(kind));
                }
            }
        }
        if kind.is_none() && draft.delta == 0 {
            errors.push(StockValidationError::ZeroDelta);
        }

        if draft.costo_unit_neto.is_some_and(|c| c < Decimal::ZERO) {
            errors.push(StockValidationError::NegativeCost);
        }
        if let Err(err) = parse_currency(draft.moneda.as_deref()) {
            errors.push(err);
        }

        StockValidation { errors }
    }

    /// Validates and converts a draft into the request body.
    ///
    /// # Errors
    ///
    /// Returns every problem found when the draft is invalid.
    pub fn normalize(
        draft: &StockMovementDraft,
        usuario_id: Option<UsuarioId>,
    ) -> Result<NewStockMovement, StockValidation> {
        let validation = Self::validate(draft);
        if !validation.ok() {
            return Err(validation);
        }
        let (Some(tipo), Some(producto_id), Some(local_id)) = (
            StockMovementKind::parse(&draft.tipo),
            draft.producto_id,
            draft.local_id,
        ) else {
            return Err(validation);
        };
        let moneda = parse_currency(draft.moneda.as_deref()).unwrap_or_default();

        let (ref_tabla, ref_id) = if has_reference(draft) {
            (
                draft.ref_tabla.as_deref().map(|t| t.trim().to_string()),
                draft.ref_id,
            )
        } else {
            (None, None)
        };

        Ok(NewStockMovement {
            producto_id: ProductoId::new(producto_id),
            local_id: LocalId::new(local_id),
            lugar_id: draft.lugar_id.filter(|id| *id > 0).map(LugarId::new),
            estado_id: draft.estado_id.filter(|id| *id > 0).map(EstadoStockId::new),
            tipo,
            delta: draft.delta,
            costo_unit_neto: draft.costo_unit_neto,
            moneda,
            ref_tabla,
            ref_id,
            notas: clamp_notes(draft.notas.as_deref()),
            usuario_log_id: usuario_id,
        })
    }

    /// Checks the delta against the kind's sign rule.
    #[must_use]
    pub fn check_sign(kind: StockMovementKind, delta: i64) -> Option<StockValidationError> {
        let rule = kind.sign_rule();
        if rule.accepts(delta) {
            return None;
        }
        Some(match rule {
            _ if delta == 0 => StockValidationError::ZeroDelta,
            SignRule::Positive => StockValidationError::DeltaMustBePositive(kind),
            SignRule::Negative => StockValidationError::DeltaMustBeNegative(kind),
            SignRule::Any => StockValidationError::ZeroDelta,
        })
    }
}

fn has_reference(draft: &StockMovementDraft) -> bool {
    draft
        .ref_tabla
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty())
        && draft.ref_id.is_some_and(|id| id > 0)
}

fn parse_currency(code: Option<&str>) -> Result<Currency, StockValidationError> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(Currency::default()),
        Some(code) => code
            .parse()
            .map_err(|_| StockValidationError::UnknownCurrency(code.to_string())),
    }
}
