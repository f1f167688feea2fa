//! Transition guard for cheque lifecycle actions.
//!
//! The guard turns an operator form into a typed transition payload. It
//! decides which contextual fields an action needs, pre-fills what it can
//! from the cheque, and refuses to assemble a payload while a required
//! field is missing. It never talks to the network: the assembled payload
//! goes to a caller-supplied confirm callback.

use chrono::NaiveDate;
use serde::Serialize;

use tesoreria_shared::types::{BancoCuentaId, ChequeId, ProveedorId, UsuarioId};

use super::error::ChequeError;
use super::lifecycle::{ChequeAction, ChequeLifecycle};
use super::types::{Cheque, ChequeKind};

/// Form fields a transition can ask the operator for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionField {
    /// Operation date.
    FechaOperacion,
    /// Free-text note.
    MotivoEstado,
    /// Destination bank account.
    BancoCuenta,
    /// Vendor selection.
    Proveedor,
    /// Free-text recipient.
    Destinatario,
}

/// A field shown for an action and whether it must be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// The field.
    pub field: TransitionField,
    /// True if submission is blocked while the field is empty.
    pub required: bool,
}

impl FieldSpec {
    const fn required(field: TransitionField) -> Self {
        Self {
            field,
            required: true,
        }
    }

    const fn optional(field: TransitionField) -> Self {
        Self {
            field,
            required: false,
        }
    }
}

/// Result of checking an action against a cheque before opening the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCheck {
    /// Fields the form shows, in display order.
    pub required_fields: Vec<FieldSpec>,
    /// Problems that block the action regardless of form input.
    pub errors: Vec<ChequeError>,
}

impl TransitionCheck {
    /// Returns true if the action can proceed to the form.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Operator input for a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionForm {
    /// Operation date; filled with the submission date when empty.
    pub fecha_operacion: Option<NaiveDate>,
    /// Free-text note.
    pub motivo_estado: Option<String>,
    /// Destination bank account.
    pub banco_cuenta_id: Option<BancoCuentaId>,
    /// Selected vendor.
    pub proveedor_id: Option<ProveedorId>,
    /// Free-text recipient.
    pub destinatario: Option<String>,
    destinatario_edited: bool,
}

impl TransitionForm {
    /// Opens a form for `action` on `cheque`.
    ///
    /// When the action needs a vendor and the cheque already carries one,
    /// the vendor is pre-selected and the recipient is filled with
    /// `vendor_name`.
    #[must_use]
    pub fn open(action: ChequeAction, cheque: &Cheque, vendor_name: Option<&str>) -> Self {
        let mut form = Self::default();
        if TransitionGuard::requires_vendor(action, cheque.tipo) {
            if let Some(proveedor_id) = cheque.proveedor_id {
                form.select_vendor(proveedor_id, vendor_name);
            }
        }
        form
    }

    /// Selects a vendor, filling the recipient with its display name unless
    /// the operator already typed one.
    pub fn select_vendor(&mut self, proveedor_id: ProveedorId, display_name: Option<&str>) {
        self.proveedor_id = Some(proveedor_id);
        if !self.destinatario_edited {
            self.destinatario = display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
        }
    }

    /// Records a recipient typed by the operator.
    pub fn set_destinatario(&mut self, text: impl Into<String>) {
        self.destinatario = Some(text.into());
        self.destinatario_edited = true;
    }

    /// Returns true if the operator typed the recipient.
    #[must_use]
    pub fn destinatario_edited(&self) -> bool {
        self.destinatario_edited
    }
}

/// Who a delivered cheque goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Issued cheque handed to a vendor.
    Vendor {
        /// Vendor.
        proveedor_id: ProveedorId,
        /// Recipient display text.
        destinatario: Option<String>,
    },
    /// Received cheque handed to a free-text recipient.
    Recipient {
        /// Recipient display text.
        destinatario: Option<String>,
    },
}

/// A validated transition with the contextual data its action needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChequeTransition {
    /// Deposit into a bank account.
    Depositar {
        /// Destination account.
        banco_cuenta_id: BancoCuentaId,
    },
    /// Record funds as credited.
    Acreditar {
        /// Credited account.
        banco_cuenta_id: BancoCuentaId,
    },
    /// Record a rejection.
    Rechazar {
        /// Account where the rejection is booked.
        banco_cuenta_id: BancoCuentaId,
    },
    /// Endorse to a vendor.
    AplicarAProveedor {
        /// Vendor.
        proveedor_id: ProveedorId,
        /// Recipient display text.
        destinatario: Option<String>,
    },
    /// Hand over.
    Entregar(Delivery),
    /// Settle; issued cheques name the debited account.
    Compensar {
        /// Debited account (issued cheques only).
        banco_cuenta_id: Option<BancoCuentaId>,
    },
    /// Void.
    Anular,
}

impl ChequeTransition {
    /// The action this transition performs.
    #[must_use]
    pub const fn action(&self) -> ChequeAction {
        match self {
            Self::Depositar { .. } => ChequeAction::Depositar,
            Self::Acreditar { .. } => ChequeAction::Acreditar,
            Self::Rechazar { .. } => ChequeAction::Rechazar,
            Self::AplicarAProveedor { .. } => ChequeAction::AplicarAProveedor,
            Self::Entregar(_) => ChequeAction::Entregar,
            Self::Compensar { .. } => ChequeAction::Compensar,
            Self::Anular => ChequeAction::Anular,
        }
    }
}

/// Everything the backend call for a transition carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPayload {
    /// Target cheque.
    pub cheque_id: ChequeId,
    /// The validated transition.
    pub transition: ChequeTransition,
    /// Operation date.
    pub fecha_operacion: NaiveDate,
    /// Free-text note.
    pub motivo_estado: Option<String>,
    /// Acting user, when a session exists.
    pub usuario_log_id: Option<UsuarioId>,
}

/// Flat JSON body sent to `POST /cheques/:id/<action>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionBody {
    /// Operation date.
    pub fecha_operacion: NaiveDate,
    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo_estado: Option<String>,
    /// Destination bank account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banco_cuenta_id: Option<BancoCuentaId>,
    /// Vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proveedor_id: Option<ProveedorId>,
    /// Recipient display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinatario: Option<String>,
    /// Acting user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_log_id: Option<UsuarioId>,
}

impl TransitionPayload {
    /// The action being performed.
    #[must_use]
    pub const fn action(&self) -> ChequeAction {
        self.transition.action()
    }

    /// Builds the JSON body for the backend call.
    #[must_use]
    pub fn body(&self) -> TransitionBody {
        let mut body = TransitionBody {
            fecha_operacion: self.fecha_operacion,
            motivo_estado: self.motivo_estado.clone(),
            banco_cuenta_id: None,
            proveedor_id: None,
            destinatario: None,
            usuario_log_id: self.usuario_log_id,
        };
        match &self.transition {
            ChequeTransition::Depositar { banco_cuenta_id }
            | ChequeTransition::Acreditar { banco_cuenta_id }
            | ChequeTransition::Rechazar { banco_cuenta_id } => {
                body.banco_cuenta_id = Some(*banco_cuenta_id);
            }
            ChequeTransition::Compensar { banco_cuenta_id } => {
                body.banco_cuenta_id = *banco_cuenta_id;
            }
            ChequeTransition::AplicarAProveedor {
                proveedor_id,
                destinatario,
            }
            | ChequeTransition::Entregar(Delivery::Vendor {
                proveedor_id,
                destinatario,
            }) => {
                body.proveedor_id = Some(*proveedor_id);
                body.destinatario.clone_from(destinatario);
            }
            ChequeTransition::Entregar(Delivery::Recipient { destinatario }) => {
                body.destinatario.clone_from(destinatario);
            }
            ChequeTransition::Anular => {}
        }
        body
    }
}

/// Context captured at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitContext {
    /// Date used when the form leaves `fecha_operacion` empty.
    pub today: NaiveDate,
    /// Session user, if any.
    pub usuario_id: Option<UsuarioId>,
}

impl SubmitContext {
    /// Captures the local date now, at submission.
    #[must_use]
    pub fn now(usuario_id: Option<UsuarioId>) -> Self {
        Self {
            today: chrono::Local::now().date_naive(),
            usuario_id,
        }
    }
}

/// Stateless guard over cheque transitions.
pub struct TransitionGuard;

impl TransitionGuard {
    /// True when the action must name a destination bank account.
    #[must_use]
    pub fn requires_destination_account(action: ChequeAction, tipo: ChequeKind) -> bool {
        matches!(
            action,
            ChequeAction::Depositar | ChequeAction::Acreditar | ChequeAction::Rechazar
        ) || (action == ChequeAction::Compensar && tipo == ChequeKind::Emitido)
    }

    /// True when the action must name a vendor.
    #[must_use]
    pub fn requires_vendor(action: ChequeAction, tipo: ChequeKind) -> bool {
        matches!(
            (action, tipo),
            (ChequeAction::AplicarAProveedor, ChequeKind::Recibido)
                | (ChequeAction::Entregar, ChequeKind::Emitido)
        )
    }

    /// Fields the form shows for `action`, in display order.
    #[must_use]
    pub fn required_fields(action: ChequeAction, tipo: ChequeKind) -> Vec<FieldSpec> {
        let mut fields = vec![FieldSpec::required(TransitionField::FechaOperacion)];
        if Self::requires_destination_account(action, tipo) {
            fields.push(FieldSpec::required(TransitionField::BancoCuenta));
        }
        if Self::requires_vendor(action, tipo) {
            fields.push(FieldSpec::required(TransitionField::Proveedor));
            fields.push(FieldSpec::optional(TransitionField::Destinatario));
        } else if action == ChequeAction::Entregar {
            fields.push(FieldSpec::optional(TransitionField::Destinatario));
        }
        fields.push(FieldSpec::optional(TransitionField::MotivoEstado));
        fields
    }

    /// Checks `action` against the cheque before the form opens.
    #[must_use]
    pub fn validate(action: ChequeAction, cheque: &Cheque) -> TransitionCheck {
        let errors = ChequeLifecycle::transition(action, cheque.tipo, cheque.estado)
            .err()
            .into_iter()
            .collect();
        TransitionCheck {
            required_fields: Self::required_fields(action, cheque.tipo),
            errors,
        }
    }

    /// Assembles the payload for `action`, or names the first missing field.
    pub fn prepare(
        action: ChequeAction,
        cheque: &Cheque,
        form: &TransitionForm,
        ctx: &SubmitContext,
    ) -> Result<TransitionPayload, ChequeError> {
        ChequeLifecycle::transition(action, cheque.tipo, cheque.estado)?;

        let account = if Self::requires_destination_account(action, cheque.tipo) {
            Some(form.banco_cuenta_id.ok_or(ChequeError::BankAccountRequired)?)
        } else {
            None
        };
        let vendor = if Self::requires_vendor(action, cheque.tipo) {
            Some(form.proveedor_id.ok_or(ChequeError::VendorRequired)?)
        } else {
            None
        };
        let destinatario = non_blank(form.destinatario.as_deref());

        let transition = match (action, account, vendor) {
            (ChequeAction::Depositar, Some(banco_cuenta_id), _) => {
                ChequeTransition::Depositar { banco_cuenta_id }
            }
            (ChequeAction::Acreditar, Some(banco_cuenta_id), _) => {
                ChequeTransition::Acreditar { banco_cuenta_id }
            }
            (ChequeAction::Rechazar, Some(banco_cuenta_id), _) => {
                ChequeTransition::Rechazar { banco_cuenta_id }
            }
            (ChequeAction::AplicarAProveedor, _, Some(proveedor_id)) => {
                ChequeTransition::AplicarAProveedor {
                    proveedor_id,
                    destinatario,
                }
            }
            (ChequeAction::Entregar, _, Some(proveedor_id)) => {
                ChequeTransition::Entregar(Delivery::Vendor {
                    proveedor_id,
                    destinatario,
                })
            }
            (ChequeAction::Entregar, _, None) => {
                ChequeTransition::Entregar(Delivery::Recipient { destinatario })
            }
            (ChequeAction::Compensar, banco_cuenta_id, _) => {
                ChequeTransition::Compensar { banco_cuenta_id }
            }
            (ChequeAction::Anular, _, _) => ChequeTransition::Anular,
            (ChequeAction::Depositar | ChequeAction::Acreditar | ChequeAction::Rechazar, None, _) => {
                return Err(ChequeError::BankAccountRequired);
            }
            (ChequeAction::AplicarAProveedor, _, None) => return Err(ChequeError::VendorRequired),
        };

        Ok(TransitionPayload {
            cheque_id: cheque.id,
            transition,
            fecha_operacion: form.fecha_operacion.unwrap_or(ctx.today),
            motivo_estado: non_blank(form.motivo_estado.as_deref()),
            usuario_log_id: ctx.usuario_id,
        })
    }

    /// Validates the form and hands the payload to `on_confirm`.
    ///
    /// `on_confirm` is not called when validation fails.
    pub fn confirm<F, R>(
        action: ChequeAction,
        cheque: &Cheque,
        form: &TransitionForm,
        ctx: &SubmitContext,
        on_confirm: F,
    ) -> Result<R, ChequeError>
    where
        F: FnOnce(TransitionPayload) -> R,
    {
        let payload = Self::prepare(action, cheque, form, ctx)?;
        Ok(on_confirm(payload))
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
