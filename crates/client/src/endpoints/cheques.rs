//! Cheques, lifecycle transitions, images and the event log.

use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tesoreria_core::cheque::{
    Cheque, ChequeAction, ChequeKind, ChequeStatus, NewCheque, SubmitContext, TransitionForm,
    TransitionGuard,
};
use tesoreria_core::document::{ChequeImage, ImageUpload, validate_upload};
use tesoreria_shared::types::{BancoId, ChequeId, ClienteId, ProveedorId};
use tesoreria_shared::{AppError, AppResult};

use crate::http::{ApiClient, Download, NO_QUERY};

const CHEQUES: &str = "cheques";

/// Filters for `GET /cheques`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChequeFilter {
    /// Received or issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<ChequeKind>,
    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<ChequeStatus>,
    /// Issuing bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banco_id: Option<BancoId>,
    /// Customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<ClienteId>,
    /// Vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proveedor_id: Option<ProveedorId>,
}

/// An entry of a cheque's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChequeEvent {
    /// Backend id.
    pub id: i64,
    /// Event name, e.g. `IMAGEN_SUBIDA`.
    #[serde(alias = "tipo")]
    pub evento: String,
    /// Free-form detail.
    #[serde(default)]
    pub detalle: Option<Value>,
    /// When it happened.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct NewEvent<'a> {
    evento: &'a str,
    detalle: Value,
}

impl ApiClient {
    /// Lists cheques.
    pub async fn list_cheques(&self, filter: &ChequeFilter) -> AppResult<Vec<Cheque>> {
        self.get(CHEQUES, filter).await
    }

    /// Fetches one cheque.
    pub async fn get_cheque(&self, id: ChequeId) -> AppResult<Cheque> {
        self.get(&format!("{CHEQUES}/{id}"), NO_QUERY).await
    }

    /// Registers a cheque.
    pub async fn create_cheque(&self, input: &NewCheque) -> AppResult<Cheque> {
        input.validate()?;
        self.post(CHEQUES, input).await
    }

    /// Deletes a cheque. Cheques with applications or movements can only be voided,
    /// so a conflict is surfaced as is.
    pub async fn delete_cheque(&self, id: ChequeId) -> AppResult<()> {
        self.delete(&format!("{CHEQUES}/{id}"), false).await
    }

    /// Runs a lifecycle action.
    ///
    /// The guard checks the action against the cheque and the form before
    /// anything is sent; the operation date is taken now when the form
    /// leaves it empty.
    pub async fn transition_cheque(
        &self,
        action: ChequeAction,
        cheque: &Cheque,
        form: &TransitionForm,
    ) -> AppResult<Cheque> {
        let ctx = SubmitContext::now(self.usuario_id());
        let (path, body) = TransitionGuard::confirm(action, cheque, form, &ctx, |payload| {
            (
                format!("{CHEQUES}/{}/{}", payload.cheque_id, payload.action().slug()),
                payload.body(),
            )
        })?;
        tracing::info!(
            cheque_id = %cheque.id,
            action = action.slug(),
            from = %cheque.estado,
            "cheque transition"
        );
        self.post(&path, &body).await
    }

    /// Images stored for a cheque.
    pub async fn list_images(&self, cheque_id: ChequeId) -> AppResult<Vec<ChequeImage>> {
        self.get(&format!("{CHEQUES}/{cheque_id}/imagenes"), NO_QUERY)
            .await
    }

    /// Thumbnails for a cheque's images.
    pub async fn list_thumbs(&self, cheque_id: ChequeId) -> AppResult<Vec<ChequeImage>> {
        self.get(&format!("{CHEQUES}/{cheque_id}/imagenes/thumbs"), NO_QUERY)
            .await
    }

    /// Uploads an image as `multipart/form-data` (`file`, `tipo`, `observaciones`).
    pub async fn upload_image(
        &self,
        cheque_id: ChequeId,
        upload: ImageUpload,
    ) -> AppResult<ChequeImage> {
        validate_upload(&upload)?;
        let tipo = upload.tipo;
        let file_name = upload.file_name.clone();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| AppError::Validation(format!("invalid MIME type: {e}")))?;
        let mut form = Form::new().part("file", part).text("tipo", tipo.as_str());
        if let Some(obs) = upload.observaciones.filter(|o| !o.trim().is_empty()) {
            form = form.text("observaciones", obs);
        }

        let image: ChequeImage = self
            .post_multipart(&format!("{CHEQUES}/{cheque_id}/imagenes"), form)
            .await?;
        self.record_event(
            cheque_id,
            "IMAGEN_SUBIDA",
            serde_json::json!({ "imagen_id": image.id, "tipo": tipo, "archivo": file_name }),
        )
        .await;
        Ok(image)
    }

    /// Downloads an image or document.
    pub async fn download_image(&self, cheque_id: ChequeId, image_id: i64) -> AppResult<Download> {
        self.download(&format!("{CHEQUES}/{cheque_id}/imagenes/{image_id}"), NO_QUERY)
            .await
    }

    /// Deletes an image, allowing for slower storage cleanup.
    pub async fn delete_image(&self, cheque_id: ChequeId, image_id: i64) -> AppResult<()> {
        self.delete_file(&format!("{CHEQUES}/{cheque_id}/imagenes/{image_id}"))
            .await?;
        self.record_event(
            cheque_id,
            "IMAGEN_ELIMINADA",
            serde_json::json!({ "imagen_id": image_id }),
        )
        .await;
        Ok(())
    }

    /// A cheque's event log.
    pub async fn list_events(&self, cheque_id: ChequeId) -> AppResult<Vec<ChequeEvent>> {
        self.get(&format!("{CHEQUES}/{cheque_id}/eventos"), NO_QUERY)
            .await
    }

    /// Appends to the event log. Failures are logged and never returned.
    pub async fn record_event(&self, cheque_id: ChequeId, evento: &str, detalle: Value) {
        let path = format!("{CHEQUES}/{cheque_id}/eventos");
        if let Err(err) = self
            .post::<Value, _>(&path, &NewEvent { evento, detalle })
            .await
        {
            tracing::warn!(cheque_id = %cheque_id, evento, error = %err, "event log write failed");
        }
    }
}
