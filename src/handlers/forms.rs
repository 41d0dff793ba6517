use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::form_registry::FormSession;
use crate::application::order_form_service::OrderFormService;
use crate::application::submission::SubmissionResult;
use crate::domain::order::{FieldUpdate, PaymentType};
use crate::domain::summary::{summarize, OrderSummary};
use crate::errors::AppError;

use super::menu::MenuItemResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// One field edit, e.g. `{"field": "quantity", "line": 0, "value": 2}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum UpdateFieldRequest {
    CustomerName { value: String },
    ItemId { line: usize, value: String },
    Quantity { line: usize, value: i64 },
    PaymentType { value: PaymentType },
}

impl From<UpdateFieldRequest> for FieldUpdate {
    fn from(req: UpdateFieldRequest) -> Self {
        match req {
            UpdateFieldRequest::CustomerName { value } => FieldUpdate::CustomerName(value),
            UpdateFieldRequest::ItemId { line, value } => FieldUpdate::ItemId {
                line,
                item_id: value,
            },
            UpdateFieldRequest::Quantity { line, value } => FieldUpdate::Quantity {
                line,
                quantity: value,
            },
            UpdateFieldRequest::PaymentType { value } => FieldUpdate::PaymentType(value),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLineResponse {
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryLineResponse {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    /// Decimal as a string, e.g. "25.00"
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub lines: Vec<SummaryLineResponse>,
    pub total: String,
}

impl From<OrderSummary> for SummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            lines: summary
                .lines
                .into_iter()
                .map(|l| SummaryLineResponse {
                    item_id: l.item_id,
                    name: l.name,
                    quantity: l.quantity,
                    unit_price: l.unit_price.to_string(),
                    subtotal: l.subtotal.to_string(),
                })
                .collect(),
            total: summary.total.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub items: Vec<OrderLineResponse>,
    pub payment_type: PaymentType,
    pub submitting: bool,
    pub created_at: String,
    pub menu: Vec<MenuItemResponse>,
    pub summary: SummaryResponse,
}

impl FormResponse {
    fn from_session(id: Uuid, session: FormSession) -> Self {
        let draft = session.form.draft();
        let summary = summarize(&draft.items, &session.menu);
        Self {
            id,
            customer_name: draft.customer_name.clone(),
            items: draft
                .items
                .iter()
                .map(|l| OrderLineResponse {
                    item_id: l.item_id.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            payment_type: draft.payment_type,
            submitting: session.submitting,
            created_at: session.created_at.to_rfc3339(),
            menu: session.menu.items().iter().map(MenuItemResponse::from).collect(),
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: Option<String>,
    /// Order service response body, passed through untouched.
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(r: SubmissionResult) -> Self {
        Self {
            success: r.success,
            message: r.message,
            data: r.data,
        }
    }
}

fn form_ok(id: Uuid, session: FormSession) -> HttpResponse {
    HttpResponse::Ok().json(FormResponse::from_session(id, session))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /forms
///
/// Opens a new, independent order form with a freshly loaded menu.
#[utoipa::path(
    post,
    path = "/forms",
    responses(
        (status = 201, description = "Form created", body = FormResponse),
    ),
    tag = "forms"
)]
pub async fn create_form(service: web::Data<OrderFormService>) -> HttpResponse {
    let (id, session) = service.create_form().await;
    HttpResponse::Created().json(FormResponse::from_session(id, session))
}

#[utoipa::path(
    get,
    path = "/forms/{id}",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Current form state", body = FormResponse),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn get_form(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = service.get_form(id)?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    delete,
    path = "/forms/{id}",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 204, description = "Form discarded"),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn delete_form(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    service.remove_form(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /forms/{id}
///
/// Sets one field: customer name, a line's item or quantity, or the payment
/// type.
#[utoipa::path(
    patch,
    path = "/forms/{id}",
    params(("id" = Uuid, Path, description = "Form UUID")),
    request_body = UpdateFieldRequest,
    responses(
        (status = 200, description = "Field updated", body = FormResponse),
        (status = 400, description = "Line index out of range"),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn update_field(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateFieldRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = service.set_field(id, body.into_inner().into())?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    post,
    path = "/forms/{id}/lines",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Blank line appended", body = FormResponse),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn add_line(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = service.add_line(id)?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    delete,
    path = "/forms/{id}/lines/{index}",
    params(
        ("id" = Uuid, Path, description = "Form UUID"),
        ("index" = usize, Path, description = "Zero-based line index"),
    ),
    responses(
        (status = 200, description = "Line removed", body = FormResponse),
        (status = 400, description = "Line index out of range"),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn remove_line(
    service: web::Data<OrderFormService>,
    path: web::Path<(Uuid, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let session = service.remove_line(id, index)?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    post,
    path = "/forms/{id}/reset",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Form cleared", body = FormResponse),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn reset_form(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = service.reset(id)?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    post,
    path = "/forms/{id}/menu",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Menu reloaded", body = FormResponse),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn refresh_menu(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = service.refresh_menu(id).await?;
    Ok(form_ok(id, session))
}

#[utoipa::path(
    get,
    path = "/forms/{id}/summary",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Priced breakdown of resolvable lines", body = SummaryResponse),
        (status = 404, description = "Form not found"),
    ),
    tag = "forms"
)]
pub async fn get_summary(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary(path.into_inner())?;
    Ok(HttpResponse::Ok().json(SummaryResponse::from(summary)))
}

/// POST /forms/{id}/submit
///
/// Validates the draft and forwards it to the order service. The order
/// service's verdict is reported in the body (`success`), so both outcomes
/// answer 200.
#[utoipa::path(
    post,
    path = "/forms/{id}/submit",
    params(("id" = Uuid, Path, description = "Form UUID")),
    responses(
        (status = 200, description = "Submission attempted", body = SubmissionResponse),
        (status = 404, description = "Form not found"),
        (status = 409, description = "A submission is already in flight"),
        (status = 422, description = "Required fields missing or invalid"),
    ),
    tag = "forms"
)]
pub async fn submit_form(
    service: web::Data<OrderFormService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let result = service.submit(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SubmissionResponse::from(result)))
}
