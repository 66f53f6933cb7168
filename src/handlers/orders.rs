use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::order_service::Report;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, Size};
use crate::domain::pricing;
use crate::domain::workflow::OrderStatus;
use crate::errors::AppError;
use crate::AppService;

// ── Form DTOs ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderForm {
    /// Customer contact; used as the customer id.
    pub contact: String,
    /// One of XS, S, M, L, XL, XXL.
    pub size: String,
    /// Positive integer, sent as text.
    pub qty: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerSearchForm {
    pub contact: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderCodeForm {
    /// Order code such as `ODR#00042`.
    pub orderid: String,
}

// ── View models ──────────────────────────────────────────────────────────────

/// Money with two decimals, as a string to avoid floating-point issues.
fn format_amount(amount: &BigDecimal) -> String {
    amount.with_scale(2).to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderView {
    pub id: i64,
    pub order_code: String,
    pub customer_id: String,
    pub size: Size,
    pub quantity: i32,
    pub total_amount: String,
    pub status: OrderStatus,
    pub created_at: String,
}

impl From<Order> for OrderView {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            total_amount: format_amount(&o.total_amount),
            order_code: o.order_code,
            customer_id: o.customer_id,
            size: o.size,
            quantity: o.quantity,
            status: o.status,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

fn order_views(orders: Vec<Order>) -> Vec<OrderView> {
    orders.into_iter().map(OrderView::from).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LinkView {
    pub path: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeView {
    pub links: Vec<LinkView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SizePriceView {
    pub size: Size,
    pub unit_price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderFormView {
    pub sizes: Vec<SizePriceView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<String>,
}

impl FormView {
    fn new(action: &str, field: &str) -> Self {
        Self {
            action: action.to_string(),
            fields: vec![field.to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerOrdersView {
    pub customer_id: String,
    pub orders: Vec<OrderView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListView {
    pub orders: Vec<OrderView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportView {
    pub orders: Vec<OrderView>,
    pub total_orders: usize,
    pub total_amount: String,
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        Self {
            total_orders: report.total_orders,
            total_amount: format_amount(&report.total_amount),
            orders: order_views(report.orders),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdatedView {
    pub order: OrderView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDeletedView {
    pub order_code: String,
}

/// Informational outcome rendered with 200, e.g. a lookup that found nothing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoticeView {
    pub view: String,
    pub message: String,
}

impl NoticeView {
    pub const ORDER_NOT_FOUND: &'static str = "order_not_found";
    pub const STATUS_ERROR: &'static str = "status_error";

    fn order_not_found(order_code: &str) -> Self {
        Self {
            view: Self::ORDER_NOT_FOUND.to_string(),
            message: format!("No order with code '{}'", order_code),
        }
    }

    fn status_error(err: &DomainError) -> Self {
        Self {
            view: Self::STATUS_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

fn parse_quantity(raw: &str) -> Result<i32, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::InvalidQuantity("Quantity must be a number".to_string()))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = HomeView)),
    tag = "orders"
)]
pub async fn home() -> HttpResponse {
    let links = [
        ("/place-order", "Place order"),
        ("/search-customer", "Search by customer"),
        ("/search-order", "Search by order code"),
        ("/reports", "Reports"),
        ("/change-status", "Change status"),
        ("/delete-order", "Delete order"),
    ]
    .into_iter()
    .map(|(path, title)| LinkView {
        path: path.to_string(),
        title: title.to_string(),
    })
    .collect();

    HttpResponse::Ok().json(HomeView { links })
}

/// GET /place-order
#[utoipa::path(
    get,
    path = "/place-order",
    responses((status = 200, description = "Sizes and unit prices", body = PlaceOrderFormView)),
    tag = "orders"
)]
pub async fn place_order_form() -> HttpResponse {
    let sizes = pricing::price_list()
        .into_iter()
        .map(|(size, price)| SizePriceView {
            size,
            unit_price: format_amount(&price),
        })
        .collect();

    HttpResponse::Ok().json(PlaceOrderFormView { sizes })
}

/// POST /place-order
///
/// Prices the order and stores it. The row insert and the order code
/// assignment happen in one transaction, so a failed placement leaves nothing
/// behind.
#[utoipa::path(
    post,
    path = "/place-order",
    request_body(content = PlaceOrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Order placed", body = OrderView),
        (status = 400, description = "Invalid size, quantity or contact"),
        (status = 500, description = "Could not place order"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: web::Data<AppService>,
    form: web::Form<PlaceOrderForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let quantity = parse_quantity(&form.qty)?;

    let order = web::block(move || service.place_order(&form.contact, &form.size, quantity))
        .await
        .map_err(|e| AppError::PlacementFailed(e.to_string()))?
        .map_err(AppError::placement)?;

    Ok(HttpResponse::Created().json(OrderView::from(order)))
}

/// GET /search-customer
#[utoipa::path(
    get,
    path = "/search-customer",
    responses((status = 200, description = "Search form", body = FormView)),
    tag = "orders"
)]
pub async fn search_customer_form() -> HttpResponse {
    HttpResponse::Ok().json(FormView::new("/search-customer", "contact"))
}

/// POST /search-customer
#[utoipa::path(
    post,
    path = "/search-customer",
    request_body(content = CustomerSearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Orders of the customer, possibly none", body = CustomerOrdersView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn search_customer(
    service: web::Data<AppService>,
    form: web::Form<CustomerSearchForm>,
) -> Result<HttpResponse, AppError> {
    let customer_id = form.into_inner().contact;

    let lookup = customer_id.clone();
    let orders = web::block(move || service.find_by_customer(&lookup)).await??;

    Ok(HttpResponse::Ok().json(CustomerOrdersView {
        customer_id,
        orders: order_views(orders),
    }))
}

/// GET /search-order
#[utoipa::path(
    get,
    path = "/search-order",
    responses((status = 200, description = "Search form", body = FormView)),
    tag = "orders"
)]
pub async fn search_order_form() -> HttpResponse {
    HttpResponse::Ok().json(FormView::new("/search-order", "orderid"))
}

/// POST /search-order
#[utoipa::path(
    post,
    path = "/search-order",
    request_body(content = OrderCodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The order, or an order_not_found notice", body = OrderView),
        (status = 400, description = "Order code missing"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn search_order(
    service: web::Data<AppService>,
    form: web::Form<OrderCodeForm>,
) -> Result<HttpResponse, AppError> {
    let code = form.into_inner().orderid.trim().to_string();

    let lookup = code.clone();
    match web::block(move || service.find_by_code(&lookup)).await? {
        Ok(order) => Ok(HttpResponse::Ok().json(OrderView::from(order))),
        Err(DomainError::NotFound) => Ok(HttpResponse::Ok().json(NoticeView::order_not_found(&code))),
        Err(e) => Err(e.into()),
    }
}

/// GET /reports
#[utoipa::path(
    get,
    path = "/reports",
    responses(
        (status = 200, description = "All orders newest first, with count and sum", body = ReportView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn reports(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let report = web::block(move || service.report()).await??;

    Ok(HttpResponse::Ok().json(ReportView::from(report)))
}

async fn order_selection(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_orders()).await??;

    Ok(HttpResponse::Ok().json(OrderListView {
        orders: order_views(orders),
    }))
}

/// GET /change-status
#[utoipa::path(
    get,
    path = "/change-status",
    responses(
        (status = 200, description = "Orders to choose from, newest first", body = OrderListView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn change_status_form(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    order_selection(service).await
}

/// POST /change-status
#[utoipa::path(
    post,
    path = "/change-status",
    request_body(content = OrderCodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Updated order, or a status_error notice", body = StatusUpdatedView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn change_status(
    service: web::Data<AppService>,
    form: web::Form<OrderCodeForm>,
) -> Result<HttpResponse, AppError> {
    let code = form.into_inner().orderid.trim().to_string();

    match web::block(move || service.advance_status(&code)).await? {
        Ok(order) => Ok(HttpResponse::Ok().json(StatusUpdatedView {
            order: order.into(),
        })),
        Err(
            e @ (DomainError::NotFound
            | DomainError::NoTransitionAvailable(_)
            | DomainError::ConcurrentModification(_)),
        ) => Ok(HttpResponse::Ok().json(NoticeView::status_error(&e))),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete-order
#[utoipa::path(
    get,
    path = "/delete-order",
    responses(
        (status = 200, description = "Orders to choose from, newest first", body = OrderListView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order_form(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    order_selection(service).await
}

/// POST /delete-order
#[utoipa::path(
    post,
    path = "/delete-order",
    request_body(content = OrderCodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Deleted, or an order_not_found notice", body = OrderDeletedView),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<AppService>,
    form: web::Form<OrderCodeForm>,
) -> Result<HttpResponse, AppError> {
    let code = form.into_inner().orderid.trim().to_string();

    let target = code.clone();
    match web::block(move || service.delete_order(&target)).await? {
        Ok(()) => Ok(HttpResponse::Ok().json(OrderDeletedView { order_code: code })),
        Err(DomainError::NotFound) => Ok(HttpResponse::Ok().json(NoticeView::order_not_found(&code))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount(&BigDecimal::from(2700)), "2700.00");
        assert_eq!(format_amount(&BigDecimal::from(0)), "0.00");
    }

    #[test]
    fn quantity_must_be_numeric() {
        assert_eq!(parse_quantity(" 3 ").expect("numeric"), 3);
        assert!(matches!(parse_quantity("three"), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(parse_quantity(""), Err(DomainError::InvalidQuantity(_))));
    }
}
