use utoipa::OpenApi;

use crate::domain::order::Size;
use crate::domain::workflow::OrderStatus;
use crate::handlers::orders;

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::home,
        orders::place_order_form,
        orders::place_order,
        orders::search_customer_form,
        orders::search_customer,
        orders::search_order_form,
        orders::search_order,
        orders::reports,
        orders::change_status_form,
        orders::change_status,
        orders::delete_order_form,
        orders::delete_order,
    ),
    components(schemas(
        Size,
        OrderStatus,
        orders::PlaceOrderForm,
        orders::CustomerSearchForm,
        orders::OrderCodeForm,
        orders::OrderView,
        orders::HomeView,
        orders::LinkView,
        orders::PlaceOrderFormView,
        orders::SizePriceView,
        orders::FormView,
        orders::CustomerOrdersView,
        orders::OrderListView,
        orders::ReportView,
        orders::StatusUpdatedView,
        orders::OrderDeletedView,
        orders::NoticeView,
    )),
    tags((name = "orders", description = "Order placement, lookup, workflow and reports"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/place-order",
            "/search-customer",
            "/search-order",
            "/reports",
            "/change-status",
            "/delete-order",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
