//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    entry::{create_record_endpoint, get_category_options, get_new_record_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    summary::get_summary,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_record_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::CATEGORY_OPTIONS, get(get_category_options))
        .route(endpoints::RECORDS_API, post(create_record_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::{AppState, CsvStore, endpoints, routing::build_router, test_utils::TempFile};

    fn get_test_server(file: &TempFile) -> TestServer {
        let state = AppState::new(CsvStore::new(file.path()), "Etc/UTC")
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server")
    }

    #[tokio::test]
    async fn posted_record_shows_up_in_summary_and_dashboard() {
        let file = TempFile::new("router.csv");
        let server = get_test_server(&file);

        server
            .post(endpoints::RECORDS_API)
            .form(&[
                ("date", "2024-01-01"),
                ("item", "coffee"),
                ("kind", "Expense"),
                ("category", "Food"),
                ("amount", "50.00"),
            ])
            .await
            .assert_status_see_other();
        server
            .post(endpoints::RECORDS_API)
            .form(&[
                ("date", "2024-01-01"),
                ("item", "salary"),
                ("kind", "Income"),
                ("category", "Salary"),
                ("amount", "1000.00"),
            ])
            .await
            .assert_status_see_other();

        let summary: Value = server.get(endpoints::SUMMARY_API).await.json();
        assert_eq!(summary["total_income"], "1000.00");
        assert_eq!(summary["total_expense"], "50.00");
        assert_eq!(summary["balance"], "950.00");
        assert_eq!(summary["expense_by_category"]["Food"], "50.00");

        let dashboard = server.get(endpoints::DASHBOARD_VIEW).await;
        dashboard.assert_status_ok();
        assert!(dashboard.text().contains("฿950.00"));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_without_writing() {
        let file = TempFile::new("router_negative.csv");
        let server = get_test_server(&file);

        server
            .post(endpoints::RECORDS_API)
            .form(&[
                ("date", "2024-01-01"),
                ("item", "refund"),
                ("kind", "Expense"),
                ("category", "Other"),
                ("amount", "-5"),
            ])
            .await
            .assert_status_bad_request();

        assert!(!file.path().exists());
    }

    #[tokio::test]
    async fn category_options_follow_kind() {
        let file = TempFile::new("router_categories.csv");
        let server = get_test_server(&file);

        let response = server
            .get(endpoints::CATEGORY_OPTIONS)
            .add_query_param("kind", "Income")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Salary"));
        assert!(!text.contains("Transport"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let file = TempFile::new("router_404.csv");
        let server = get_test_server(&file);

        server
            .get("/no/such/page")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_served() {
        let file = TempFile::new("router_error.csv");
        let server = get_test_server(&file);

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
