#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{
        ApiResponse, BoxPlotStats, CallbackRequest, CallbackResponse, ComponentId, DropdownOption,
        Figure, MonthIndexDto, PageLayout, Property, SelectionState,
    };

    fn server() -> TestServer {
        TestServer::new(setup_test_app()).unwrap()
    }

    fn point_count(figure: &Figure) -> usize {
        figure
            .data
            .iter()
            .map(|trace| trace["y"].as_array().map(Vec::len).unwrap_or(0))
            .sum()
    }

    fn values(options: &[DropdownOption]) -> Vec<&str> {
        options.iter().map(|option| option.value.as_str()).collect()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = server();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.months, 5);
        assert_eq!(body.historical_rows, 15);
        assert_eq!(body.forecast_rows, 9);
        assert_eq!(body.display_rows, 26);
    }

    #[tokio::test]
    async fn test_layout_defaults() {
        let server = server();

        let response = server.get("/api/v1/layout").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<PageLayout> = response.json();
        assert!(body.success);
        let layout = body.data;
        assert_eq!(layout.text.header, "Kaggle: GoDaddy Microbusiness Growth forecasts");
        assert_eq!(layout.slider.max, 4);
        assert_eq!(layout.slider.value, 4);
        assert_eq!(layout.state_dropdown.value.as_deref(), Some("California"));
        assert_eq!(layout.county_dropdown.value.as_deref(), Some("Calaveras County"));
        assert_eq!(
            layout.graphs,
            vec![ComponentId::BoxPlot, ComponentId::StateChart, ComponentId::CountyChart]
        );
    }

    #[tokio::test]
    async fn test_months_carry_tick_labels() {
        let server = server();

        let response = server.get("/api/v1/months").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<MonthIndexDto> = response.json();
        let labels: Vec<Option<&str>> = body
            .data
            .months
            .iter()
            .map(|entry| entry.label.as_deref())
            .collect();
        assert_eq!(
            labels,
            vec![Some("2022-08-01"), Some("2022-09-01"), None, None, Some("2022-12-01")]
        );
    }

    #[tokio::test]
    async fn test_states_in_first_seen_order() {
        let server = server();

        let response = server.get("/api/v1/states").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<DropdownOption>> = response.json();
        assert_eq!(values(&body.data), vec!["Alabama", "California"]);
    }

    #[tokio::test]
    async fn test_counties_of_state() {
        let server = server();

        let response = server
            .get("/api/v1/counties")
            .add_query_param("state", "California")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<DropdownOption>> = response.json();
        assert_eq!(values(&body.data), vec!["Alameda County", "Calaveras County"]);
    }

    #[tokio::test]
    async fn test_counties_of_unknown_state_are_empty() {
        let server = server();

        let response = server
            .get("/api/v1/counties")
            .add_query_param("state", "Wyoming")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<DropdownOption>> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_box_plot_per_position() {
        let server = server();

        let first = server
            .get("/api/v1/charts/boxplot")
            .add_query_param("position", 0)
            .await;
        first.assert_status(StatusCode::OK);
        let first: ApiResponse<Figure> = first.json();
        assert_eq!(point_count(&first.data), 3);

        let last = server
            .get("/api/v1/charts/boxplot")
            .add_query_param("position", 4)
            .await;
        last.assert_status(StatusCode::OK);
        let last: ApiResponse<Figure> = last.json();
        assert_eq!(point_count(&last.data), 4);
        assert_eq!(last.data.trace_names(), vec!["Alabama", "California", "Wyoming"]);
    }

    #[tokio::test]
    async fn test_box_plot_out_of_range() {
        let server = server();

        let response = server
            .get("/api/v1/charts/boxplot")
            .add_query_param("position", 5)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_box_plot_stats() {
        let server = server();

        let response = server
            .get("/api/v1/stats/boxplot")
            .add_query_param("position", 4)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<BoxPlotStats> = response.json();
        let counts: Vec<(&str, usize)> = body
            .data
            .regions
            .iter()
            .map(|summary| (summary.region.as_str(), summary.count))
            .collect();
        assert_eq!(counts, vec![("Alabama", 1), ("California", 2), ("Wyoming", 1)]);
    }

    #[tokio::test]
    async fn test_state_chart() {
        let server = server();

        let response = server
            .get("/api/v1/charts/state")
            .add_query_param("state", "California")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        assert_eq!(body.data.trace_count(), 4);
        assert_eq!(
            body.data.title(),
            Some("MBD forecast (2023) for state California")
        );
    }

    #[tokio::test]
    async fn test_county_chart() {
        let server = server();

        let response = server
            .get("/api/v1/charts/county")
            .add_query_param("state", "California")
            .add_query_param("county", "Calaveras County")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        assert_eq!(body.data.trace_names(), vec!["Observed", "Forecasted"]);
        assert_eq!(
            body.data.title(),
            Some("MBD forecast (2023) for Calaveras County")
        );
    }

    #[tokio::test]
    async fn test_county_chart_without_rows() {
        let server = server();

        let response = server
            .get("/api/v1/charts/county")
            .add_query_param("state", "Alabama")
            .add_query_param("county", "Calaveras County")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_callbacks_initial_load() {
        let server = server();
        let request = CallbackRequest {
            changed: None,
            selection: SelectionState {
                month_position: 4,
                state: Some("California".to_string()),
                county: Some("Calaveras County".to_string()),
            },
        };

        let response = server.post("/api/v1/callbacks").json(&request).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<CallbackResponse> = response.json();
        assert_eq!(body.data.updates.len(), 4);
        for id in [ComponentId::BoxPlot, ComponentId::StateChart, ComponentId::CountyChart] {
            assert!(body.data.update_for(id, Property::Figure).is_some());
        }
    }

    #[tokio::test]
    async fn test_callbacks_state_change_resets_county() {
        let server = server();
        let request = CallbackRequest {
            changed: Some(ComponentId::DropdownState),
            selection: SelectionState {
                month_position: 4,
                state: Some("Alabama".to_string()),
                county: Some("Calaveras County".to_string()),
            },
        };

        let response = server.post("/api/v1/callbacks").json(&request).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<CallbackResponse> = response.json();
        assert_eq!(body.data.selection.county.as_deref(), Some("Autauga County"));
        assert!(body.data.update_for(ComponentId::BoxPlot, Property::Figure).is_none());

        let options: Vec<DropdownOption> = serde_json::from_value(
            body.data
                .update_for(ComponentId::DropdownCounty, Property::Options)
                .unwrap()
                .value
                .clone(),
        )
        .unwrap();
        assert_eq!(values(&options), vec!["Autauga County"]);
    }

    #[tokio::test]
    async fn test_callbacks_reject_bad_position() {
        let server = server();
        let request = serde_json::json!({
            "changed": "slider-date",
            "selection": { "month_position": 9, "state": "California", "county": null }
        });

        let response = server.post("/api/v1/callbacks").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_page() {
        let server = server();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("<title>Kaggle: GoDaddy Microbusiness by ncozzi</title>"));
        assert!(html.contains("Box plot of MBD per date"));
        assert!(html.contains(r#"id="dd-output-cfips""#));
        assert!(html.contains("/api/v1/callbacks"));
    }

    #[tokio::test]
    async fn test_missing_state_is_json_bad_request() {
        let server = server();

        let response = server.get("/api/v1/counties").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "BAD_REQUEST");
        assert!(body.error.contains("state"));
    }

    #[tokio::test]
    async fn test_negative_position_is_json_bad_request() {
        let server = server();

        let response = server
            .get("/api/v1/charts/boxplot")
            .add_query_param("position", -1)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_callback_is_json_bad_request() {
        let server = server();

        let response = server
            .post("/api/v1/callbacks")
            .json(&serde_json::json!({ "changed": "no-such-component" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "BAD_REQUEST");
    }
}
