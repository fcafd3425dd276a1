//! Integration tests for PDF and CSV reports

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 9, 9, 9];

#[tokio::test]
async fn test_pdf_report() {
    let app = TestApp::with_ai();
    let (_, token) = app.register_user().await;

    app.script()
        .push(r#"{"foodName": "Oatmeal 🥣", "calories": 300, "protein": 10}"#);
    let (status, _) = app
        .upload("/api/food/analyze", &token, "image", "image/png", PNG)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app
        .post(
            "/api/meal-plans",
            &json!({"dietType": "high-protein", "mealsPerDay": 3}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, content_type, bytes) = app.get_bytes("/api/reports/pdf", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_pdf_report_for_new_user() {
    let app = TestApp::new();
    let (_, token) = app.register_user().await;

    let (status, _, bytes) = app.get_bytes("/api/reports/pdf", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_food_history_csv_oldest_first() {
    let app = TestApp::with_ai();
    let (_, token) = app.register_user().await;

    for food in ["Porridge", "Chicken, rice and beans"] {
        app.script()
            .push(&json!({"foodName": food, "calories": 400, "protein": "20g"}).to_string());
        let (status, _) = app
            .upload("/api/food/analyze", &token, "image", "image/png", PNG)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, content_type, bytes) = app
        .get_bytes("/api/reports/food-history.csv", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "text/csv");

    let csv = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "date,food,calories,protein_g,carbs_g,fats_g,fiber_g,sugar_g"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Porridge"));
    // Commas in names are quoted
    assert!(lines[2].contains("\"Chicken, rice and beans\""));
}
