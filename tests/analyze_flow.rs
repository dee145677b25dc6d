use analyze_form::config::{ClientConfig, OutputConfig};
use analyze_form::form::fields::FormFields;
use analyze_form::form::FormController;
use analyze_form::models::UiState;
use analyze_form::render::{ConsoleView, FileWindowOpener};
use analyze_form::transport::HttpTransport;
use axum::{routing::post, Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_analysis_server() -> anyhow::Result<String> {
    // SAFETY: tests in this binary only ever write this one value.
    unsafe { std::env::set_var("NO_PROXY", "127.0.0.1,localhost") };
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    // Echoes the ticker back as the document; "ZZZZ" is rejected.
    let app = Router::new().route(
        "/analyze",
        post(|Json(body): Json<Value>| async move {
            let ticker = body["ticker"].as_str().unwrap_or_default().to_string();
            if ticker == "ZZZZ" {
                Json(json!({ "success": false, "error": "Invalid ticker" }))
            } else {
                Json(json!({
                    "success": true,
                    "html": format!("<h1>{ticker} {}</h1>", body["endDate"]),
                }))
            }
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn form_for(
    base_url: String,
    out: &Path,
) -> FormController<ConsoleView<Vec<u8>>, FileWindowOpener> {
    let client = ClientConfig {
        base_url,
        ..ClientConfig::default()
    };
    let output = OutputConfig {
        dir: out.to_path_buf(),
        allow_windows: true,
    };
    let mut form = FormController::new(
        FormFields::new(50, 10),
        ConsoleView::new(Vec::new()),
        FileWindowOpener::new(&output),
        Arc::new(HttpTransport::new(&client).expect("transport")),
    );
    form.on_load(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
    form
}

#[tokio::test]
async fn successful_analysis_is_written_to_a_new_document() {
    let url = spawn_analysis_server().await.expect("spawn server");
    let tmp = tempfile::tempdir().unwrap();
    let mut form = form_for(url, tmp.path());
    form.fields_mut().on_ticker_input("aapl");

    form.submit().await.expect("submit");

    let opened = form.opener().opened();
    assert_eq!(opened.len(), 1);
    let name = opened[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("AAPL-"), "{name}");
    let doc = std::fs::read_to_string(&opened[0]).unwrap();
    assert_eq!(doc, "<h1>AAPL \"2024-05-17\"</h1>");
    assert_eq!(form.state(), &UiState::Idle);
    assert!(form.view().submit_enabled());
    assert!(!form.view().loading_visible());
    assert_eq!(form.view().error(), None);
}

#[tokio::test]
async fn rejected_analysis_shows_error_and_writes_nothing() {
    let url = spawn_analysis_server().await.expect("spawn server");
    let tmp = tempfile::tempdir().unwrap();
    let mut form = form_for(url, tmp.path());
    form.fields_mut().on_ticker_input("zzzz");

    form.submit().await.unwrap_err();

    assert!(form.opener().opened().is_empty());
    assert_eq!(form.view().error(), Some("Invalid ticker"));
    assert!(form.view().submit_enabled());
    assert_eq!(form.state().error_message(), Some("Invalid ticker"));

    // The form stays usable after a failure.
    form.fields_mut().on_ticker_input("msft");
    form.fields_mut().on_end_date_input("");
    form.submit().await.expect("second submit");
    let doc = std::fs::read_to_string(&form.opener().opened()[0]).unwrap();
    assert_eq!(doc, "<h1>MSFT null</h1>");
    assert_eq!(form.view().error(), None);
}
