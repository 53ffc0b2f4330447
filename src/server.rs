use axum::{routing::post, Json, Router};
use serde::Deserialize;

use crate::data::{TimetableInput, TimetableOutput};
use crate::overrides::{self, ManualOverride};
use crate::solver;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(flatten)]
    input: TimetableInput,
    #[serde(default)]
    overrides: Vec<ManualOverride>,
}

async fn generate_handler(
    Json(request): Json<GenerateRequest>,
) -> Result<Json<TimetableOutput>, (axum::http::StatusCode, String)> {
    if let Err(e) = validate(&request.input) {
        return Err((axum::http::StatusCode::BAD_REQUEST, e));
    }
    let mut output = solver::generate(&request.input);
    overrides::apply(&mut output, &request.overrides);
    Ok(Json(output))
}

// The solver assumes validated input, so the rejection happens here.
fn validate(input: &TimetableInput) -> Result<(), String> {
    if input.class_count == 0 {
        return Err("classCount must be at least 1".to_string());
    }
    if input.sections.is_empty() {
        return Err("at least one section label is required".to_string());
    }
    if input.sections.iter().any(|s| s.trim().is_empty()) {
        return Err("section labels must be non-empty".to_string());
    }
    if input.subject_quotas.len() != input.class_count as usize {
        return Err(format!(
            "expected {} subject quota maps, got {}",
            input.class_count,
            input.subject_quotas.len()
        ));
    }
    for (i, quotas) in input.subject_quotas.iter().enumerate() {
        if quotas.is_empty() {
            return Err(format!("no subjects provided for grade {}", i + 1));
        }
        for (subject, &count) in quotas {
            if subject.trim().is_empty() {
                return Err(format!("empty subject name for grade {}", i + 1));
            }
            if count == 0 {
                return Err(format!(
                    "subject '{}' for grade {} must require at least one period",
                    subject,
                    i + 1
                ));
            }
        }
    }
    if input.teacher_qualifications.is_empty() {
        return Err("no teachers provided".to_string());
    }
    for (teacher, subjects) in &input.teacher_qualifications {
        if teacher.trim().is_empty() {
            return Err("teacher names must be non-empty".to_string());
        }
        if subjects.is_empty() {
            return Err(format!("no subjects provided for teacher '{teacher}'"));
        }
    }
    Ok(())
}

pub async fn run_server() {
    let app = Router::new().route("/v1/timetable/generate", post(generate_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
