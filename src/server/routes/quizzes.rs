use axum::{extract::State, routing::post, Json, Router};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    db::Question,
    quiz::next_quiz_question,
    server::{app::AppState, deserializers::deserialize_optional_name, extract::AppJson},
    telemetry::QUIZ_DRAWS,
};

use super::ApiResponse;

#[derive(Debug, Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    /// Category type name; absent or empty means every category.
    #[serde(default, deserialize_with = "deserialize_optional_name")]
    quiz_category: Option<String>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
}

#[instrument(skip(pool))]
async fn next_question(
    State(pool): State<SqlitePool>,
    AppJson(request): AppJson<QuizRequest>,
) -> ApiResponse<QuizQuestion> {
    let mut rng = StdRng::from_entropy();
    let question = next_quiz_question(
        &pool,
        request.quiz_category.as_deref(),
        &request.previous_questions,
        &mut rng,
    )
    .await?;
    QUIZ_DRAWS.with_label_values(&["served"]).inc();

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
