use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        Category, NewQuestion, Question, QuestionFilter,
    },
    pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE},
    server::{
        app::AppState,
        error::ApiError,
        extract::{AppJson, AppPath},
    },
};

use super::ApiResponse;

// the add form posts category and difficulty as strings
#[derive(Debug, Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

impl TryFrom<CreateQuestion> for NewQuestion {
    type Error = ApiError;

    fn try_from(body: CreateQuestion) -> Result<Self, Self::Error> {
        if body.question.trim().is_empty() || body.answer.trim().is_empty() {
            return Err(ApiError::BadRequest);
        }
        Ok(NewQuestion {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBody {
    search_term: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    // key spelling is part of the wire format the frontend reads
    #[serde(rename = "curentCategory")]
    current_category: Option<i64>,
}

#[instrument(skip(pool))]
async fn questions_page(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let listing = questions::list_questions(&pool, &QuestionFilter::All).await?;
    let page_questions = paginate(page, QUESTIONS_PER_PAGE, listing.questions);
    let categories = get_all_categories(&pool).await?;

    if page_questions.is_empty() || categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: page_questions,
        total_questions: listing.total,
        categories,
    }))
}

#[instrument(skip(pool))]
async fn delete_question(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> ApiResponse<Deleted> {
    if !questions::delete_question(&pool, id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

#[instrument(skip(pool))]
async fn create_question(
    State(pool): State<SqlitePool>,
    AppJson(body): AppJson<CreateQuestion>,
) -> ApiResponse<Created> {
    let new_question = NewQuestion::try_from(body)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::bad_input)?;
    tracing::info!("Created question {id} in category {}", new_question.category);
    Ok(Json(Created { success: true }))
}

#[instrument(skip(pool))]
async fn search_questions(
    State(pool): State<SqlitePool>,
    AppJson(SearchBody { search_term }): AppJson<SearchBody>,
) -> ApiResponse<SearchResults> {
    let listing = questions::list_questions(&pool, &QuestionFilter::Search(search_term))
        .await
        .map_err(ApiError::bad_input)?;
    Ok(Json(SearchResults {
        success: true,
        questions: listing.questions,
        total_questions: listing.total,
        current_category: None,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/result", post(search_questions))
}
