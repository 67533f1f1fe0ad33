use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::list_questions,
        },
        Category, Question, QuestionFilter,
    },
    pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE},
    server::{app::AppState, error::ApiError, extract::AppPath},
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    total_categories: usize,
    categories: Vec<Category>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

#[instrument(skip(pool))]
async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

// an existing category without questions is an empty page, not a 404
#[instrument(skip(pool))]
async fn category_questions(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let category = get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;
    let listing = list_questions(&pool, &QuestionFilter::Category(category.id)).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: paginate(page, QUESTIONS_PER_PAGE, listing.questions),
        total_questions: listing.total,
        current_category: category.id,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
}
