use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    All,
    Category(i64),
    /// Case-insensitive literal substring of the question text.
    Search(String),
}

/// Matching questions ordered by id, with the count taken before any paging.
#[derive(Debug, Clone)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total: usize,
}

impl From<Vec<Question>> for QuestionListing {
    fn from(questions: Vec<Question>) -> Self {
        let total = questions.len();
        Self { questions, total }
    }
}

pub async fn list_questions(
    pool: &SqlitePool,
    filter: &QuestionFilter,
) -> sqlx::Result<QuestionListing> {
    let questions = match filter {
        QuestionFilter::All => get_all_questions(pool).await?,
        QuestionFilter::Category(category) => {
            sqlx::query_as::<_, Question>(
                r#"
                SELECT id, question, answer, category, difficulty
                FROM questions
                WHERE questions.category = ?1
                ORDER BY id
                "#,
            )
            .bind(*category)
            .fetch_all(pool)
            .await?
        }
        // sqlite's lower() only folds ASCII, so matching happens here
        QuestionFilter::Search(term) => {
            let needle = term.to_lowercase();
            get_all_questions(pool)
                .await?
                .into_iter()
                .filter(|q| q.question.to_lowercase().contains(&needle))
                .collect()
        }
    };
    Ok(questions.into())
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns `false` when no question had this id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
