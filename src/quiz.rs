//! Quiz question selection.
//!
//! A draw picks uniformly among the candidates the player has not seen yet.
//! The unseen set is built once per call, so selection never loops.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::queries::categories::find_category_by_type;
use crate::db::queries::questions::list_questions;
use crate::db::{Question, QuestionFilter};

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("no category named '{0}'")]
    CategoryNotFound(String),
    #[error("no unseen questions left")]
    Exhausted,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Questions eligible for a draw: the named category's questions, or all of them.
pub async fn candidate_pool(
    pool: &SqlitePool,
    category: Option<&str>,
) -> Result<Vec<Question>, QuizError> {
    let filter = match category {
        Some(name) => {
            let category = find_category_by_type(pool, name)
                .await?
                .ok_or_else(|| QuizError::CategoryNotFound(name.to_owned()))?;
            QuestionFilter::Category(category.id)
        }
        None => QuestionFilter::All,
    };
    Ok(list_questions(pool, &filter).await?.questions)
}

/// Picks one candidate whose id is not in `previous`.
pub fn select_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Result<Question, QuizError> {
    let unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();
    unseen.choose(rng).cloned().ok_or(QuizError::Exhausted)
}

pub async fn next_quiz_question<R: Rng + Send + ?Sized>(
    pool: &SqlitePool,
    category: Option<&str>,
    previous: &[i64],
    rng: &mut R,
) -> Result<Question, QuizError> {
    let candidates = candidate_pool(pool, category).await?;
    let previous: HashSet<i64> = previous.iter().copied().collect();
    select_unseen(candidates, &previous, rng)
}
