//! Resume scoring: document text and requested criteria in, one score per criterion out.
//!
//! The reply must be a JSON object keyed by criterion. Anything that does not
//! decode is a `ModelProcessing` error; there is no all-zero fallback.
//! Keys are matched exactly first, then ignoring case and surrounding
//! whitespace. Omitted criteria score 0 and out-of-range values are clamped.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::ModelClient;
use crate::scoring::prompts::{score_prompt, SCORE_SYSTEM};

pub const MIN_SCORE: u32 = 0;
pub const MAX_SCORE: u32 = 5;

/// Criterion → score for one document, in the order the criteria were requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    scores: Vec<(String, u32)>,
}

impl ScoreMap {
    pub fn get(&self, criterion: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(name, _)| name == criterion)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, score)| score).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

pub async fn score_document(
    text: &str,
    criteria: &[String],
    model: &dyn ModelClient,
) -> Result<ScoreMap, AppError> {
    let reply = model
        .complete_json(SCORE_SYSTEM, &score_prompt(text, criteria))
        .await
        .map_err(|e| AppError::ModelProcessing(format!("Failed to score resume: {e}")))?;

    parse_scores(&reply, criteria)
}

fn parse_scores(reply: &str, criteria: &[String]) -> Result<ScoreMap, AppError> {
    let object: Map<String, Value> = serde_json::from_str(reply)
        .map_err(|e| AppError::ModelProcessing(format!("Failed to score resume: {e}")))?;

    let mut scores = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        let Some(value) = lookup(&object, criterion) else {
            warn!(criterion = %criterion, "Model omitted criterion; scoring 0");
            scores.push((criterion.clone(), MIN_SCORE));
            continue;
        };

        let raw = coerce_score(value).ok_or_else(|| {
            AppError::ModelProcessing(format!(
                "Failed to score resume: non-integer score {value} for '{criterion}'"
            ))
        })?;

        let clamped = raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32;
        if clamped as i64 != raw {
            warn!(criterion = %criterion, raw, clamped, "Score outside 0-5; clamped");
        }
        scores.push((criterion.clone(), clamped));
    }

    let unexpected = object
        .keys()
        .filter(|key| !criteria.iter().any(|c| same_criterion(c, key)))
        .count();
    if unexpected > 0 {
        debug!(unexpected, "Ignored scores for criteria that were not requested");
    }

    Ok(ScoreMap { scores })
}

fn lookup<'a>(object: &'a Map<String, Value>, criterion: &str) -> Option<&'a Value> {
    object.get(criterion).or_else(|| {
        object
            .iter()
            .find(|(key, _)| same_criterion(criterion, key))
            .map(|(_, value)| value)
    })
}

fn same_criterion(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Integers pass through, fractions truncate, numeric strings parse.
fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}
