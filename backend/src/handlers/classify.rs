//! Single-value classification endpoint

use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{classify, Category, Language, MetricId};

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub metric: String,
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub metric: MetricId,
    pub category: Category,
    pub rank: Option<u8>,
    pub label_en: &'static str,
    pub label_pt: &'static str,
}

pub async fn classify_value(Json(request): Json<ClassifyRequest>) -> AppResult<Json<ClassifyResponse>> {
    let metric: MetricId = request.metric.trim().parse().map_err(|_| {
        AppError::validation(
            "metric",
            &format!("Unknown metric '{}'", request.metric),
            &format!("Métrica desconhecida '{}'", request.metric),
        )
    })?;

    let category = classify(metric, request.value);

    Ok(Json(ClassifyResponse {
        metric,
        category,
        rank: category.rank(),
        label_en: category.label(Language::English),
        label_pt: category.label(Language::Portuguese),
    }))
}
