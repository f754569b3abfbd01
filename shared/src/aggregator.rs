//! Risk aggregation
//!
//! Each factor adds its tier weight to a raw score. A critical factor lifts
//! the score to at least [`CRITICAL_SCORE_FLOOR`], which sits inside the
//! critical band of [`RISK_TABLE`], so one critical factor always makes the
//! overall risk critical. The score is capped at [`MAX_RISK_SCORE`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{FactorKind, RiskAnalysis, RiskFactor, Severity};
use crate::thresholds::{CRITICAL_SCORE_FLOOR, MAX_RISK_SCORE, RISK_TABLE};
use crate::types::LocalizedText;

/// Aggregate score (0-100) for a set of factors
pub fn risk_score(factors: &[RiskFactor]) -> u8 {
    let raw: u32 = factors.iter().map(|f| f.severity.weight()).sum();
    let floor = if factors.iter().any(|f| f.severity == Severity::Critical) {
        CRITICAL_SCORE_FLOOR
    } else {
        0
    };
    // capped at 100, always fits
    raw.max(floor).min(MAX_RISK_SCORE) as u8
}

/// Overall risk level for a score
pub fn overall_risk(score: u8) -> Severity {
    RISK_TABLE.classify_value(Decimal::from(score))
}

pub fn aggregate(factors: &[RiskFactor]) -> RiskAnalysis {
    aggregate_at(factors, Utc::now())
}

/// Deterministic form of [`aggregate`] with an explicit timestamp
pub fn aggregate_at(factors: &[RiskFactor], timestamp: DateTime<Utc>) -> RiskAnalysis {
    let score = risk_score(factors);
    let advice = recommendations(factors);

    RiskAnalysis {
        overall_risk: overall_risk(score),
        risk_score: score,
        factors: factors.to_vec(),
        recommendations: advice.iter().map(|t| t.en.to_string()).collect(),
        recommendations_pt: advice.iter().map(|t| t.pt.to_string()).collect(),
        timestamp,
    }
}

// ============================================================================
// Recommendations
// ============================================================================

/// Advice for factors of severity moderate and above, most severe first.
///
/// Ties keep the input order. Identical advice is listed once.
pub fn recommendations(factors: &[RiskFactor]) -> Vec<LocalizedText> {
    let mut relevant: Vec<&RiskFactor> = factors
        .iter()
        .filter(|f| f.severity >= Severity::Moderate)
        .collect();
    relevant.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut advice: Vec<LocalizedText> = Vec::new();
    for factor in relevant {
        if let Some(text) = advice_for(factor.kind, factor.severity) {
            if !advice.contains(&text) {
                advice.push(text);
            }
        }
    }
    advice
}

fn advice_for(kind: FactorKind, severity: Severity) -> Option<LocalizedText> {
    use FactorKind::*;
    use Severity::*;

    let text = match (kind, severity) {
        (_, Low) => return None,

        (Temperature, Moderate) => LocalizedText::new(
            "Stay hydrated and take breaks from the sun",
            "Mantenha-se hidratado e faça pausas do sol",
        ),
        (Temperature, High) => LocalizedText::new(
            "Drink water often and avoid prolonged sun exposure",
            "Hidrate-se frequentemente e evite exposição prolongada ao sol",
        ),
        (Temperature, Critical) => LocalizedText::new(
            "Extreme heat: stay in a cool place during peak hours and watch for signs of heatstroke",
            "Calor extremo: permaneça em local fresco nos horários de pico e atenção a sinais de insolação",
        ),

        (Humidity, Moderate) => LocalizedText::new(
            "Humidity is elevated; keep rooms ventilated",
            "Umidade elevada; mantenha os ambientes ventilados",
        ),
        (Humidity, High | Critical) => LocalizedText::new(
            "Monitor respiratory symptoms and use a dehumidifier if possible",
            "Monitore sintomas respiratórios e use desumidificador se possível",
        ),

        (Pressure, Moderate) => LocalizedText::new(
            "Sensitive people may get headaches; monitor symptoms",
            "Pessoas sensíveis podem sentir dores de cabeça - monitore sintomas",
        ),
        (Pressure, High | Critical) => LocalizedText::new(
            "Sensitive people may get strong migraines; seek medical help if needed",
            "Pessoas sensíveis podem ter enxaquecas fortes - procure ajuda médica se necessário",
        ),

        (Wind, Moderate) => LocalizedText::new(
            "Take care when walking outside and with light objects",
            "Cuidado ao andar na rua e com objetos leves",
        ),
        (Wind, High | Critical) => LocalizedText::new(
            "Watch for loose objects and avoid areas with trees",
            "Cuidado com objetos soltos. Evite áreas com árvores",
        ),

        (Cold, _) => LocalizedText::new(
            "Intense cold: wear suitable clothing and protect your extremities",
            "Frio Intenso: Vista roupas adequadas e proteja extremidades do corpo",
        ),
        (DryAir, _) => LocalizedText::new(
            "Dry air: drink water often and keep eyes and airways moist",
            "Ar seco: beba água com frequência e mantenha olhos e vias respiratórias hidratados",
        ),

        (UvIndex, Moderate) => LocalizedText::new(
            "Use SPF 30+ sunscreen and sunglasses",
            "Use protetor solar FPS 30+ e óculos de sol",
        ),
        (UvIndex, High | Critical) => LocalizedText::new(
            "Use SPF 50+ sunscreen, a hat and sunglasses. Avoid the sun from 10am to 4pm",
            "Use protetor solar FPS 50+, chapéu e óculos de sol. Evite sol das 10h-16h",
        ),

        (AirQuality, Moderate) => LocalizedText::new(
            "Avoid intense outdoor exercise and wear a mask if needed",
            "Evite exercícios intensos ao ar livre e use máscara se necessário",
        ),
        (AirQuality, High | Critical) => LocalizedText::new(
            "Avoid outdoor activities and wear an N95 mask",
            "Evite atividades ao ar livre e use máscara N95",
        ),

        (Symptom, Moderate) => LocalizedText::new(
            "Monitor your symptoms over the next days",
            "Monitore seus sintomas nos próximos dias",
        ),
        (Symptom, High) => LocalizedText::new(
            "Consider scheduling a medical appointment",
            "Considere agendar uma consulta médica",
        ),
        (Symptom, Critical) => LocalizedText::new(
            "Seek medical attention",
            "Procure atendimento médico",
        ),
    };
    Some(text)
}
