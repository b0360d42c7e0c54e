//! Pure projections from an analysis snapshot to display-ready values.
//!
//! Nothing here touches storage or the network, and nothing fails: an
//! absent snapshot projects to zeros and empty lists.

use itertools::Itertools;

use crate::snapshot::{AnalysisPayload, Recommendation};

/// Score below which a recommendation gets the subdued card styling.
const LOW_MATCH_THRESHOLD: u32 = 80;

const SKILL_GAP_LIMIT: usize = 10;

/// Clamp a raw match score to a whole percentage in `[0, 100]`.
/// Anything non-numeric reads as 0.
pub fn clamp_score(value: Option<f64>) -> u32 {
    let numeric = match value {
        Some(v) if v.is_finite() => v,
        _ => return 0,
    };
    numeric.round().clamp(0.0, 100.0) as u32
}

/// Percentage text: no decimals when integral, else two.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v.fract() == 0.0 {
                format!("{}", v as i64)
            } else {
                format!("{:.2}", v)
            }
        }
        _ => "0".to_owned(),
    }
}

/// Weight text: always two decimals, or a placeholder when missing.
pub fn format_weight(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "--".to_owned(),
    }
}

/// Everything the dashboard renders, derived in one place so the page
/// itself stays a thin view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub resume_score: i64,
    pub job_matches: usize,
    pub skills_mastered: usize,
    pub semantic_score: String,
    pub market_score: String,
    pub score_weights: String,
    pub job_matches_note: String,
    pub score_note: String,
    pub freshness: String,
}

impl DashboardMetrics {
    pub fn project(snapshot: Option<&AnalysisPayload>) -> Self {
        let payload = match snapshot {
            Some(payload) => payload,
            None => return Self::no_analysis(),
        };

        let recommendations = &payload.recommendations;
        let top = recommendations.first();

        let resume_score = top
            .and_then(|rec| rec.final_score)
            .filter(|score| score.is_finite())
            .map(|score| score.round() as i64)
            .unwrap_or(0);
        let job_matches = recommendations.len();
        let skills_mastered = payload
            .parsed_resume
            .technical_skills
            .values()
            .map(Vec::len)
            .sum();

        DashboardMetrics {
            resume_score,
            job_matches,
            skills_mastered,
            semantic_score: format!(
                "{}%",
                format_percent(top.and_then(|rec| rec.semantic_score))
            ),
            market_score: format!(
                "{}%",
                format_percent(top.and_then(|rec| rec.market_score))
            ),
            score_weights: format!(
                "{} / {}",
                format_weight(top.and_then(|rec| rec.semantic_weight)),
                format_weight(top.and_then(|rec| rec.market_weight))
            ),
            job_matches_note: format!(
                "Based on {} application{}",
                job_matches,
                if job_matches == 1 { "" } else { "s" }
            ),
            score_note: if resume_score >= 75 {
                "Strong baseline for target roles"
            } else {
                "Room to improve targeted role readiness"
            }
            .to_owned(),
            freshness: "Updated from latest resume analysis".to_owned(),
        }
    }

    fn no_analysis() -> Self {
        DashboardMetrics {
            resume_score: 0,
            job_matches: 0,
            skills_mastered: 0,
            semantic_score: "0%".to_owned(),
            market_score: "0%".to_owned(),
            score_weights: "--".to_owned(),
            job_matches_note: "Based on 0 applications".to_owned(),
            score_note: "Based on your latest analysis snapshot".to_owned(),
            freshness: "No recent analysis".to_owned(),
        }
    }
}

/// View model of one recommendation card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    pub title: String,
    pub company_label: String,
    pub score: u32,
    pub low: bool,
    pub skills_note: String,
}

pub fn project_cards(
    recommendations: &[Recommendation],
) -> Vec<RecommendationCard> {
    recommendations
        .iter()
        .map(|rec| {
            let score = clamp_score(rec.final_score);
            let top_missing = rec
                .missing_skills
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>();
            RecommendationCard {
                title: rec
                    .career_title
                    .clone()
                    .unwrap_or_else(|| "Career Match".to_owned()),
                company_label: company_label(rec),
                score,
                low: score < LOW_MATCH_THRESHOLD,
                skills_note: if top_missing.is_empty() {
                    "No major skill gaps".to_owned()
                } else {
                    top_missing.join(", ")
                },
            }
        })
        .collect()
}

/// Company line on a card: explicit location wins, then market demand,
/// then a generic label.
pub fn company_label(rec: &Recommendation) -> String {
    if let Some(location) = rec.company_location.as_deref() {
        if !location.is_empty() {
            return location.to_owned();
        }
    }
    match rec.job_count {
        Some(jobs) if jobs > 0 => format!("Market demand: {} jobs", jobs),
        _ => "AI matched role".to_owned(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGap {
    pub skill: String,
    pub count: usize,
}

/// Frequency-ranked union of missing skills across all recommendations.
/// Ties keep first-seen order; capped at the top ten.
pub fn rank_skill_gaps(recommendations: &[Recommendation]) -> Vec<SkillGap> {
    let mut ranked: Vec<SkillGap> = Vec::new();
    for rec in recommendations {
        for skill in &rec.missing_skills {
            let skill = skill.trim();
            if skill.is_empty() {
                continue;
            }
            match ranked.iter_mut().find(|gap| gap.skill == skill) {
                Some(gap) => gap.count += 1,
                None => ranked.push(SkillGap {
                    skill: skill.to_owned(),
                    count: 1,
                }),
            }
        }
    }
    // Stable sort: equal counts stay in encounter order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(SKILL_GAP_LIMIT);
    ranked
}

/// Three-tier narrative for the match detail modal.
pub fn match_insight(score: u32, gap_count: usize) -> String {
    if score >= 90 {
        "Strong fit. Update these skills quickly and apply first to \
         maximize response chances."
            .to_owned()
    } else if score >= 80 {
        format!(
            "Good fit. Close {} priority skill gap(s), then apply with \
             tailored resume keywords.",
            gap_count
        )
    } else {
        "Moderate fit. Improve listed skills first, then re-check your \
         resume match before applying."
            .to_owned()
    }
}

/// The three summary lines shown on the upload page once an analysis
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub background: String,
    pub top_match: String,
    pub improvements: String,
}

impl AnalysisSummary {
    pub fn project(payload: &AnalysisPayload) -> Self {
        let parsed = &payload.parsed_resume;
        let top = payload.recommendations.first();

        let degree = parsed.degree.as_deref().unwrap_or("Degree not detected");
        let domain = parsed.domain.as_deref().unwrap_or("domain unknown");
        let years = parsed.experience_years.unwrap_or(0.0);

        let title = top
            .and_then(|rec| rec.career_title.as_deref())
            .unwrap_or("career match");
        let missing: &[String] =
            top.map(|rec| rec.missing_skills.as_slice()).unwrap_or(&[]);

        AnalysisSummary {
            background: format!(
                "Detected {} background in {}. Experience: {} year(s).",
                degree, domain, years
            ),
            top_match: format!(
                "Top match: {} ({}%). Total recommendations: {}.",
                title,
                format_percent(top.and_then(|rec| rec.final_score)),
                payload.recommendations.len()
            ),
            improvements: if missing.is_empty() {
                "No major skill gaps detected in top match.".to_owned()
            } else {
                format!(
                    "Focus skills: {}.",
                    missing.iter().take(3).join(", ")
                )
            },
        }
    }
}
