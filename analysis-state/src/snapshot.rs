use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kv_storage::{analysis_key, parse_json, uploaded_key, KeyValueStorage};
use state_error::Result;

const UPLOADED_FLAG: &str = "1";

/// The opaque `/analyze/` response: parsed resume attributes plus
/// ranked job recommendations.
///
/// Every field is defaulted so partial payloads from older backend
/// versions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPayload {
    pub parsed_resume: ParsedResume,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    pub degree: Option<String>,
    pub domain: Option<String>,
    pub experience_years: Option<f64>,
    pub technical_skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub career_title: Option<String>,
    pub final_score: Option<f64>,
    pub semantic_score: Option<f64>,
    pub market_score: Option<f64>,
    pub semantic_weight: Option<f64>,
    pub market_weight: Option<f64>,
    pub missing_skills: Vec<String>,
    pub company_location: Option<String>,
    pub job_count: Option<u64>,
}

/// Replace the snapshot for `username`: the payload first, then the
/// uploaded flag that makes it visible. Never partially updated.
pub fn save_snapshot<S: KeyValueStorage>(
    store: &mut S,
    username: &str,
    payload: &AnalysisPayload,
) -> Result<()> {
    let raw = serde_json::to_string(payload)?;
    store.set(&analysis_key(username), &raw)?;
    store.set(&uploaded_key(username), UPLOADED_FLAG)
}

/// All-or-nothing read: a missing flag, missing payload, or corrupt
/// payload all read as "no analysis". Stale payload bytes behind a
/// cleared flag are invisible.
pub fn load_snapshot<S: KeyValueStorage>(
    store: &S,
    username: &str,
) -> Option<AnalysisPayload> {
    if store.get(&uploaded_key(username)) != Some(UPLOADED_FLAG) {
        return None;
    }
    let raw = store.get(&analysis_key(username))?;
    parse_json(raw).ok()
}
