pub mod derive;
pub mod snapshot;
pub mod upload;

pub use derive::{
    clamp_score, match_insight, project_cards, rank_skill_gaps,
    AnalysisSummary, DashboardMetrics, RecommendationCard, SkillGap,
};
pub use snapshot::{
    load_snapshot, save_snapshot, AnalysisPayload, ParsedResume,
    Recommendation,
};
pub use upload::{validate_upload, UploadError};
