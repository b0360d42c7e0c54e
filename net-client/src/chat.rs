use serde::{Deserialize, Serialize};

use crate::ApiClient;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    reply: Option<String>,
}

impl ApiClient {
    /// Ask the assistant. Any backend problem falls back to a local,
    /// deterministic reply so the conversation never dead-ends.
    pub async fn chat(&self, message: &str) -> String {
        match self.try_chat(message).await {
            Some(reply) => reply,
            None => fallback_reply(message).to_owned(),
        }
    }

    async fn try_chat(&self, message: &str) -> Option<String> {
        let url = self.base.join("/api/chat/").ok()?;
        let response = self
            .http
            .post(url)
            .json(&ChatRequest {
                message,
                language: "en",
            })
            .send()
            .await
            .map_err(|err| {
                log::debug!("chat backend unreachable: {}", err);
                err
            })
            .ok()?;
        if !response.status().is_success() {
            return None;
        }

        let body: ChatResponse = response.json().await.ok()?;
        let reply = body.reply?;
        if reply.trim().is_empty() {
            None
        } else {
            Some(reply)
        }
    }
}

/// Keyword-matched reply used when the backend is unreachable or sends
/// nothing usable. Tiers are checked in order: resume, interview,
/// job/role, generic.
pub fn fallback_reply(query: &str) -> &'static str {
    let text = query.to_lowercase();
    if text.contains("resume") {
        "Upload your resume and I can help improve keyword matching and \
         impact-focused bullet points."
    } else if text.contains("interview") {
        "Prepare three STAR stories for interviews: leadership, problem \
         solving, and ownership."
    } else if text.contains("job") || text.contains("role") {
        "Check top matches on the recommendations page and apply first to \
         high-match roles."
    } else {
        "I am ready. Share your target role and current skill level to \
         get a focused plan."
    }
}
