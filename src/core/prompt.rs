use crate::domain::model::{ChatReply, Language};

/// Persona instructions sent ahead of every query. The trailing `[lang:xx]`
/// tag lets the application route the reply without re-detecting its
/// language.
pub const SYSTEM_PROMPT: &str = "You are 'Krishi Sakhi', a friendly and knowledgeable AI farming assistant for farmers in Kerala, India.
- Your purpose is to answer farming-related questions.
- Analyze the user's query to determine if it is in English or Malayalam. Your final response MUST be in the same language.
- After your main answer, add a language tag on a new line, like this: [lang:ml] for Malayalam or [lang:en] for English. This tag is for the application and should not be spoken.
- Prioritize using the information from the 'CONTEXT FROM DOCUMENTS' section to answer.
- If the documents don't have the answer, use your general knowledge.
- Keep your answers clear, concise, and easy for a farmer to understand.";

/// Canned reply used when the model cannot be reached at all.
pub const FALLBACK_REPLY: &str =
    "Sorry, I am having trouble connecting to my brain right now. Please try again later.";

const ML_TAG: &str = "[lang:ml]";
const EN_TAG: &str = "[lang:en]";

/// 組合完整提示：人設 + 文件脈絡 + 農民的問題。
pub fn build_prompt(context: &str, query: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nCONTEXT FROM DOCUMENTS:\n---\n{context}\n---\n\nFARMER'S QUERY:\n{query}"
    )
}

/// Split a raw model reply into its spoken text and the language it claims.
///
/// Only the LAST line is inspected for a tag; a tag buried mid-reply is
/// model noise, not a language claim. On a match every occurrence of the tag
/// is stripped. No tag means no claim (`None`), and the caller's hint
/// applies.
pub fn parse_language_tag(raw: &str) -> (String, Option<Language>) {
    let trimmed = raw.trim();
    let last_line = trimmed.lines().last().unwrap_or("");

    if last_line.contains(ML_TAG) {
        (
            trimmed.replace(ML_TAG, "").trim().to_string(),
            Some(Language::Malayalam),
        )
    } else if last_line.contains(EN_TAG) {
        (
            trimmed.replace(EN_TAG, "").trim().to_string(),
            Some(Language::English),
        )
    } else {
        (trimmed.to_string(), None)
    }
}

pub fn fallback_reply() -> ChatReply {
    ChatReply::new(FALLBACK_REPLY.to_string(), Language::English)
}
