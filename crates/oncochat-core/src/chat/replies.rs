//! Static replies used when the model path cannot produce an answer.

/// Reply when no API credential is configured.
pub const DEGRADED_NOTICE: &str = "I'm currently working with my basic knowledge base. For more specific questions, the AI integration is being set up. In the meantime, try asking about:\n\n• Talking to family about diagnosis\n• Rest during treatment\n• Managing side effects\n• Nutrition during treatment";

/// Reply for faults caught at the outermost request boundary.
pub const TECHNICAL_DIFFICULTIES: &str = "I'm having some technical difficulties right now. Please try one of the quick prompt buttons or ask about common cancer care topics like nutrition, rest, or talking with family.";

/// Apology used when every candidate model failed. Quotes the user's
/// message verbatim.
pub fn fallback_reply(message: &str) -> String {
    format!(
        "I understand you're asking about \"{message}\". While I'm setting up my advanced AI capabilities, I can help with common cancer care topics like discussing diagnosis with family, rest during treatment, managing side effects, and nutrition. Could you try one of those topics, or use the quick prompts above? 💜"
    )
}
