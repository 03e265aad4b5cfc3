//! Scope-establishing turns sent ahead of every conversation.
//!
//! The generation API has no separate system slot in the request shape we
//! use, so the assistant's scope is set with a fixed user/assistant pair at
//! the start of the message list. These turns are never stored in a
//! session transcript.

use oncochat_types::chat::{Speaker, Turn};
use oncochat_types::llm::Message;

/// Instruction establishing the assistant's scope and constraints.
pub const SCOPE_INSTRUCTION: &str = "You are OncoChat AI, a compassionate cancer care companion. \
You only help with topics related to cancer: symptoms, diagnosis, treatment options, managing side effects, \
nutrition and rest during treatment, emotional support, and guidance for caregivers and family members. \
Explain medical terms in simple language and keep answers warm, clear, and concise. \
You are not a replacement for professional medical advice: encourage users to consult their healthcare team \
for medical decisions and to seek urgent care for severe symptoms. \
If a question is unrelated to cancer care, politely explain that you can only help with cancer-related topics \
and suggest something you can help with.";

/// Assistant acknowledgement completing the scope pair.
pub const SCOPE_ACKNOWLEDGEMENT: &str = "Understood. I'm OncoChat AI, and I'll focus on supporting people \
affected by cancer with compassionate, reliable information, while reminding them to consult their \
healthcare team for medical decisions.";

/// The fixed scope pair that opens every request.
pub fn scope_preamble() -> [Message; 2] {
    [
        Message::user(SCOPE_INSTRUCTION),
        Message::assistant(SCOPE_ACKNOWLEDGEMENT),
    ]
}

/// Wrap a new user message with a short scope reminder.
pub fn wrap_user_message(message: &str) -> String {
    format!(
        "As OncoChat AI, a cancer care assistant, respond helpfully and compassionately to: {message}"
    )
}

/// Convert stored turns into request messages.
pub fn transcript_messages(transcript: &[Turn]) -> impl Iterator<Item = Message> + '_ {
    transcript.iter().map(|turn| match turn.speaker {
        Speaker::User => Message::user(turn.text.clone()),
        Speaker::Assistant => Message::assistant(turn.text.clone()),
    })
}

/// Full message list: scope pair, transcript, then the wrapped new message.
pub fn build_messages(transcript: &[Turn], new_message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(transcript.len() + 3);
    messages.extend(scope_preamble());
    messages.extend(transcript_messages(transcript));
    messages.push(Message::user(wrap_user_message(new_message)));
    messages
}
