//! Canned replies for common opening messages.
//!
//! Lookup is exact-match on a crude normalization (lowercase, trim, strip
//! `?`, `!` and `.`). Internal whitespace and other punctuation are kept,
//! so near-misses fall through to the model.

use std::collections::HashMap;

const GREETING: &str = "Hello! 👋 I'm OncoChat AI, your compassionate cancer care companion. I'm here to provide support, answer your questions, and help you navigate your cancer journey. How can I assist you today?";

const GREETING_HEY: &str = "Hey there! 👋 I'm OncoChat AI, your compassionate cancer care companion. I'm here to provide support, answer your questions, and help you navigate your cancer journey. How can I assist you today?";

const FAMILY_DIAGNOSIS: &str = "Talking to your family about a cancer diagnosis can feel overwhelming. 💜 Here are some compassionate ways to approach this conversation:\n\n• Choose a quiet, comfortable setting where everyone can sit down without distractions\n• Be honest and clear about what you know - it's okay to say 'I don't know yet' about some things\n• Allow space for emotions - everyone processes news differently\n• Share your needs and how they can support you\n• Remember you don't have to be strong all the time - it's okay to be vulnerable with loved ones\n\nWould you like more specific guidance on any aspect of this conversation?";

const REST: &str = "Rest is crucial during cancer treatment! 😴 Here are evidence-based practices:\n\n• Listen to your body - fatigue is real and valid\n• Maintain a consistent sleep schedule (7-9 hours)\n• Create a restful environment (cool, dark, quiet)\n• Balance rest with gentle activity like short walks\n• Try relaxation techniques: deep breathing, meditation\n• Remember: Rest is not laziness - it's healing! 💜";

const SIDE_EFFECTS: &str = "Managing side effects is so important! 💊 Here are key strategies:\n\n🤢 Nausea: Small frequent meals, ginger tea, anti-nausea meds\n😴 Fatigue: Balance rest with light activity, prioritize important tasks\n🍽️ Appetite: Eat small nutrient-dense meals, stay hydrated\n🦷 Mouth sores: Salt water rinses, soft foods, gentle brushing\n\nAlways discuss severe symptoms with your care team immediately!";

const NUTRITION: &str = "Nutrition during treatment is vital! 🥗 Focus on:\n\n💪 Protein: Lean meats, eggs, Greek yogurt, beans for healing\n🌈 Fruits & Veggies: Berries, leafy greens, colorful vegetables for nutrients\n🌾 Whole Grains: Brown rice, oatmeal, whole wheat for energy\n💧 Hydration: 8-10 glasses of water, broths, herbal teas\n\nEat small frequent meals and work with a dietitian for personalized advice!";

const CAPABILITIES: &str = "I'm here to support you in many ways! 💜\n\n✅ Answer questions about cancer types and stages\n✅ Explain treatment options (chemo, radiation, immunotherapy)\n✅ Provide nutrition and lifestyle tips\n✅ Help manage treatment side effects\n✅ Offer emotional support and guidance\n✅ Explain medical terms in simple language\n✅ Support caregivers and family members\n\nFeel free to ask me anything related to cancer care!";

const IDENTITY: &str = "I'm OncoChat AI, an AI-powered cancer care assistant designed to provide emotional support and reliable information. I can help you with understanding cancer symptoms, treatments, managing side effects, nutrition guidance, and emotional support for patients and caregivers.\n\nRemember - I'm not a replacement for professional medical advice. Always consult with your healthcare team for medical decisions.";

/// Immutable mapping from normalized phrases to canned replies.
#[derive(Debug, Clone)]
pub struct ResponseCatalog {
    entries: HashMap<String, String>,
}

impl ResponseCatalog {
    /// The built-in OncoChat catalog.
    pub fn builtin() -> Self {
        Self::from_entries([
            ("hi", GREETING),
            ("hello", GREETING),
            ("hey", GREETING_HEY),
            ("how do i talk to my family about my diagnosis", FAMILY_DIAGNOSIS),
            ("what are best practices for rest during treatment", REST),
            ("how can i manage treatment side effects", SIDE_EFFECTS),
            ("what foods should i eat during treatment", NUTRITION),
            ("what can you do", CAPABILITIES),
            ("what are you", IDENTITY),
        ])
    }

    /// Build a catalog from `(phrase, reply)` pairs. Phrases are normalized
    /// on insert; a later duplicate overwrites an earlier one.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (normalize(k.as_ref()), v.into()))
            .collect();
        Self { entries }
    }

    /// Canned reply for `text`, if its normalized form is an exact key.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries.get(&normalize(text)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase, trim, then strip every `?`, `!` and `.`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .chars()
        .filter(|c| !matches!(c, '?' | '!' | '.'))
        .collect()
}
