use crate::models::chat::UpstreamResult;
use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

/// Ordered classification rules, first match wins. Matching is
/// case-insensitive substring search over the whole message, mirroring the
/// widget's original keyword alternations.
static RULES: &[(&str, &[&str])] = &[
    ("greeting", &["hello", "hi", "hey", "greetings"]),
    ("help", &["help", "assist", "support"]),
    ("product", &["product", "service", "offer"]),
    ("pricing", &["price", "cost", "pricing", "plan"]),
];

static CANNED_REPLIES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (
            "greeting",
            vec![
                "Hello! How can I help you today?",
                "Hi there! What can I assist you with?",
                "Greetings! What can I do for you?",
            ],
        ),
        (
            "help",
            vec![
                "I can help you with product information, troubleshooting, or general questions. What do you need assistance with?",
                "I'm here to help! Please let me know what you're looking for.",
            ],
        ),
        (
            "product",
            vec![
                "Our products include a range of solutions for businesses and individuals. Could you specify which product you're interested in?",
                "We offer various products across different categories. Can you tell me which specific product you'd like to know more about?",
            ],
        ),
        (
            "pricing",
            vec![
                "Our pricing depends on the specific product and plan you're interested in. You can find detailed pricing information on our pricing page.",
                "We offer flexible pricing plans to suit different needs. Would you like me to provide a link to our pricing page?",
            ],
        ),
        (
            "default",
            vec![
                "I'm not sure I understand. Could you rephrase your question?",
                "I don't have information on that specific topic. Could you try asking something else?",
                "I'm still learning! Could you try asking your question in a different way?",
            ],
        ),
    ])
});

/// Map a free-text message to a reply category. Total and deterministic;
/// any unmatched input (including the empty string) lands on "default".
pub fn classify(message: &str) -> &'static str {
    let message = message.to_lowercase();
    for &(category, keywords) in RULES {
        if keywords.iter().any(|k| message.contains(k)) {
            return category;
        }
    }
    "default"
}

/// Uniform pick among the canned replies registered for a category. The RNG
/// is a parameter so tests can drive this with a seeded generator.
pub fn pick_reply<R: Rng + ?Sized>(category: &str, rng: &mut R) -> &'static str {
    let replies = CANNED_REPLIES
        .get(category)
        .unwrap_or_else(|| &CANNED_REPLIES["default"]);
    replies[rng.random_range(0..replies.len())]
}

/// Offline responder used when the widget supplies no model configuration.
pub struct FallbackResponder {
    delay: Duration,
}

impl FallbackResponder {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Classify the message and return a canned reply. The delay simulates
    /// network latency so the widget behaves as it would against the real
    /// path. Never fails.
    pub async fn respond(&self, message: &str) -> UpstreamResult {
        tokio::time::sleep(self.delay).await;
        let category = classify(message);
        let reply = pick_reply(category, &mut rand::rng());
        debug!("Serving canned reply from category '{}'", category);
        UpstreamResult::reply_only(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn classify_is_case_insensitive_and_ordered() {
        assert_eq!(classify("Hello there"), "greeting");
        assert_eq!(classify("HEY!"), "greeting");
        // "hi" matches before the later rules get a look.
        assert_eq!(classify("hi, what does it cost?"), "greeting");
        assert_eq!(classify("I need help"), "help");
        assert_eq!(classify("tell me about your products"), "product");
        assert_eq!(classify("what's the price?"), "pricing");
    }

    #[test]
    fn classify_is_total() {
        assert_eq!(classify(""), "default");
        assert_eq!(classify("qwertyuiop"), "default");
    }

    #[test]
    fn classify_is_deterministic() {
        for _ in 0..10 {
            assert_eq!(classify("hello world"), "greeting");
        }
    }

    #[test]
    fn picks_stay_within_the_registered_set() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(category, _) in RULES {
            let registered = &CANNED_REPLIES[category];
            for _ in 0..50 {
                assert!(registered.contains(&pick_reply(category, &mut rng)));
            }
        }
    }

    #[test]
    fn unknown_category_falls_back_to_default_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let reply = pick_reply("no-such-category", &mut rng);
        assert!(CANNED_REPLIES["default"].contains(&reply));
    }

    #[test]
    fn seeded_rng_makes_the_pick_reproducible() {
        let a = pick_reply("greeting", &mut StdRng::seed_from_u64(42));
        let b = pick_reply("greeting", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn responder_always_answers_from_the_matched_category() {
        let responder = FallbackResponder::new(0);
        let result = responder.respond("hello").await;
        assert!(CANNED_REPLIES["greeting"].contains(&result.reply.as_str()));
        assert!(result.auxiliary.is_empty());
    }
}
