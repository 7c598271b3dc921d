use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const GREETING: &str =
    "Hello! Welcome to TravelCo. How can I help you plan your next adventure?";

pub const DEFAULT_REPLY: &str =
    "That's interesting! Can you please provide more details about your travel plans?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRule {
    pub keywords: Vec<String>,
    pub responses: Vec<String>,
}

impl ReplyRule {
    fn new(keywords: &[&str], responses: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// `text` must already be lowercase.
    fn matches(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| text.contains(&keyword.to_lowercase()))
    }
}

/// 關鍵字聊天回覆：依序比對規則，第一個命中的規則隨機挑一句
#[derive(Debug, Clone)]
pub struct Responder {
    rules: Vec<ReplyRule>,
    fallback: String,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Responder {
    pub fn new(rules: Vec<ReplyRule>) -> Self {
        // 沒有回覆內容的規則永遠不會被選中
        let rules = rules
            .into_iter()
            .filter(|rule| !rule.responses.is_empty())
            .collect();
        Self {
            rules,
            fallback: DEFAULT_REPLY.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Returns `None` for blank input.
    pub fn reply<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> Option<&str> {
        if input.trim().is_empty() {
            return None;
        }
        let text = input.to_lowercase();

        let reply = self
            .rules
            .iter()
            .find(|rule| rule.matches(&text))
            .and_then(|rule| rule.responses.choose(rng))
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str());

        tracing::debug!("chat: '{}' -> '{}'", input.trim(), reply);
        Some(reply)
    }
}

pub fn default_rules() -> Vec<ReplyRule> {
    vec![
        ReplyRule::new(
            &["hi", "hey", "hello", "what's up", "how are you", "who are you"],
            &[
                "Hello! I am TravelCo Bot, your virtual travel assistant. How can I help you today?",
                "Hey there! Ready to plan your next adventure? Ask me anything about our travel packages!",
                "Hi! I'm here to help you explore destinations, book flights, and find the best deals.",
            ],
        ),
        ReplyRule::new(
            &["destination", "places", "tour", "location", "where"],
            &[
                "We have several destinations that would be perfect for you. Would you like to see our most popular options?",
                "Our top destinations this month are Bali, Paris, and Maldives. Interested in any of these?",
            ],
        ),
        ReplyRule::new(
            &["price", "budget", "cost", "package", "expensive"],
            &[
                "Our travel packages start from $500 and can be customized according to your budget.",
                "We can create a custom itinerary for your budget. What's your preferred range?",
            ],
        ),
        ReplyRule::new(
            &["flight", "air", "plane", "tickets"],
            &[
                "We offer flight booking along with our travel packages. Do you want us to include flights?",
                "You can choose your preferred airline, and we'll arrange your tickets as part of your package.",
            ],
        ),
        ReplyRule::new(
            &["hotel", "stay", "accommodation", "room"],
            &[
                "We provide 3 to 5 star hotel stays. Do you have any preference?",
                "We can include hotels with breakfast, free WiFi, and great reviews in your package.",
            ],
        ),
        ReplyRule::new(
            &["offer", "deal", "discount", "promo"],
            &[
                "We have special offers this month. Would you like to hear about our current deals?",
                "Book now and get up to 20% off on selected packages!",
            ],
        ),
        ReplyRule::new(
            &["custom", "plan", "itinerary", "schedule"],
            &[
                "Our travel experts can create a custom itinerary for you. What kind of activities do you like?",
                "You can customize every part of your trip: flights, hotels, and sightseeing!",
            ],
        ),
        ReplyRule::new(
            &["help", "support", "question", "contact", "need"],
            &[
                "You can chat with one of our travel specialists for personalized support.",
                "I'm here to help! What would you like assistance with?",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_matching_rule_wins() {
        let responder = Responder::default();
        let mut rng = StdRng::seed_from_u64(7);

        // "price" 和 "flight" 都命中，price 規則排在前面
        let reply = responder
            .reply("What is the PRICE of a flight?", &mut rng)
            .unwrap();
        assert!(responder.rules()[2].responses.iter().any(|r| r == reply));
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let responder = Responder::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(responder.reply("Bonjour", &mut rng), Some(DEFAULT_REPLY));
    }

    #[test]
    fn test_blank_input_has_no_reply() {
        let responder = Responder::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(responder.reply("   ", &mut rng), None);
    }

    #[test]
    fn test_same_seed_same_reply() {
        let responder = Responder::default();
        let a = responder
            .reply("any hotel deals?", &mut StdRng::seed_from_u64(42))
            .map(str::to_string);
        let b = responder
            .reply("any hotel deals?", &mut StdRng::seed_from_u64(42))
            .map(str::to_string);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_rules_and_fallback() {
        let responder = Responder::new(vec![
            ReplyRule::new(&["visa"], &["Visa support is included."]),
            ReplyRule::new(&["empty"], &[]),
        ])
        .with_fallback("Ask me about visas.");
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(responder.rules().len(), 1);
        assert_eq!(
            responder.reply("Need a VISA?", &mut rng),
            Some("Visa support is included.")
        );
        assert_eq!(
            responder.reply("empty promises", &mut rng),
            Some("Ask me about visas.")
        );
    }
}
