// uastats - core/classify.rs
//
// Rule-based user-agent classifiers. Pure functions over the user-agent
// string: no counters, no I/O. Aggregation lives in core/stats.rs.
//
// Every classifier treats an empty user agent as "no match".

use crate::core::model::{Category, ClassificationResult};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// The capability every classifier shares: look at one user agent and
/// decide membership, optionally naming a narrower bucket than the whole
/// string.
pub trait Classify {
    fn category(&self) -> Category;
    fn classify(&self, user_agent: &str) -> ClassificationResult;
}

// =============================================================================
// Generic crawlers
// =============================================================================

/// Crawler name patterns, tried in order; the first hit wins.
const BOT_PATTERNS: &[&str] = &[
    r"(?i)(ads|google|bing|msn|yandex|baidu|ro|career|seznam|)bot",
    r"(?i)(baidu|jike|symantec)spider",
    r"(?i)scanner",
    r"(?i)(web)crawler",
];

fn bot_regexes() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        BOT_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("bot pattern must compile"))
            .collect()
    })
}

/// Generic crawler detection by case-insensitive name fragments
/// (`...bot`, `...spider`, `scanner`, `webcrawler`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BotClassifier;

impl BotClassifier {
    /// Index into the pattern list of the first pattern that matches.
    pub fn matching_pattern(&self, user_agent: &str) -> Option<usize> {
        if user_agent.is_empty() {
            return None;
        }
        bot_regexes().iter().position(|re| re.is_match(user_agent))
    }

    pub fn is_bot(&self, user_agent: &str) -> bool {
        self.matching_pattern(user_agent).is_some()
    }
}

impl Classify for BotClassifier {
    fn category(&self) -> Category {
        Category::Bot
    }

    fn classify(&self, user_agent: &str) -> ClassificationResult {
        match self.matching_pattern(user_agent) {
            Some(idx) => {
                tracing::trace!(pattern = BOT_PATTERNS[idx], user_agent, "Bot pattern matched");
                ClassificationResult::bucket(user_agent)
            }
            None => ClassificationResult::no_match(),
        }
    }
}

// =============================================================================
// Crawlers posing as phones
// =============================================================================

/// Crawlers whose agent string looks like a phone browser.
///
/// Matches when any of these holds:
/// - the agent carries Google's mobile crawler signature;
/// - it names `Android` or `iPhone` and carries the desktop Googlebot
///   signature (Googlebot's smartphone crawl);
/// - it names `iPhone` or `Windows Phone` and carries the Bingbot signature.
///
/// Signature matching is exact (case-sensitive).
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileBotClassifier;

impl MobileBotClassifier {
    pub fn is_mobile_bot(&self, user_agent: &str) -> bool {
        if user_agent.is_empty() {
            return false;
        }

        let google_mobile = user_agent.contains(constants::GOOGLEBOT_MOBILE_SIGNATURE);

        let google_smartphone = (user_agent.contains("Android") || user_agent.contains("iPhone"))
            && user_agent.contains(constants::GOOGLEBOT_SIGNATURE);

        let bing_mobile = (user_agent.contains("iPhone") || user_agent.contains("Windows Phone"))
            && user_agent.contains(constants::BINGBOT_SIGNATURE);

        google_mobile || google_smartphone || bing_mobile
    }
}

impl Classify for MobileBotClassifier {
    fn category(&self) -> Category {
        Category::MobileBot
    }

    fn classify(&self, user_agent: &str) -> ClassificationResult {
        if self.is_mobile_bot(user_agent) {
            ClassificationResult::bucket(user_agent)
        } else {
            ClassificationResult::no_match()
        }
    }
}

// =============================================================================
// In-app browsers
// =============================================================================

fn in_app_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\[FB[^\]]*\]").expect("in-app pattern must compile"))
}

/// Facebook in-app browsers, bucketed by their bracketed signature
/// (e.g. `[FB_IAB/FB4A;FBAV/47.0.0.25.125;]`) rather than the whole agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct InAppClassifier;

impl InAppClassifier {
    /// The first bracketed `[FB...]` token in the agent, brackets included.
    pub fn signature<'a>(&self, user_agent: &'a str) -> Option<&'a str> {
        in_app_regex().find(user_agent).map(|m| m.as_str())
    }
}

impl Classify for InAppClassifier {
    fn category(&self) -> Category {
        Category::InApp
    }

    fn classify(&self, user_agent: &str) -> ClassificationResult {
        match self.signature(user_agent) {
            Some(sig) => ClassificationResult::bucket(sig),
            None => ClassificationResult::no_match(),
        }
    }
}

// =============================================================================
// Ordinary agents
// =============================================================================

/// Everything with a declared agent that the generic crawler rules do not
/// flag. Backs the general user-agent listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentClassifier {
    bots: BotClassifier,
}

impl Classify for AgentClassifier {
    fn category(&self) -> Category {
        Category::Agent
    }

    fn classify(&self, user_agent: &str) -> ClassificationResult {
        if user_agent.is_empty() || self.bots.is_bot(user_agent) {
            ClassificationResult::no_match()
        } else {
            ClassificationResult::bucket(user_agent)
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// One classifier per [`Category`], so callers can iterate over whatever
/// categories a run enabled.
#[derive(Debug, Clone, Copy)]
pub enum Classifier {
    Agent(AgentClassifier),
    Bot(BotClassifier),
    MobileBot(MobileBotClassifier),
    InApp(InAppClassifier),
}

impl Classifier {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Agent => Self::Agent(AgentClassifier::default()),
            Category::Bot => Self::Bot(BotClassifier),
            Category::MobileBot => Self::MobileBot(MobileBotClassifier),
            Category::InApp => Self::InApp(InAppClassifier),
        }
    }
}

impl Classify for Classifier {
    fn category(&self) -> Category {
        match self {
            Self::Agent(c) => c.category(),
            Self::Bot(c) => c.category(),
            Self::MobileBot(c) => c.category(),
            Self::InApp(c) => c.category(),
        }
    }

    fn classify(&self, user_agent: &str) -> ClassificationResult {
        match self {
            Self::Agent(c) => c.classify(user_agent),
            Self::Bot(c) => c.classify(user_agent),
            Self::MobileBot(c) => c.classify(user_agent),
            Self::InApp(c) => c.classify(user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLEBOT_DESKTOP: &str =
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
    const GOOGLEBOT_SMARTPHONE: &str = "Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X Build/MMB29P) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2272.96 Mobile Safari/537.36 \
        (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
    const BINGBOT_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X) \
        AppleWebKit/537.51.1 (KHTML, like Gecko) Version/7.0 Mobile/11A465 Safari/9537.53 \
        (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";
    const CHROME_ANDROID: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/116.0.0.0 Mobile Safari/537.36";
    const FB_ANDROID: &str = "Mozilla/5.0 (Linux; Android 5.0; SM-G900P Build/LRX21T) \
        [FB_IAB/FB4A;FBAV/47.0.0.25.125;]";

    #[test]
    fn test_bot_is_case_insensitive() {
        let bots = BotClassifier;
        for ua in ["Googlebot", "googlebot", "GOOGLEBOT"] {
            assert!(bots.is_bot(ua), "{ua} should be a bot");
        }
    }

    #[test]
    fn test_bot_patterns_in_order() {
        let bots = BotClassifier;
        assert_eq!(bots.matching_pattern("Mozilla/5.0 (compatible; YandexBot/3.0)"), Some(0));
        assert_eq!(bots.matching_pattern("Baiduspider/2.0"), Some(1));
        assert_eq!(bots.matching_pattern("JikeSpider"), Some(1));
        assert_eq!(bots.matching_pattern("Nessus SCANNER"), Some(2));
        assert_eq!(bots.matching_pattern("WebCrawler/3.0"), Some(3));
        // `bot` alone matches through the empty vendor prefix.
        assert_eq!(bots.matching_pattern("SomeNewBot/1.0"), Some(0));
    }

    #[test]
    fn test_bot_negatives() {
        let bots = BotClassifier;
        assert!(!bots.is_bot(CHROME_ANDROID));
        assert!(!bots.is_bot(""));
        // spider without a listed vendor prefix
        assert!(!bots.is_bot("Spider/1.0"));
        // crawler without the `web` prefix
        assert!(!bots.is_bot("crawler"));
    }

    #[test]
    fn test_bot_bucket_is_whole_agent() {
        let result = BotClassifier.classify("Baiduspider/2.0");
        assert!(result.matched);
        assert_eq!(result.key.as_deref(), Some("Baiduspider/2.0"));
    }

    #[test]
    fn test_mobile_bot_requires_phone_and_signature() {
        let mobile = MobileBotClassifier;
        assert!(!mobile.is_mobile_bot(CHROME_ANDROID));
        assert!(!mobile.is_mobile_bot(GOOGLEBOT_DESKTOP));
        assert!(mobile.is_mobile_bot(GOOGLEBOT_SMARTPHONE));
        assert!(mobile.is_mobile_bot(&format!("iPhone {GOOGLEBOT_DESKTOP}")));
    }

    #[test]
    fn test_mobile_bot_bing_branch() {
        let mobile = MobileBotClassifier;
        assert!(mobile.is_mobile_bot(BINGBOT_IPHONE));
        assert!(mobile.is_mobile_bot(&format!(
            "Mozilla/5.0 (Windows Phone 8.1) {}",
            constants::BINGBOT_SIGNATURE
        )));
        // Android is not a Bingbot phone marker
        assert!(!mobile.is_mobile_bot(&format!(
            "Mozilla/5.0 (Android) {}",
            constants::BINGBOT_SIGNATURE
        )));
    }

    #[test]
    fn test_mobile_bot_google_mobile_signature() {
        let ua = format!(
            "SAMSUNG-SGH-E250/1.0 Profile/MIDP-2.0 Configuration/CLDC-1.1 UP.Browser/6.2.3.3.c.1.101 \
             (GUI) MMP/2.0 {}",
            constants::GOOGLEBOT_MOBILE_SIGNATURE
        );
        assert!(MobileBotClassifier.is_mobile_bot(&ua));
        assert!(!MobileBotClassifier.is_mobile_bot(""));
    }

    #[test]
    fn test_in_app_bucket_is_bracketed_signature() {
        let result = InAppClassifier.classify("Mozilla/5.0 [FB_IAB/FB4A;FBAV/47.0.0.25.125;]");
        assert!(result.matched);
        assert_eq!(result.key.as_deref(), Some("[FB_IAB/FB4A;FBAV/47.0.0.25.125;]"));

        let result = InAppClassifier.classify(FB_ANDROID);
        assert_eq!(result.key.as_deref(), Some("[FB_IAB/FB4A;FBAV/47.0.0.25.125;]"));
    }

    #[test]
    fn test_in_app_is_case_insensitive_and_skips_other_brackets() {
        let ua = "Mozilla/5.0 [en-US] [fban/FBIOS;FBAV/100.0]";
        assert_eq!(InAppClassifier.signature(ua), Some("[fban/FBIOS;FBAV/100.0]"));
        assert_eq!(InAppClassifier.signature(CHROME_ANDROID), None);
        assert!(!InAppClassifier.classify("").matched);
    }

    #[test]
    fn test_agent_excludes_bots_and_empty() {
        let agents = AgentClassifier::default();
        assert!(agents.classify(CHROME_ANDROID).matched);
        assert!(!agents.classify("Baiduspider/2.0").matched);
        assert!(!agents.classify("").matched);
    }

    #[test]
    fn test_dispatch_matches_category() {
        for &category in Category::all() {
            assert_eq!(Classifier::for_category(category).category(), category);
        }
        let bot = Classifier::for_category(Category::Bot);
        assert!(bot.classify("bingbot").matched);
    }
}
