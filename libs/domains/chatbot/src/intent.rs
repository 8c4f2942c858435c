/// Words and phrases that mark a message as a shopping query
pub const PRODUCT_KEYWORDS: [&str; 11] = [
    "shoe",
    "sneaker",
    "boot",
    "trainer",
    "footwear",
    "size",
    "running",
    "walking",
    "casual",
    "recommend",
    "looking for",
];

/// Decides whether a message should get product recommendations attached
#[cfg_attr(test, mockall::automock)]
pub trait IntentClassifier: Send + Sync {
    fn is_product_related(&self, text: &str) -> bool;
}

/// Case-insensitive substring match against a keyword list
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(PRODUCT_KEYWORDS)
    }
}

impl IntentClassifier for KeywordClassifier {
    fn is_product_related(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
