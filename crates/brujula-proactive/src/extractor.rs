use tracing::debug;

use crate::catalog::{self, TopicCategory};

/// Case-insensitive substring matcher over the keyword catalog.
///
/// Topics come back de-duplicated in catalog order (regions, industries,
/// events, trends), not in the order they appear in the text. A keyword that
/// sits in several lists matches in each of them.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    lists: Vec<(TopicCategory, Vec<&'static str>)>,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self {
            lists: catalog::keyword_lists(),
        }
    }
}

impl TopicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        let mut topics: Vec<String> = Vec::new();

        for (_, keywords) in &self.lists {
            for keyword in keywords {
                if !haystack.contains(&keyword.to_lowercase()) {
                    continue;
                }
                if !topics.iter().any(|t| t.as_str() == *keyword) {
                    topics.push(keyword.to_string());
                }
            }
        }

        debug!(count = topics.len(), ?topics, "extracted topics");
        topics
    }

    /// Every category a topic belongs to, in list order
    pub fn categories(&self, topic: &str) -> Vec<TopicCategory> {
        let key = topic.to_lowercase();
        self.lists
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| k.to_lowercase() == key))
            .map(|(category, _)| *category)
            .collect()
    }

    /// First category a topic belongs to
    pub fn categorize(&self, topic: &str) -> Option<TopicCategory> {
        self.categories(topic).into_iter().next()
    }

    pub fn first_of<'a>(&self, topics: &'a [String], category: TopicCategory) -> Option<&'a str> {
        let keywords = self
            .lists
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, k)| k)?;
        topics
            .iter()
            .find(|t| {
                let key = t.to_lowercase();
                keywords.iter().any(|k| k.to_lowercase() == key)
            })
            .map(String::as_str)
    }

    pub fn first_region<'a>(&self, topics: &'a [String]) -> Option<&'a str> {
        self.first_of(topics, TopicCategory::Region)
    }

    pub fn first_industry<'a>(&self, topics: &'a [String]) -> Option<&'a str> {
        self.first_of(topics, TopicCategory::Industry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cali_tecnologia_scenario() {
        let extractor = TopicExtractor::new();
        let topics = extractor.extract("¿Cómo entro al mercado de Cali en tecnología?");
        assert_eq!(topics, vec!["Cali".to_string(), "tecnología".to_string()]);
    }

    #[test]
    fn test_region_match_is_case_insensitive() {
        let extractor = TopicExtractor::new();
        assert!(extractor.extract("Abrimos tienda en MEDELLÍN").contains(&"Medellín".to_string()));
        assert!(extractor.extract("Vendemos en Medellín y Bogotá").contains(&"Medellín".to_string()));
    }

    #[test]
    fn test_results_follow_catalog_order_not_input_order() {
        let extractor = TopicExtractor::new();
        let topics = extractor.extract("Campaña de TikTok para Black Friday en moda, desde Bogotá");
        assert_eq!(topics, vec!["Bogotá", "moda", "Black Friday", "TikTok"]);
    }

    #[test]
    fn test_repeated_keyword_reported_once() {
        let extractor = TopicExtractor::new();
        let topics = extractor.extract("retail retail RETAIL");
        assert_eq!(topics, vec!["retail"]);
    }

    #[test]
    fn test_plain_substring_containment() {
        // No tokenization: "Cali" is found inside "California".
        let extractor = TopicExtractor::new();
        assert_eq!(extractor.extract("Vacaciones en California"), vec!["Cali"]);
        assert!(extractor.extract("Hola, ¿cómo estás?").is_empty());
    }

    #[test]
    fn test_first_region_and_industry() {
        let extractor = TopicExtractor::new();
        let topics = extractor.extract("moda en Cartagena y Cali");
        assert_eq!(topics, vec!["Cali", "Cartagena", "moda"]);
        assert_eq!(extractor.first_region(&topics), Some("Cali"));
        assert_eq!(extractor.first_industry(&topics), Some("moda"));
        assert_eq!(extractor.categorize("navidad"), Some(TopicCategory::Event));
    }

    #[test]
    fn test_categories() {
        let extractor = TopicExtractor::new();
        assert_eq!(extractor.categories("Cali"), vec![TopicCategory::Region]);
        assert_eq!(extractor.categories("TikTok"), vec![TopicCategory::Trend]);
        assert_eq!(extractor.categories("black friday"), vec![TopicCategory::Event]);
        assert!(extractor.categories("pizza").is_empty());
    }
}
