//! Splitting a results page into listing cards and picking the target train.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;

/// Default listing-card grammar: a `data-block list-kereta` div through the
/// end of its booking form.
pub const DEFAULT_CARD_PATTERN: &str =
    r#"(?is)<div class="data-block list-kereta".*?</form>\s*</div>"#;

static DEFAULT_CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_CARD_PATTERN).expect("valid card regex"));

/// Regex delimiting one listing card; each non-overlapping match is a card.
#[derive(Debug, Clone)]
pub struct CardBoundary {
    regex: Regex,
}

impl Default for CardBoundary {
    fn default() -> Self {
        Self {
            regex: DEFAULT_CARD_RE.clone(),
        }
    }
}

impl CardBoundary {
    /// Compiles a replacement card grammar, for when the site's markup
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn from_pattern(pattern: &str) -> Result<Self, ScraperError> {
        let regex = Regex::new(pattern).map_err(|source| ScraperError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self { regex })
    }

    /// Returns every card in `page`, in document order.
    #[must_use]
    pub fn split<'p>(&self, page: &'p str) -> Vec<&'p str> {
        self.regex.find_iter(page).map(|m| m.as_str()).collect()
    }
}

/// The train being monitored.
#[derive(Debug, Clone)]
pub struct TrainTarget {
    name: String,
    attribute_marker: String,
}

impl TrainTarget {
    /// Normalizes `name` to trimmed upper case.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::BlankTrainName`] when `name` is empty after
    /// trimming, since an empty name is a substring of every card.
    pub fn new(name: &str) -> Result<Self, ScraperError> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(ScraperError::BlankTrainName);
        }
        Ok(Self::from_normalized(name))
    }

    fn from_normalized(name: String) -> Self {
        let attribute_marker = format!("data-kereta=\"{name}\"");
        Self {
            name,
            attribute_marker,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A card matches on a case-insensitive mention of the name or on an
    /// exact `data-kereta` attribute.
    #[must_use]
    pub fn matches(&self, card_html: &str) -> bool {
        card_html.to_uppercase().contains(&self.name)
            || card_html.contains(&self.attribute_marker)
    }
}

impl Default for TrainTarget {
    fn default() -> Self {
        Self::from_normalized(bengawan_core::DEFAULT_TARGET_TRAIN.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> String {
        format!(
            r#"<div class="data-block list-kereta"><div class="name">{name}</div><form action="/b"></form>
            </div>"#
        )
    }

    #[test]
    fn split_finds_each_card_in_order() {
        let page = format!(
            "<html>{}{}{}</html>",
            card("ARGO LAWU"),
            card("BENGAWAN"),
            card("JAKA TINGKIR")
        );
        let cards = CardBoundary::default().split(&page);
        assert_eq!(cards.len(), 3);
        assert!(cards[0].contains("ARGO LAWU"));
        assert!(cards[1].contains("BENGAWAN"));
        assert!(cards[2].contains("JAKA TINGKIR"));
    }

    #[test]
    fn split_is_case_insensitive_on_markup() {
        let page = r#"<DIV CLASS="data-block list-kereta">x</FORM></DIV>"#;
        assert_eq!(CardBoundary::default().split(page).len(), 1);
    }

    #[test]
    fn split_returns_empty_for_page_without_cards() {
        let page = "<html><body>Maaf</body></html>";
        assert!(CardBoundary::default().split(page).is_empty());
    }

    #[test]
    fn custom_boundary_replaces_default() {
        let boundary = CardBoundary::from_pattern(r"(?s)<article>.*?</article>").unwrap();
        let page = "<article>BENGAWAN</article><article>SERAYU</article>";
        assert_eq!(
            boundary.split(page),
            vec!["<article>BENGAWAN</article>", "<article>SERAYU</article>"]
        );
    }

    #[test]
    fn invalid_boundary_is_rejected() {
        let err = CardBoundary::from_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidPattern { .. }), "got: {err:?}");
    }

    #[test]
    fn target_matches_name_case_insensitively() {
        let target = TrainTarget::new(" bengawan ").expect("valid name");
        assert_eq!(target.name(), "BENGAWAN");
        assert!(target.matches("<div>Bengawan</div>"));
        assert!(!target.matches("<div>SERAYU</div>"));
    }

    #[test]
    fn target_matches_attribute_marker() {
        let target = TrainTarget::default();
        assert!(target.matches(r#"<div data-kereta="BENGAWAN"></div>"#));
    }

    #[test]
    fn blank_target_name_is_rejected() {
        for name in ["", "   ", "\t\n"] {
            let result = TrainTarget::new(name);
            assert!(
                matches!(result, Err(ScraperError::BlankTrainName)),
                "expected BlankTrainName for {name:?}, got: {result:?}"
            );
        }
    }
}
