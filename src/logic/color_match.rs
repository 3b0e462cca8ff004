use std::collections::HashMap;

/// Fuzzy matcher between free-text product colors and canonical palette
/// labels. Sellers tag inventory loosely ("Đen nhám", "xanh GP", "den bong"),
/// so each canonical label carries a keyword set with both diacritic and
/// plain-ASCII variants. Matching is substring based after case folding; no
/// runtime Unicode normalization is performed, the table carries the
/// variants instead.
#[derive(Debug, Clone)]
pub struct ColorMatcher {
    /// canonical label (lowercased) -> keyword list (lowercased)
    keywords: HashMap<String, Vec<String>>,
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self::with_table(builtin_keyword_table())
    }
}

impl ColorMatcher {
    pub fn with_table<L, K>(table: impl IntoIterator<Item = (L, Vec<K>)>) -> Self
    where
        L: Into<String>,
        K: Into<String>,
    {
        let keywords = table
            .into_iter()
            .map(|(label, words)| {
                (
                    label.into().to_lowercase(),
                    words.into_iter().map(|w| w.into().to_lowercase()).collect(),
                )
            })
            .collect();
        Self { keywords }
    }

    /// True when the product's raw color text matches the canonical label,
    /// either verbatim or through any keyword of the label. Compound labels
    /// ("Đen, Trắng" / "Đen-Đỏ") match if any constituent matches; the OR is
    /// deliberate, recall beats precision on loosely tagged inventory.
    /// An empty/absent product color never matches.
    pub fn matches(&self, product_color_text: &str, canonical_label: &str) -> bool {
        let text = product_color_text.trim().to_lowercase();
        if text.is_empty() {
            return false;
        }
        let label = canonical_label.trim().to_lowercase();
        if label.is_empty() {
            return false;
        }
        if text.contains(&label) {
            return true;
        }
        if let Some(words) = self.keywords.get(&label) {
            if words.iter().any(|w| text.contains(w.as_str())) {
                return true;
            }
        }
        // Compound label: fall back to OR over its parts.
        label
            .split([',', '-', '/'])
            .map(str::trim)
            .filter(|part| !part.is_empty() && *part != label)
            .any(|part| self.matches_single(&text, part))
    }

    fn matches_single(&self, lowered_text: &str, lowered_label: &str) -> bool {
        if lowered_text.contains(lowered_label) {
            return true;
        }
        self.keywords
            .get(lowered_label)
            .map_or(false, |words| words.iter().any(|w| lowered_text.contains(w.as_str())))
    }

    /// OR semantics over a multi-select set of labels; `None` color never
    /// satisfies a concrete color filter.
    pub fn matches_any<'a>(
        &self,
        product_color: Option<&str>,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        match product_color {
            Some(color) => labels.into_iter().any(|label| self.matches(color, label)),
            None => false,
        }
    }
}

/// The stock palette. Keywords carry diacritic and stripped variants plus the
/// English word, because sellers mix all three.
fn builtin_keyword_table() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Đen", vec!["đen", "den", "black", "đen nhám", "den nham", "đen bóng", "den bong"]),
        ("Trắng", vec!["trắng", "trang", "white", "trắng ngọc", "trang ngoc"]),
        ("Đỏ", vec!["đỏ", "do", "red", "đỏ đô", "do do", "đỏ tươi"]),
        ("Xanh dương", vec!["xanh dương", "xanh duong", "blue", "xanh biển", "xanh bien"]),
        ("Xanh lá", vec!["xanh lá", "xanh la", "green", "xanh rêu", "xanh reu"]),
        ("Vàng", vec!["vàng", "vang", "yellow", "vàng cát", "vang cat"]),
        ("Cam", vec!["cam", "orange"]),
        ("Xám", vec!["xám", "xam", "grey", "gray", "xám xi măng", "xam xi mang"]),
        ("Bạc", vec!["bạc", "bac", "silver"]),
        ("Nâu", vec!["nâu", "nau", "brown"]),
        ("Hồng", vec!["hồng", "hong", "pink"]),
        ("Tím", vec!["tím", "tim", "purple"]),
        // Two-tone labels used by the palette picker.
        ("Đen-Đỏ", vec!["đen đỏ", "den do", "đen-đỏ"]),
        ("Đen-Trắng", vec!["đen trắng", "den trang", "đen-trắng"]),
        ("Xanh-Đen", vec!["xanh đen", "xanh den", "xanh-đen"]),
    ]
}
