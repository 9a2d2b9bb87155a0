/// Fixed display-name dictionary for a category dimension. Categories
/// missing from the dictionary are shown as-is.
#[derive(Debug, Clone, Copy)]
pub struct CategoryLabels {
    entries: &'static [(&'static str, &'static str)],
}

const LEAD_STATUS_LABELS: &[(&str, &str)] = &[
    ("new", "New"),
    ("contacted", "Contacted"),
    ("qualified", "Qualified"),
    ("negotiation", "In Negotiation"),
    ("closed", "Closed"),
    ("lost", "Lost"),
    ("unknown", "Unknown"),
];

const PROPERTY_TYPE_LABELS: &[(&str, &str)] = &[
    ("residential", "Residential"),
    ("condo", "Condo"),
    ("multi_family", "Multi-Family"),
    ("commercial", "Commercial"),
    ("land", "Land"),
    ("unknown", "Unknown"),
];

impl CategoryLabels {
    pub const fn lead_status() -> Self {
        Self {
            entries: LEAD_STATUS_LABELS,
        }
    }

    pub const fn property_type() -> Self {
        Self {
            entries: PROPERTY_TYPE_LABELS,
        }
    }

    pub fn display(&self, category: &str) -> String {
        self.entries
            .iter()
            .find(|(raw, _)| *raw == category)
            .map(|(_, label)| (*label).to_string())
            .unwrap_or_else(|| category.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_are_remapped() {
        assert_eq!(CategoryLabels::lead_status().display("negotiation"), "In Negotiation");
        assert_eq!(CategoryLabels::property_type().display("multi_family"), "Multi-Family");
    }

    #[test]
    fn unknown_categories_pass_through() {
        assert_eq!(CategoryLabels::lead_status().display("nurturing"), "nurturing");
        assert_eq!(CategoryLabels::property_type().display("Farm"), "Farm");
    }
}
