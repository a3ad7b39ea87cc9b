#![forbid(unsafe_code)]

//! The fixed table of filter categories and the order they are offered in.

/// Prefix under which character attributes live in each record.
pub const ATTRIBUTE_ROOT: &str = "character_analysis";

/// One filterable attribute and every value it can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Dotted path below [`ATTRIBUTE_ROOT`].
    pub path: &'static str,
    pub values: &'static [&'static str],
}

impl Category {
    /// Heading shown above the category's commands.
    pub fn display_name(&self) -> String {
        display_name(self.path)
    }

    /// Values in the order commands are listed (alphabetical).
    pub fn sorted_values(&self) -> Vec<&'static str> {
        let mut values = self.values.to_vec();
        values.sort_unstable();
        values
    }
}

/// Every category with its template values.
pub const FILTER_CATEGORIES: &[Category] = &[
    Category {
        path: "personality_traits.biggest_strength.category",
        values: &[
            "intelligence",
            "empathy",
            "strength",
            "creativity",
            "determination",
            "charisma",
            "resourcefulness",
            "courage",
            "humor",
            "loyalty",
        ],
    },
    Category {
        path: "personality_traits.introvert_extrovert",
        values: &["introvert", "extrovert", "ambivert"],
    },
    Category {
        path: "demographics.gender",
        values: &["male", "female", "non-binary"],
    },
    Category {
        path: "demographics.age_range",
        values: &["child", "adult", "senior"],
    },
    Category {
        path: "demographics.ethnicity",
        values: &["white", "black", "asian", "latinx", "indigenous", "other"],
    },
    Category {
        path: "personality_traits.biggest_fear.category",
        values: &[
            "death",
            "failure",
            "loneliness",
            "betrayal",
            "love_loss",
            "poverty",
            "power_loss",
        ],
    },
    Category {
        path: "personality_traits.moral_ambiguity.betrays_others",
        values: &["yes", "no", "unknown"],
    },
    Category {
        path: "relationships_family.parental_status",
        values: &["parent", "not_parent", "lost_child", "unknown"],
    },
    Category {
        path: "relationships_family.siblings_status",
        values: &["only_child", "siblings", "orphan", "unknown"],
    },
    Category {
        path: "dialogue_analysis.swear_frequency",
        values: &["never", "rare", "occasional", "frequent", "excessive"],
    },
    Category {
        path: "background_history.tragic_past",
        values: &["explicit", "implied", "none", "unknown"],
    },
    Category {
        path: "socioeconomic.income_level",
        values: &["poor", "middle_class", "rich", "unknown"],
    },
    Category {
        path: "narrative_arc.goal_achievement",
        values: &["fully", "partially", "not_at_all", "ambiguous"],
    },
    Category {
        path: "narrative_arc.success_metrics",
        values: &["fully", "partially", "not_at_all", "ambiguous"],
    },
];

/// Order categories are presented in, most important first.
///
/// May name paths that are not in [`FILTER_CATEGORIES`]; those are skipped.
pub const PRIORITY_ORDER: &[&str] = &[
    "demographics.gender",
    "demographics.ethnicity",
    "demographics.age_range",
    "personality_traits.introvert_extrovert",
    "personality_traits.biggest_strength.category",
    "personality_traits.biggest_fear.category",
    "moral_ambiguity.betrays_others",
    "background_history.tragic_past",
    "socioeconomic.income_level",
    "narrative_arc.goal_achievement",
    "narrative_arc.success_metrics",
    "relationships_family.parental_status",
    "relationships_family.siblings_status",
    "dialogue_analysis.swear_frequency",
];

const DISPLAY_OVERRIDES: &[(&str, &str)] = &[
    ("personality_traits.introvert_extrovert", "Personality Traits"),
    ("personality_traits.biggest_strength.category", "Qualities"),
    ("personality_traits.biggest_fear.category", "Biggest Fear"),
];

pub fn category(path: &str) -> Option<&'static Category> {
    FILTER_CATEGORIES.iter().find(|c| c.path == path)
}

/// Categories in [`PRIORITY_ORDER`], skipping unknown paths.
pub fn by_priority() -> impl Iterator<Item = &'static Category> {
    PRIORITY_ORDER.iter().filter_map(|path| category(path))
}

/// Heading for a category path: an override, else the last segment with
/// underscores turned into spaces.
pub fn display_name(path: &str) -> String {
    if let Some((_, name)) = DISPLAY_OVERRIDES.iter().find(|(p, _)| *p == path) {
        return (*name).to_string();
    }
    path.rsplit('.').next().unwrap_or(path).replace('_', " ")
}

/// Full record path for a category, adding [`ATTRIBUTE_ROOT`] when absent.
pub fn attribute_path(category: &str) -> String {
    let prefix = format!("{ATTRIBUTE_ROOT}.");
    if category.starts_with(&prefix) {
        category.to_string()
    } else {
        format!("{prefix}{category}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_skips_unknown_paths() {
        let paths: Vec<&str> = by_priority().map(|c| c.path).collect();
        assert_eq!(paths.len(), PRIORITY_ORDER.len() - 1);
        assert_eq!(paths[0], "demographics.gender");
        assert!(!paths.contains(&"moral_ambiguity.betrays_others"));
        assert_eq!(paths.last(), Some(&"dialogue_analysis.swear_frequency"));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("personality_traits.biggest_fear.category"), "Biggest Fear");
        assert_eq!(display_name("socioeconomic.income_level"), "income level");
        assert_eq!(display_name("gender"), "gender");
    }

    #[test]
    fn values_sorted_for_listing() {
        let gender = category("demographics.gender").map(Category::sorted_values);
        assert_eq!(gender, Some(vec!["female", "male", "non-binary"]));
    }

    #[test]
    fn attribute_path_prefixes_once() {
        assert_eq!(
            attribute_path("demographics.gender"),
            "character_analysis.demographics.gender"
        );
        assert_eq!(
            attribute_path("character_analysis.demographics.gender"),
            "character_analysis.demographics.gender"
        );
    }
}
