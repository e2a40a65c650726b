//! Suffix generation for zone and layer parameter names.
//!
//! Every suffix list produced here is prefix-free: suffixes within one list
//! have a common fixed width, so no suffix can be a proper prefix of another.

use serde::{Deserialize, Serialize};

/// Strategy for generating `n` distinct parameter name suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum Suffixer {
    /// `_1, _2, ...`, zero padded to the width of the largest index.
    Numeric {
        #[serde(default)]
        separator: String,
        /// A single entity gets the empty suffix.
        #[serde(default)]
        blank_single: bool,
    },
    /// `_a, _b, ...`, base 26 with a fixed number of letters.
    Alpha {
        #[serde(default)]
        separator: String,
        #[serde(default)]
        blank_single: bool,
        #[serde(default)]
        upper: bool,
    },
    /// Explicit suffixes, handed out in order.
    Fixed { names: Vec<String> },
}

impl Suffixer {
    pub fn numeric(separator: impl Into<String>, blank_single: bool) -> Self {
        Self::Numeric {
            separator: separator.into(),
            blank_single,
        }
    }

    pub fn alpha(separator: impl Into<String>, blank_single: bool, upper: bool) -> Self {
        Self::Alpha {
            separator: separator.into(),
            blank_single,
            upper,
        }
    }

    /// Default layer suffixes: `_1, _2, ...`, also for a single layer.
    pub fn default_layer() -> Self {
        Self::numeric("_", false)
    }

    /// Default zone suffixes: `_a, _b, ...`, blank for a single zone.
    pub fn default_zone() -> Self {
        Self::alpha("_", true, false)
    }

    /// Produces the suffixes for `n` entities.
    ///
    /// The fixed variant may return fewer than `n`; callers check the count.
    pub fn create_suffixes(&self, n: usize) -> Vec<String> {
        match self {
            Self::Numeric {
                separator,
                blank_single,
            } => {
                if n == 1 && *blank_single {
                    return vec![String::new()];
                }
                let width = n.to_string().len();
                (1..=n)
                    .map(|i| format!("{separator}{i:0width$}"))
                    .collect()
            },
            Self::Alpha {
                separator,
                blank_single,
                upper,
            } => {
                if n == 1 && *blank_single {
                    return vec![String::new()];
                }
                let width = alpha_width(n);
                let base = if *upper { b'A' } else { b'a' };
                (0..n)
                    .map(|i| format!("{separator}{}", alpha_digits(i, width, base)))
                    .collect()
            },
            Self::Fixed { names } => names.iter().take(n).cloned().collect(),
        }
    }
}

fn alpha_width(n: usize) -> usize {
    let mut width = 1;
    let mut capacity = 26usize;
    while capacity < n {
        width += 1;
        capacity = capacity.saturating_mul(26);
    }
    width
}

fn alpha_digits(mut index: usize, width: usize, base: u8) -> String {
    let mut digits = vec![base; width];
    for slot in digits.iter_mut().rev() {
        *slot = base + (index % 26) as u8;
        index /= 26;
    }
    digits.into_iter().map(char::from).collect()
}

/// Returns the first pair `(shorter, longer)` where `shorter` is a prefix of
/// `longer`, or `None` if the list is prefix-free. Duplicates count as a
/// violation.
pub fn find_prefix_violation(suffixes: &[String]) -> Option<(String, String)> {
    let mut sorted: Vec<&String> = suffixes.iter().collect();
    sorted.sort();
    // After sorting, any prefix relation shows up between neighbours.
    sorted
        .windows(2)
        .find(|pair| pair[1].starts_with(pair[0].as_str()))
        .map(|pair| (pair[0].clone(), pair[1].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_pads_to_widest_index() {
        let suffixes = Suffixer::numeric("-", true).create_suffixes(11);
        assert_eq!(suffixes.len(), 11);
        assert_eq!(suffixes[0], "-01");
        assert_eq!(suffixes[9], "-10");
        assert_eq!(suffixes[10], "-11");
    }

    #[test]
    fn blank_single_gives_empty_suffix() {
        assert_eq!(Suffixer::numeric("_", true).create_suffixes(1), vec![""]);
        assert_eq!(Suffixer::numeric("_", false).create_suffixes(1), vec!["_1"]);
        assert_eq!(
            Suffixer::alpha("", true, false).create_suffixes(1),
            vec![""]
        );
    }

    #[test]
    fn zero_entities_gives_no_suffixes() {
        assert!(Suffixer::default_layer().create_suffixes(0).is_empty());
        assert!(Suffixer::default_zone().create_suffixes(0).is_empty());
    }

    #[test]
    fn alpha_rolls_over_to_two_letters() {
        let suffixes = Suffixer::alpha("_", false, true).create_suffixes(28);
        assert_eq!(suffixes[0], "_AA");
        assert_eq!(suffixes[25], "_AZ");
        assert_eq!(suffixes[26], "_BA");
        assert_eq!(suffixes[27], "_BB");

        let short = Suffixer::alpha("", false, false).create_suffixes(3);
        assert_eq!(short, vec!["a", "b", "c"]);
    }

    #[test]
    fn fixed_may_run_short() {
        let suffixer = Suffixer::Fixed {
            names: vec!["L".into(), "R".into()],
        };
        assert_eq!(suffixer.create_suffixes(1), vec!["L"]);
        assert_eq!(suffixer.create_suffixes(3), vec!["L", "R"]);
    }

    #[test]
    fn detects_prefix_violation() {
        let suffixes = vec!["_1".to_string(), "_10".to_string(), "_2".to_string()];
        assert_eq!(
            find_prefix_violation(&suffixes),
            Some(("_1".to_string(), "_10".to_string()))
        );
        let dup = vec!["x".to_string(), "x".to_string()];
        assert!(find_prefix_violation(&dup).is_some());
    }

    proptest! {
        #[test]
        fn numeric_suffixes_are_prefix_free(n in 0usize..300, blank in any::<bool>()) {
            let suffixes = Suffixer::numeric("_", blank).create_suffixes(n);
            prop_assert_eq!(suffixes.len(), n);
            prop_assert_eq!(find_prefix_violation(&suffixes), None);
        }

        #[test]
        fn alpha_suffixes_are_prefix_free(n in 0usize..800, upper in any::<bool>()) {
            let suffixes = Suffixer::alpha("", false, upper).create_suffixes(n);
            prop_assert_eq!(suffixes.len(), n);
            prop_assert_eq!(find_prefix_violation(&suffixes), None);
        }
    }
}
