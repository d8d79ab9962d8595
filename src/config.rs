use crate::error::MenuError;
use crate::labels::LabelSequence;
use std::env as stdenv;

/// Comma-separated list of label sequences, e.g. `alpha,numeric`.
pub const LABELS_VAR: &str = "LABEL_MENU_LABELS";
/// Overrides the prompt shown after the rendered tree.
pub const PROMPT_VAR: &str = "LABEL_MENU_PROMPT";
/// Disables clearing the terminal before each render pass.
pub const NO_CLEAR_VAR: &str = "LABEL_MENU_NO_CLEAR";

/// Settings for building and driving a [`Menu`](crate::Menu).
///
/// - `labels`: one label sequence per nesting depth, root's children first.
/// - `prompt`: text shown before reading input; the root item's text when `None`.
/// - `clear_screen`: whether the terminal console clears before every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub labels: Vec<LabelSequence>,
    pub prompt: Option<String>,
    pub clear_screen: bool,
}

impl Default for MenuConfig {
    /// Alternating letters and numbers for four levels, clearing enabled.
    fn default() -> Self {
        Self {
            labels: vec![
                LabelSequence::ALPHA,
                LabelSequence::NUMERIC,
                LabelSequence::ALPHA,
                LabelSequence::NUMERIC,
            ],
            prompt: None,
            clear_screen: true,
        }
    }
}

impl MenuConfig {
    /// Defaults overridden by the `LABEL_MENU_*` variables of the current process.
    pub fn from_env() -> Result<Self, MenuError> {
        Self::from_vars(stdenv::vars())
    }

    /// Defaults overridden by the `LABEL_MENU_*` entries found in `vars`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                LABELS_VAR => config.labels = parse_labels(value)?,
                PROMPT_VAR => config.prompt = Some(value.to_string()),
                NO_CLEAR_VAR => config.clear_screen = !is_truthy(value),
                _ => {}
            }
        }
        Ok(config)
    }
}

/// Parse a comma-separated list of label sequence names.
///
/// Empty entries are skipped, so `"alpha,,numeric,"` yields two sequences.
pub fn parse_labels(list: &str) -> Result<Vec<LabelSequence>, MenuError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels_list() {
        assert_eq!(
            parse_labels("alpha, numeric,,ALPHA,").unwrap(),
            vec![
                LabelSequence::Alpha,
                LabelSequence::Numeric,
                LabelSequence::Alpha
            ]
        );
        assert!(parse_labels("").unwrap().is_empty());
        assert!(matches!(
            parse_labels("alpha,greek"),
            Err(MenuError::UnknownLabelSequence(_))
        ));
    }

    #[test]
    fn test_from_vars_overrides_defaults() {
        let config = MenuConfig::from_vars([
            ("PATH", "/usr/bin"),
            (LABELS_VAR, "numeric,numeric"),
            (PROMPT_VAR, "Pick one:"),
            (NO_CLEAR_VAR, "1"),
        ])
        .unwrap();

        assert_eq!(
            config.labels,
            vec![LabelSequence::Numeric, LabelSequence::Numeric]
        );
        assert_eq!(config.prompt.as_deref(), Some("Pick one:"));
        assert!(!config.clear_screen);
    }

    #[test]
    fn test_no_clear_false_values_keep_clearing() {
        for value in ["", "0", "false", "FALSE"] {
            let config = MenuConfig::from_vars([(NO_CLEAR_VAR, value)]).unwrap();
            assert!(config.clear_screen, "value {:?}", value);
        }
    }

    #[test]
    fn test_from_vars_without_entries_is_default() {
        let vars: Vec<(String, String)> = Vec::new();
        assert_eq!(MenuConfig::from_vars(vars).unwrap(), MenuConfig::default());
    }
}
