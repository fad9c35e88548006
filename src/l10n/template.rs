//! Template interpolation.
//!
//! Two placeholder syntaxes share one left-to-right pass:
//!
//! - `{N}` is replaced by variable `N`.
//! - `${N|form0|form1|...}` is replaced by the form the plural rule picks
//!   for the numeric value of variable `N`.
//!
//! Placeholders whose variable is absent are left in the output verbatim,
//! as are plural placeholders whose variable is empty.
//! Chosen plural forms are emitted literally and never re-scanned.

use super::plural::PluralRule;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{(\d+)\}|\$\{(\d+)\|([^}]+)\}").expect("placeholder pattern is valid")
    })
}

/// A plural placeholder lists a different number of forms than its rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCountMismatch {
    pub expected: usize,
    pub found: usize,
}

/// Render `template` with `variables`, selecting plural forms with `rule`.
pub fn render(
    template: &str,
    rule: PluralRule,
    variables: &[&str],
) -> Result<String, FormCountMismatch> {
    let mut mismatch = None;

    let rendered = placeholder().replace_all(template, |caps: &Captures<'_>| {
        let whole = &caps[0];

        if let Some(index) = caps.get(1) {
            return variable(variables, index.as_str())
                .map(str::to_owned)
                .unwrap_or_else(|| whole.to_owned());
        }

        let forms: Vec<&str> = caps[3].split('|').collect();
        if forms.len() != rule.forms() {
            mismatch.get_or_insert(FormCountMismatch {
                expected: rule.forms(),
                found: forms.len(),
            });
            return whole.to_owned();
        }

        // A value that is not a number selects the rule's last form
        match variable(variables, &caps[2]).map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let n = raw.parse::<f64>().unwrap_or(f64::NAN);
                forms[rule.select(n)].to_owned()
            }
            _ => whole.to_owned(),
        }
    });

    match mismatch {
        Some(err) => Err(err),
        None => Ok(rendered.into_owned()),
    }
}

/// Check every plural placeholder in `template` against `rule`.
pub fn check(template: &str, rule: PluralRule) -> Result<(), FormCountMismatch> {
    for caps in placeholder().captures_iter(template) {
        if let Some(forms) = caps.get(3) {
            let found = forms.as_str().split('|').count();
            if found != rule.forms() {
                return Err(FormCountMismatch {
                    expected: rule.forms(),
                    found,
                });
            }
        }
    }
    Ok(())
}

fn variable<'v>(variables: &[&'v str], index: &str) -> Option<&'v str> {
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| variables.get(i).copied())
}
