use std::collections::BTreeMap;
use std::error::Error as _;

use serde_json::Value;
use tera::{Context, Tera};

use crate::business::BusinessFacts;
use crate::validate::Violations;

/// Fills `{{ ... }}` placeholders in authored copy.
///
/// Page `vars` are available by name and the practice facts under
/// `business`, so one content file can be cloned per locality without
/// retyping the phone number or address.
pub struct Interpolator {
    context: Context,
}

impl Interpolator {
    pub fn new(vars: &BTreeMap<String, String>, business: &BusinessFacts) -> Self {
        let mut context = Context::new();
        for (key, value) in vars {
            context.insert(key.as_str(), value);
        }
        context.insert("business", business);

        Self { context }
    }

    /// Renders one string. On failure the input is returned untouched and the
    /// problem is recorded against `field`.
    pub(crate) fn text(&self, field: &str, input: &str, violations: &mut Violations) -> String {
        if !has_markup(input) {
            return input.to_string();
        }

        match Tera::one_off(input, &self.context, false) {
            Ok(rendered) => rendered,
            Err(err) => {
                violations.push(field, describe(&err));
                input.to_string()
            }
        }
    }

    /// Renders every string inside a JSON value, naming nested fields with
    /// dotted/indexed paths below `field`.
    pub(crate) fn value(&self, field: &str, value: Value, violations: &mut Violations) -> Value {
        match value {
            Value::String(s) => Value::String(self.text(field, &s, violations)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| self.value(&format!("{field}[{i}]"), item, violations))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, item)| {
                        let item = self.value(&format!("{field}.{key}"), item, violations);
                        (key, item)
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

fn has_markup(input: &str) -> bool {
    input.contains("{{") || input.contains("{%")
}

// tera's top level message only names the template; the cause is further down.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::business;
    use serde_json::json;

    fn interpolator() -> Interpolator {
        let vars = BTreeMap::from([("locality".to_string(), "Mapperley".to_string())]);
        Interpolator::new(&vars, &business())
    }

    #[test]
    fn plain_text_is_left_alone() {
        let mut violations = Violations::default();
        let out = interpolator().text("title", "Braces & aligners", &mut violations);
        assert_eq!(out, "Braces & aligners");
        assert!(violations.into_result("p", ()).is_ok());
    }

    #[test]
    fn no_html_escaping_happens_here() {
        let mut violations = Violations::default();
        let out = interpolator().text("title", "Fish & chips in {{ locality }}", &mut violations);
        assert_eq!(out, "Fish & chips in Mapperley");
    }

    #[test]
    fn nested_values_report_their_path() {
        let mut violations = Violations::default();
        let value = json!({"rows": [{"factor": "{{ missing }}"}], "heading": "{{ locality }}"});
        let out = interpolator().value("sections[2]", value, &mut violations);

        assert_eq!(out["heading"], json!("Mapperley"));
        let err = violations.into_result("p", ()).unwrap_err();
        assert_eq!(err.violations()[0].field, "sections[2].rows[0].factor");
        assert!(err.violations()[0].message.contains("missing"));
    }
}
