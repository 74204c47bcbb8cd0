use super::product::ProductCreate;
use std::collections::BTreeMap;

/// Field-level problems with a create payload, keyed by the camelCase field name.
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("invalid product: {}", describe(.fields))]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }
}

fn describe(fields: &BTreeMap<&'static str, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProductCreate {
    /// Checks the rules a creation form enforces before submitting.
    ///
    /// The repository does not call this; it stores whatever it is given.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "title is required");
        }

        let costs = &self.costs;
        if costs.labor_hours > 0.0 && costs.labor_rate <= 0.0 {
            errors.add("laborRate", "set an hourly rate when labor hours are given");
        }
        if costs.labor_rate > 0.0 && costs.labor_hours <= 0.0 {
            errors.add("laborHours", "set the labor hours when an hourly rate is given");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
