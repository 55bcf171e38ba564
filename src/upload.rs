//! Parsing of the "add recipe" form.
//!
//! Ingredient slots are numbered from 1. Each slot is either three fields,
//! `ingredient-{n}-quantity`, `ingredient-{n}-unit` and
//! `ingredient-{n}-description`, or one legacy field `ingredient-{n}` holding
//! `"quantity,unit,description"`.

use crate::api::ApiRecipe;
use crate::error::{BrowserError, Result};
use crate::model::Ingredient;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};

const INGREDIENT_PREFIX: &str = "ingredient-";

/// A validated upload, ready to be sent to the API
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Default)]
struct Slot {
    quantity: Option<String>,
    unit: Option<String>,
    description: Option<String>,
}

impl UploadForm {
    pub fn parse(fields: &HashMap<String, String>) -> Result<Self> {
        let field = |name: &str| fields.get(name).map(|v| v.trim()).unwrap_or_default();

        let title = field("title");
        if title.is_empty() {
            return Err(BrowserError::Format("Title must not be empty".to_string()));
        }

        let cooking_time = field("cookingTime").parse::<u32>().map_err(|_| {
            BrowserError::Format(format!(
                "Cooking time must be a whole number of minutes, got '{}'",
                field("cookingTime")
            ))
        })?;

        let servings = match field("servings").parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(BrowserError::Format(format!(
                    "Servings must be a positive whole number, got '{}'",
                    field("servings")
                )))
            }
        };

        let ingredients = parse_ingredients(fields)?;
        debug!("Parsed upload '{}' with {} ingredient(s)", title, ingredients.len());

        Ok(UploadForm {
            title: title.to_string(),
            source_url: field("sourceUrl").to_string(),
            image_url: field("image").to_string(),
            publisher: field("publisher").to_string(),
            cooking_time,
            servings,
            ingredients,
        })
    }
}

impl From<UploadForm> for ApiRecipe {
    fn from(form: UploadForm) -> Self {
        ApiRecipe {
            id: String::new(),
            title: form.title,
            publisher: form.publisher,
            source_url: form.source_url,
            image_url: form.image_url,
            servings: form.servings,
            cooking_time: form.cooking_time,
            ingredients: form.ingredients,
            key: None,
        }
    }
}

fn parse_ingredients(fields: &HashMap<String, String>) -> Result<Vec<Ingredient>> {
    let mut slots: BTreeMap<u32, Slot> = BTreeMap::new();

    for (name, value) in fields {
        let Some(rest) = name.strip_prefix(INGREDIENT_PREFIX) else {
            continue;
        };
        let (number, part) = match rest.split_once('-') {
            Some((number, part)) => (number, Some(part)),
            None => (rest, None),
        };
        let number: u32 = number
            .parse()
            .map_err(|_| BrowserError::Format(format!("Unrecognised ingredient field '{}'", name)))?;
        let slot = slots.entry(number).or_default();

        match part {
            Some("quantity") => set_once(&mut slot.quantity, value, name)?,
            Some("unit") => set_once(&mut slot.unit, value, name)?,
            Some("description") => set_once(&mut slot.description, value, name)?,
            Some(_) => {
                return Err(BrowserError::Format(format!(
                    "Unrecognised ingredient field '{}'",
                    name
                )))
            }
            None => {
                if value.trim().is_empty() {
                    continue;
                }
                let parts: Vec<&str> = value.split(',').map(str::trim).collect();
                let [quantity, unit, description] = parts.as_slice() else {
                    return Err(BrowserError::Format(format!(
                        "'{}' must be 'quantity,unit,description'",
                        value
                    )));
                };
                set_once(&mut slot.quantity, quantity, name)?;
                set_once(&mut slot.unit, unit, name)?;
                set_once(&mut slot.description, description, name)?;
            }
        }
    }

    // Empty legacy fields create no entries, so they never count against the others
    slots.retain(|_, s| s.quantity.is_some() || s.unit.is_some() || s.description.is_some());

    let with = |f: fn(&Slot) -> bool| -> BTreeSet<u32> {
        slots.iter().filter(|(_, s)| f(s)).map(|(n, _)| *n).collect()
    };
    let quantities = with(|s| s.quantity.is_some());
    let units = with(|s| s.unit.is_some());
    let descriptions = with(|s| s.description.is_some());
    if quantities != units || units != descriptions {
        return Err(BrowserError::Format(format!(
            "Ingredient fields are incomplete: {} quantity, {} unit and {} description field(s)",
            quantities.len(),
            units.len(),
            descriptions.len()
        )));
    }

    let mut ingredients = Vec::new();
    for (number, slot) in slots {
        let quantity = slot.quantity.unwrap_or_default();
        let unit = slot.unit.unwrap_or_default();
        let description = slot.description.unwrap_or_default();
        if quantity.is_empty() && unit.is_empty() && description.is_empty() {
            continue;
        }

        let quantity = if quantity.is_empty() {
            None
        } else {
            match quantity.parse::<f64>() {
                Ok(q) if q.is_finite() && q >= 0.0 => Some(q),
                _ => {
                    return Err(BrowserError::Format(format!(
                        "Ingredient {} has an invalid quantity '{}'",
                        number, quantity
                    )))
                }
            }
        };

        ingredients.push(Ingredient {
            quantity,
            unit,
            description,
        });
    }
    Ok(ingredients)
}

fn set_once(target: &mut Option<String>, value: &str, name: &str) -> Result<()> {
    if target.is_some() {
        return Err(BrowserError::Format(format!(
            "Ingredient field '{}' is given twice",
            name
        )));
    }
    *target = Some(value.trim().to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        let mut fields: HashMap<String, String> = [
            ("title", "Test Toast"),
            ("sourceUrl", "https://example.com/toast"),
            ("image", "https://example.com/toast.jpg"),
            ("publisher", "Me"),
            ("cookingTime", "10"),
            ("servings", "2"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in pairs {
            fields.insert(k.to_string(), v.to_string());
        }
        fields
    }

    #[test]
    fn test_slots_in_numeric_order() {
        let fields = form(&[
            ("ingredient-10-quantity", "3"),
            ("ingredient-10-unit", ""),
            ("ingredient-10-description", "eggs"),
            ("ingredient-2-quantity", "0.5"),
            ("ingredient-2-unit", "kg"),
            ("ingredient-2-description", "rice"),
        ]);

        let upload = UploadForm::parse(&fields).unwrap();
        let descriptions: Vec<&str> = upload
            .ingredients
            .iter()
            .map(|i| i.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["rice", "eggs"]);
        assert_eq!(upload.ingredients[0].quantity, Some(0.5));
        assert_eq!(upload.cooking_time, 10);
        assert_eq!(upload.image_url, "https://example.com/toast.jpg");
    }

    #[test]
    fn test_fully_empty_slots_are_dropped_and_empty_quantity_is_null() {
        let fields = form(&[
            ("ingredient-1-quantity", ""),
            ("ingredient-1-unit", ""),
            ("ingredient-1-description", "salt"),
            ("ingredient-2-quantity", " "),
            ("ingredient-2-unit", ""),
            ("ingredient-2-description", ""),
        ]);

        let upload = UploadForm::parse(&fields).unwrap();
        assert_eq!(upload.ingredients.len(), 1);
        assert_eq!(upload.ingredients[0].quantity, None);
    }

    #[test]
    fn test_mismatched_field_counts_fail() {
        let fields = form(&[
            ("ingredient-1-quantity", "1"),
            ("ingredient-1-unit", "cup"),
            ("ingredient-1-description", "milk"),
            ("ingredient-2-quantity", "2"),
            ("ingredient-2-description", "eggs"),
        ]);

        let err = UploadForm::parse(&fields).unwrap_err();
        assert!(matches!(err, BrowserError::Format(_)));
    }

    #[test]
    fn test_legacy_comma_field() {
        let fields = form(&[("ingredient-1", "0.5, kg , rice"), ("ingredient-2", "")]);

        let upload = UploadForm::parse(&fields).unwrap();
        assert_eq!(
            upload.ingredients,
            vec![Ingredient {
                quantity: Some(0.5),
                unit: "kg".to_string(),
                description: "rice".to_string(),
            }]
        );
    }

    #[test]
    fn test_legacy_field_needs_three_parts() {
        let fields = form(&[("ingredient-1", "0.5,kg")]);
        assert!(matches!(
            UploadForm::parse(&fields),
            Err(BrowserError::Format(_))
        ));
    }

    #[test]
    fn test_bad_quantity_fails() {
        let fields = form(&[
            ("ingredient-1-quantity", "lots"),
            ("ingredient-1-unit", ""),
            ("ingredient-1-description", "garlic"),
        ]);
        assert!(matches!(
            UploadForm::parse(&fields),
            Err(BrowserError::Format(_))
        ));
    }

    #[test]
    fn test_servings_must_be_positive() {
        let fields = form(&[("servings", "0")]);
        assert!(matches!(
            UploadForm::parse(&fields),
            Err(BrowserError::Format(_))
        ));
    }

    #[test]
    fn test_missing_title_fails() {
        let fields = form(&[("title", "   ")]);
        assert!(matches!(
            UploadForm::parse(&fields),
            Err(BrowserError::Format(_))
        ));
    }

    #[test]
    fn test_into_api_recipe_has_no_id() {
        let upload = UploadForm::parse(&form(&[])).unwrap();
        let api = ApiRecipe::from(upload);
        assert!(api.id.is_empty());
        assert_eq!(api.servings, 2);
        assert!(api.ingredients.is_empty());
    }
}
