use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ingredient of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub color: String,
    pub parts: u32,
}

/// Ingredient as exposed publicly, with the quantity redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortIngredient {
    pub color: String,
}

/// A drink on the menu. Serializing the entity itself yields the "long"
/// view with the full recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// The "short" projection of a drink, for unauthenticated consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShortDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

impl Drink {
    /// Public projection: title plus the recipe with quantities redacted
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                })
                .collect(),
        }
    }
}

/// Recipe as accepted on create/update: either a single ingredient record
/// or a sequence of them. Normalized to a sequence before storage.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Request body for creating or updating a drink
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DrinkPayload {
    pub title: String,
    pub recipe: RecipeInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_view_redacts_parts() {
        let drink = Drink {
            id: 1,
            title: "matcha shake".to_string(),
            recipe: vec![
                Ingredient {
                    color: "green".to_string(),
                    parts: 1,
                },
                Ingredient {
                    color: "white".to_string(),
                    parts: 3,
                },
            ],
        };

        let short = serde_json::to_value(drink.short()).unwrap();
        assert_eq!(short["title"], "matcha shake");
        assert_eq!(short["recipe"][0]["color"], "green");
        assert!(short["recipe"][0].get("parts").is_none());
        assert!(short["recipe"][1].get("parts").is_none());
    }

    #[test]
    fn test_recipe_input_accepts_single_record() {
        let payload: DrinkPayload = serde_json::from_value(json!({
            "title": "water",
            "recipe": {"color": "blue", "parts": 1}
        }))
        .unwrap();

        let recipe = payload.recipe.into_vec();
        assert_eq!(
            recipe,
            vec![Ingredient {
                color: "blue".to_string(),
                parts: 1
            }]
        );
    }

    #[test]
    fn test_recipe_input_accepts_sequence() {
        let payload: DrinkPayload = serde_json::from_value(json!({
            "title": "flat white",
            "recipe": [
                {"color": "brown", "parts": 1},
                {"color": "white", "parts": 2}
            ]
        }))
        .unwrap();

        assert_eq!(payload.recipe.into_vec().len(), 2);
    }

    #[test]
    fn test_payload_rejects_missing_fields() {
        let missing_recipe = serde_json::from_value::<DrinkPayload>(json!({"title": "t"}));
        assert!(missing_recipe.is_err());

        let missing_title =
            serde_json::from_value::<DrinkPayload>(json!({"recipe": {"color": "red", "parts": 1}}));
        assert!(missing_title.is_err());
    }
}
