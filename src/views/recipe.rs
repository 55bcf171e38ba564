use super::{Markup, RenderContext, View};
use crate::model::{Ingredient, Recipe};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Format an ingredient quantity: whole numbers without decimals, anything
/// else rounded to at most two decimals. Missing quantities render empty.
pub fn format_quantity(quantity: Option<f64>) -> String {
    match quantity {
        None => String::new(),
        Some(q) if q.fract().abs() < 1e-9 => format!("{}", q.round() as i64),
        Some(q) => {
            let rounded = format!("{:.2}", q);
            rounded.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// Detail view of the current recipe
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeMarkup;

impl RecipeMarkup {
    fn ingredient(ingredient: &Ingredient, icons: &str) -> String {
        format!(
            r#"
          <li class="recipe__ingredient">
            <svg class="recipe__icon">
              <use href="{icons}#icon-check"></use>
            </svg>
            <div class="recipe__quantity">{quantity}</div>
            <div class="recipe__description">
              <span class="recipe__unit">{unit}</span>
              {description}
            </div>
          </li>"#,
            quantity = format_quantity(ingredient.quantity),
            unit = text(&ingredient.unit),
            description = text(&ingredient.description),
        )
    }
}

impl Markup for RecipeMarkup {
    type Data = Recipe;

    fn generate(&self, recipe: &Recipe, ctx: &RenderContext<'_>) -> String {
        let icons = attr(ctx.icons);
        let ingredients: String = recipe
            .ingredients
            .iter()
            .map(|i| Self::ingredient(i, &icons))
            .collect();
        let user_generated = if recipe.is_user_generated() { "" } else { "hidden" };
        let bookmark_icon = if recipe.bookmarked {
            "icon-bookmark-fill"
        } else {
            "icon-bookmark"
        };

        format!(
            r#"
      <figure class="recipe__fig">
        <img src="{image}" alt="{alt}" class="recipe__img" />
        <h1 class="recipe__title">
          <span>{title}</span>
        </h1>
      </figure>

      <div class="recipe__details">
        <div class="recipe__info">
          <svg class="recipe__info-icon">
            <use href="{icons}#icon-clock"></use>
          </svg>
          <span class="recipe__info-data recipe__info-data--minutes">{cooking_time}</span>
          <span class="recipe__info-text">minutes</span>
        </div>
        <div class="recipe__info">
          <svg class="recipe__info-icon">
            <use href="{icons}#icon-users"></use>
          </svg>
          <span class="recipe__info-data recipe__info-data--people">{servings}</span>
          <span class="recipe__info-text">servings</span>

          <div class="recipe__info-buttons">
            <button class="btn--tiny btn--update-servings" data-update-to="{fewer}">
              <svg>
                <use href="{icons}#icon-minus-circle"></use>
              </svg>
            </button>
            <button class="btn--tiny btn--update-servings" data-update-to="{more}">
              <svg>
                <use href="{icons}#icon-plus-circle"></use>
              </svg>
            </button>
          </div>
        </div>

        <div class="recipe__user-generated {user_generated}">
          <svg>
            <use href="{icons}#icon-user"></use>
          </svg>
        </div>
        <button class="btn--round btn--bookmark">
          <svg class="">
            <use href="{icons}#{bookmark_icon}"></use>
          </svg>
        </button>
      </div>

      <div class="recipe__ingredients">
        <h2 class="heading--2">Recipe ingredients</h2>
        <ul class="recipe__ingredient-list">{ingredients}
        </ul>
      </div>

      <div class="recipe__directions">
        <h2 class="heading--2">How to cook it</h2>
        <p class="recipe__directions-text">
          This recipe was carefully designed and tested by
          <span class="recipe__publisher">{publisher}</span>. Please check out
          directions at their website.
        </p>
        <a class="btn--small recipe__btn" href="{source}" target="_blank">
          <span>Directions</span>
        </a>
      </div>"#,
            image = attr(&recipe.image_url),
            alt = attr(&recipe.title),
            title = text(&recipe.title),
            cooking_time = recipe.cooking_time,
            servings = recipe.servings,
            fewer = i64::from(recipe.servings) - 1,
            more = i64::from(recipe.servings) + 1,
            publisher = text(&recipe.publisher),
            source = attr(&recipe.source_url),
        )
    }
}

impl View<RecipeMarkup> {
    /// Servings requested by a click on the element at pre-order index
    /// `element`, if it hit one of the servings buttons. May be zero or
    /// negative; callers decide whether to accept it.
    pub fn target_servings(&self, element: usize) -> Option<i64> {
        self.region()
            .closest(element, "btn--update-servings")?
            .attr("data-update-to")?
            .parse()
            .ok()
    }

    /// Whether a click on the element at pre-order index `element` hit the
    /// bookmark button
    pub fn is_bookmark_click(&self, element: usize) -> bool {
        self.region().closest(element, "btn--bookmark").is_some()
    }
}
