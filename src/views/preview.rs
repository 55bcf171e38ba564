use super::{Markup, RenderContext};
use crate::model::RecipePreview;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Markup for lists of recipe previews (search results, bookmarks).
///
/// The preview whose id matches the selected recipe gets the active link class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewMarkup;

impl PreviewMarkup {
    fn item(recipe: &RecipePreview, ctx: &RenderContext<'_>) -> String {
        let active = if ctx.current_id == Some(recipe.id.as_str()) {
            "preview__link--active"
        } else {
            ""
        };
        let user_generated = if recipe.key.is_some() { "" } else { "hidden" };

        format!(
            r##"
      <li class="preview">
        <a class="preview__link {active}" href="#{id}">
          <figure class="preview__fig">
            <img src="{image}" alt="{alt}" />
          </figure>
          <div class="preview__data">
            <h4 class="preview__title">{title}</h4>
            <p class="preview__publisher">{publisher}</p>
            <div class="preview__user-generated {user_generated}">
              <svg>
                <use href="{icons}#icon-user"></use>
              </svg>
            </div>
          </div>
        </a>
      </li>"##,
            id = attr(&recipe.id),
            image = attr(&recipe.image_url),
            alt = attr(&recipe.title),
            title = text(&recipe.title),
            publisher = text(&recipe.publisher),
            icons = attr(ctx.icons),
        )
    }
}

impl Markup for PreviewMarkup {
    type Data = [RecipePreview];

    fn generate(&self, data: &[RecipePreview], ctx: &RenderContext<'_>) -> String {
        data.iter().map(|recipe| Self::item(recipe, ctx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_markup;
    use crate::model::fixtures;

    fn ctx(current_id: Option<&str>) -> RenderContext<'_> {
        RenderContext {
            current_id,
            icons: "icons.svg",
        }
    }

    #[test]
    fn test_items_in_order_with_active_highlight() {
        let previews = vec![fixtures::preview("1"), fixtures::preview("2")];
        let nodes = parse_markup(&PreviewMarkup.generate(&previews, &ctx(Some("2"))));

        let links: Vec<_> = crate::dom::elements(&nodes)
            .into_iter()
            .filter(|e| e.has_class("preview__link"))
            .collect();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].attr("href"), Some("#1"));
        assert!(!links[0].has_class("preview__link--active"));
        assert!(links[1].has_class("preview__link--active"));
    }

    #[test]
    fn test_user_generated_marker() {
        let mut mine = fixtures::preview("1");
        mine.key = Some("k".to_string());
        let previews = vec![mine, fixtures::preview("2")];
        let nodes = parse_markup(&PreviewMarkup.generate(&previews, &ctx(None)));

        let markers: Vec<_> = crate::dom::elements(&nodes)
            .into_iter()
            .filter(|e| e.has_class("preview__user-generated"))
            .collect();
        assert!(!markers[0].has_class("hidden"));
        assert!(markers[1].has_class("hidden"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut preview = fixtures::preview("1");
        preview.title = "<b>Mac & Cheese</b>".to_string();
        let nodes = parse_markup(&PreviewMarkup.generate(&[preview], &ctx(None)));
        let title = crate::dom::elements(&nodes)
            .into_iter()
            .find(|e| e.has_class("preview__title"))
            .unwrap();
        assert_eq!(title.only_text(), Some("<b>Mac & Cheese</b>"));
    }
}
