use super::{Markup, RenderContext, View};
use crate::model::SearchState;
use html_escape::encode_double_quoted_attribute as attr;

/// Page navigation derived from the current search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn new(search: &SearchState, results_per_page: usize) -> Self {
        Pagination {
            current_page: search.current_page,
            total_pages: search.results.len().div_ceil(results_per_page.max(1)),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous_page(&self) -> Option<usize> {
        self.has_previous().then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.current_page + 1)
    }
}

/// Previous/next buttons labelled with the adjacent page numbers
#[derive(Debug, Clone, Copy)]
pub struct PaginationMarkup {
    pub results_per_page: usize,
}

impl Markup for PaginationMarkup {
    type Data = SearchState;

    fn generate(&self, search: &SearchState, ctx: &RenderContext<'_>) -> String {
        let pages = Pagination::new(search, self.results_per_page);
        let icons = attr(ctx.icons);

        let previous = pages.previous_page().map(|page| {
            format!(
                r#"
      <button data-goto="{page}" class="btn--inline pagination__btn--prev">
        <svg class="search__icon">
          <use href="{icons}#icon-arrow-left"></use>
        </svg>
        <span>Page {page}</span>
      </button>"#
            )
        });
        let next = pages.next_page().map(|page| {
            format!(
                r#"
      <button data-goto="{page}" class="btn--inline pagination__btn--next">
        <span>Page {page}</span>
        <svg class="search__icon">
          <use href="{icons}#icon-arrow-right"></use>
        </svg>
      </button>"#
            )
        });

        format!(
            "{}{}",
            previous.unwrap_or_default(),
            next.unwrap_or_default()
        )
    }
}

impl View<PaginationMarkup> {
    /// Page a click on the element at pre-order index `element` asks for:
    /// the `data-goto` of the nearest enclosing page button.
    pub fn target_page(&self, element: usize) -> Option<usize> {
        self.region()
            .closest(element, "btn--inline")?
            .attr("data-goto")?
            .parse()
            .ok()
    }

    /// Report the target page of a click to `handler`. Clicks outside the
    /// buttons are ignored. Returns whether the handler ran.
    pub fn handle_click<F: FnOnce(usize)>(&self, element: usize, handler: F) -> bool {
        match self.target_page(element) {
            Some(page) => {
                handler(page);
                true
            }
            None => false,
        }
    }
}
