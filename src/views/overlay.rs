use html_escape::{encode_double_quoted_attribute, encode_text};

pub(super) fn spinner(icons: &str) -> String {
    format!(
        r#"
      <div class="spinner">
        <svg>
          <use href="{}#icon-loader"></use>
        </svg>
      </div>"#,
        encode_double_quoted_attribute(icons)
    )
}

pub(super) fn error(icons: &str, message: &str) -> String {
    format!(
        r#"
      <div class="error">
        <div>
          <svg>
            <use href="{}#icon-alert-triangle"></use>
          </svg>
        </div>
        <p>{}</p>
      </div>"#,
        encode_double_quoted_attribute(icons),
        encode_text(message)
    )
}

pub(super) fn message(icons: &str, message: &str) -> String {
    format!(
        r#"
      <div class="message">
        <div>
          <svg>
            <use href="{}#icon-smile"></use>
          </svg>
        </div>
        <p>{}</p>
      </div>"#,
        encode_double_quoted_attribute(icons),
        encode_text(message)
    )
}
