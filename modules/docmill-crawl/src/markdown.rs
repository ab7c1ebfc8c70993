use spider_transformations::transformation::content::{
    transform_content_input, ReturnFormat, TransformConfig, TransformInput,
};
use url::Url;

/// Reduce a fetched page to its main content and render it as markdown.
///
/// Runs Readability over the document so navigation, boilerplate, and
/// script/style content fall away; images and inline SVG are filtered out
/// of the result. The base URL, when known, lets relative links resolve.
pub fn page_markdown(html: &str, base: Option<&Url>) -> String {
    let input = TransformInput {
        content: html.as_bytes(),
        url: base,
        encoding: None,
        screenshot_bytes: None,
        selector_config: None,
        ignore_tags: None,
    };

    transform_content_input(
        input,
        &TransformConfig {
            return_format: ReturnFormat::Markdown,
            readability: true,
            main_content: true,
            clean_html: true,
            filter_images: true,
            filter_svg: true,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_prose_survives_conversion() {
        let html = "<html><head><title>T</title></head><body><article><h1>Title</h1>\
            <p>hello world, this is the main article body with enough prose to be \
            recognised as the primary content of the page.</p></article></body></html>";
        let base = Url::parse("https://example.com/").unwrap();
        let md = page_markdown(html, Some(&base));
        assert!(md.contains("hello world"));
    }

    #[test]
    fn script_content_is_discarded() {
        let html = "<html><body><article><p>visible paragraph text that should \
            survive the markdown conversion of this small document.</p>\
            <script>var hidden = 1;</script></article></body></html>";
        let md = page_markdown(html, None);
        assert!(md.contains("visible paragraph"));
        assert!(!md.contains("var hidden"));
    }
}
