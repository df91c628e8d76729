// ABOUTME: Integration tests for page extraction through the public API.
// ABOUTME: Checks hidden-content stripping, heading order and failed-fetch records.

use seokit_pages::{headings, visible_text, Heading, PageRecord};

#[test]
fn script_and_style_contents_never_leak() {
    let cases = [
        "<script>secret()</script><p>shown</p>",
        "<p>shown</p><style>.secret{}</style>",
        "<div>shown<script type=\"application/ld+json\">{\"secret\":1}</script></div>",
        "<body><noscript><img src=x alt=secret></noscript>shown</body>",
    ];
    for html in cases {
        let text = visible_text(html);
        assert_eq!(text, "shown", "input: {}", html);
    }
}

#[test]
fn headings_keep_document_order_across_nesting() {
    let html = r#"<header><h3>Menu</h3></header>
        <main><article><h1>Guide</h1><section><h2>Part A</h2><h4> </h4></section>
        <h2>Part B</h2></article></main><footer><h5>Footer</h5></footer>"#;
    let found = headings(html);
    assert_eq!(
        found,
        vec![
            Heading::new(3, "Menu"),
            Heading::new(1, "Guide"),
            Heading::new(2, "Part A"),
            Heading::new(2, "Part B"),
            Heading::new(5, "Footer"),
        ]
    );
    assert!(found.iter().all(|h| !h.text.trim().is_empty()));
}

#[test]
fn heading_text_excludes_empty_headings() {
    let page = PageRecord::from_html(
        "https://example.com/",
        "<h1>One</h1><h2></h2><h2>Two</h2>".to_string(),
    );
    assert_eq!(page.headings.len(), 2);
    assert_eq!(page.heading_text(), "One Two");
}
