use rs_opengraph::tree::HtmlPage;
use rs_opengraph::{build_tags, Error, HostEnvironment, Options, PageContext, DEFAULT_DESCRIPTION_LENGTH};

#[test]
fn options_default_values_are_sensible() {
    let options = Options::default();
    assert!(options.site_url.is_none());
    assert_eq!(options.description_length, DEFAULT_DESCRIPTION_LENGTH);
    assert!(options.image.is_none());
    assert!(options.image_alt.is_none());
    assert!(!options.use_first_image);
    assert_eq!(options.og_type, "website");
    assert!(options.site_name.is_none());
    assert!(options.custom_meta_tags.is_empty());
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        og_type: "article".to_string(),
        site_url: Some("https://example.com/".to_string()),
        ..Options::default()
    };

    assert_eq!(options.og_type, "article");
    assert_eq!(options.description_length, DEFAULT_DESCRIPTION_LENGTH);
    assert_eq!(options.site_url.as_deref(), Some("https://example.com/"));
}

#[test]
fn options_from_json_drive_tag_assembly() {
    let options = Options::from_json(
        r#"{
            "site_url": "https://docs.example.org/",
            "description_length": 12,
            "type": "article",
            "site_name": "Example"
        }"#,
    )
    .expect("expected Ok(_)");

    let page = HtmlPage::parse("<body><p>Long enough to be cut short.</p></body>");
    let tags = build_tags(
        &PageContext::new("index", "Home"),
        &page.root(),
        &options,
        &HostEnvironment::default(),
    )
    .expect("expected Ok(_)");

    assert_eq!(tags.get("og:type"), Some("article"));
    assert_eq!(tags.get("og:site_name"), Some("Example"));
    assert_eq!(tags.get("og:description"), Some("Long enou..."));
}

#[test]
fn options_from_json_rejects_malformed_input() {
    let err = Options::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn non_positive_description_length_in_json_falls_back() {
    let options = Options::from_json(r#"{"description_length": 0}"#).expect("expected Ok(_)");
    assert_eq!(options.description_length, DEFAULT_DESCRIPTION_LENGTH);

    let options = Options::from_json(r#"{"description_length": "75"}"#).expect("expected Ok(_)");
    assert_eq!(options.description_length, 75);
}
