#[cfg(test)]
mod integration_tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::{HttpOptions, SourceKind, TranslatorConfig};
    use crate::errors::TranslatorError;
    use crate::fetch::HttpFetcher;
    use crate::schema::{check_source, FileFormat, FontStyle, SourceFile};
    use crate::translators::TranslatorFactory;

    fn translator_config(kind: SourceKind, endpoint: String) -> TranslatorConfig {
        let mut config = TranslatorConfig::new(kind);
        config.endpoint = Some(endpoint);
        config
    }

    async fn translate(config: &TranslatorConfig) -> Result<SourceFile, TranslatorError> {
        let fetcher = HttpFetcher::new(&HttpOptions::default()).unwrap();
        TranslatorFactory::create_translator(config, &fetcher)
            .translate()
            .await
    }

    fn assert_schema_valid(source: &SourceFile) {
        let value = serde_json::to_value(source).unwrap();
        let violations = check_source(&value);
        assert!(violations.is_empty(), "unexpected violations: {:?}", violations);
    }

    #[tokio::test]
    async fn test_google_fonts_translation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webfonts/v1/webfonts"))
            .and(query_param("key", "test-key"))
            .and(query_param("sort", "popularity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "webfonts#webfontList",
                "items": [
                    {
                        "family": "Roboto",
                        "variants": ["regular", "italic", "700"],
                        "subsets": ["latin", "cyrillic"],
                        "category": "sans-serif",
                        "version": "v30",
                        "lastModified": "2024-05-02",
                        "files": {
                            "regular": "http://fonts.gstatic.com/s/roboto/v30/regular.ttf",
                            "700": "http://fonts.gstatic.com/s/roboto/v30/bold.ttf"
                        }
                    },
                    {
                        "family": "Lobster",
                        "variants": ["regular"],
                        "subsets": ["latin"],
                        "category": "display",
                        "files": {}
                    },
                    {
                        "family": "Ignored By Limit",
                        "variants": ["regular"]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let mut config = translator_config(
            SourceKind::GoogleFonts,
            format!("{}/webfonts/v1/webfonts", server.uri()),
        );
        config.api_key = Some("test-key".to_string());
        config.limit = Some(2);

        let source = translate(&config).await.unwrap();
        assert_schema_valid(&source);
        assert_eq!(source.source_info.name, "Google Fonts");
        assert_eq!(source.source_info.total_fonts, 2);

        let roboto = &source.fonts["google.roboto"];
        assert_eq!(roboto.variants.len(), 3);
        assert_eq!(roboto.categories, vec!["Sans Serif"]);
        assert_eq!(
            roboto.variants[0].files[&FileFormat::Ttf],
            "https://fonts.gstatic.com/s/roboto/v30/regular.ttf"
        );
        assert_eq!(roboto.variants[1].style, FontStyle::Italic);

        let lobster = &source.fonts["google.lobster"];
        assert!(lobster.variants[0].files[&FileFormat::Ttf].starts_with("https://raw.githubusercontent.com"));
    }

    #[tokio::test]
    async fn test_google_fonts_requires_api_key() {
        let mut config = translator_config(SourceKind::GoogleFonts, "http://127.0.0.1:9".to_string());
        config.api_key_env = Some("FONTGET_SOURCES_TEST_KEY_THAT_IS_NEVER_SET".to_string());

        let err = translate(&config).await.unwrap_err();
        match err {
            TranslatorError::MissingApiKey { env_var } => {
                assert_eq!(env_var, "FONTGET_SOURCES_TEST_KEY_THAT_IS_NEVER_SET");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_nerd_fonts_translation() {
        let server = MockServer::start().await;
        let download = "https://github.com/ryanoasis/nerd-fonts/releases/download/v3.2.1";
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "tag_name": "v3.2.1",
                    "published_at": "2024-07-07T12:00:00Z",
                    "assets": [
                        { "name": "FiraCode.zip", "browser_download_url": format!("{}/FiraCode.zip", download) },
                        { "name": "FiraCode.tar.xz", "browser_download_url": format!("{}/FiraCode.tar.xz", download) },
                        { "name": "JetBrainsMono.zip", "browser_download_url": format!("{}/JetBrainsMono.zip", download) },
                        { "name": "readme.md", "browser_download_url": format!("{}/readme.md", download) }
                    ]
                },
                { "tag_name": "v3.2.0", "assets": [] }
            ])))
            .mount(&server)
            .await;

        let config = translator_config(SourceKind::NerdFonts, format!("{}/releases", server.uri()));
        let source = translate(&config).await.unwrap();
        assert_schema_valid(&source);
        assert_eq!(source.fonts.len(), 2);

        let fira = &source.fonts["nerd.fira-code"];
        assert_eq!(fira.version, "3.2.1");
        assert_eq!(fira.variants.len(), 1);
        assert!(fira.variants[0].files[&FileFormat::Ttf].ends_with("FiraCode.zip"));
    }

    #[tokio::test]
    async fn test_nerd_fonts_without_releases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let config = translator_config(SourceKind::NerdFonts, server.uri());
        let err = translate(&config).await.unwrap_err();
        assert!(matches!(err, TranslatorError::NoReleases { .. }));
    }

    #[tokio::test]
    async fn test_font_squirrel_translation_with_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fontlist/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "family_name": "Open Sans",
                    "family_urlname": "open-sans",
                    "classification": "Sans Serif",
                    "foundry_name": "Ascender Fonts",
                    "date_added": "2011-01-01 00:00:00"
                },
                {
                    "family_name": "Broken Details",
                    "family_urlname": "broken-details",
                    "classification": "Display"
                },
                { "family_name": "No Url Name" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/familyinfo/open-sans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "filename": "OpenSans-Regular.ttf", "style_name": "Regular" },
                { "filename": "OpenSans-Bold.otf", "style_name": "Bold" }
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/familyinfo/broken-details"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut config = translator_config(SourceKind::FontSquirrel, server.uri());
        config.fetch_details = true;

        let source = translate(&config).await.unwrap();
        assert_schema_valid(&source);
        assert_eq!(source.fonts.len(), 2);
        assert_eq!(
            source.source_info.api_endpoint.as_deref(),
            Some(format!("{}/fontlist/all", server.uri()).as_str())
        );

        let open_sans = &source.fonts["squirrel.open-sans"];
        assert_eq!(open_sans.foundry, "Ascender Fonts");
        assert_eq!(open_sans.variants.len(), 2);
        assert_eq!(open_sans.variants[1].weight, 700);

        let broken = &source.fonts["squirrel.broken-details"];
        assert_eq!(broken.variants.len(), 1);
        assert_eq!(
            broken.variants[0].files[&FileFormat::Ttf],
            "https://www.fontsquirrel.com/fontfacekit/broken-details"
        );
    }

    #[tokio::test]
    async fn test_open_foundry_translation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/sheet.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "font-name": "Manrope",
                    "font-download-link": "https://example.com/Manrope.zip",
                    "info-weight": 400,
                    "info-license": "OFL"
                },
                {
                    "font-name": "Manrope",
                    "font-download-link": "https://example.com/Manrope-Italic.ttf",
                    "info-weight": "700",
                    "info-style": "Italic"
                },
                { "font-name": "Nowhere", "font-download-link": "not a link" },
                "not a row"
            ])))
            .mount(&server)
            .await;

        let config = translator_config(
            SourceKind::OpenFoundry,
            format!("{}/data/sheet.json", server.uri()),
        );
        let source = translate(&config).await.unwrap();
        assert_schema_valid(&source);
        assert_eq!(source.fonts.len(), 1);

        let manrope = &source.fonts["openfoundry.manrope"];
        assert_eq!(manrope.popularity, None);
        assert_eq!(manrope.variants.len(), 2);
        assert_eq!(manrope.variants[1].style, FontStyle::Italic);
    }

    #[tokio::test]
    async fn test_open_foundry_rejects_non_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "fonts": [] })))
            .mount(&server)
            .await;

        let config = translator_config(SourceKind::OpenFoundry, server.uri());
        let err = translate(&config).await.unwrap_err();
        assert!(matches!(err, TranslatorError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_provider_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let config = translator_config(SourceKind::NerdFonts, server.uri());
        let err = translate(&config).await.unwrap_err();
        assert!(err.to_string().contains("502"));
        assert!(matches!(err, TranslatorError::Status { status: 502, .. }));
    }
}
