use sitechat::domain::{UrlValidationError, WebUrl};

#[test]
fn given_empty_input_when_parsing_then_reports_missing() {
    assert_eq!(WebUrl::parse(""), Err(UrlValidationError::Missing));
    assert_eq!(WebUrl::parse("   "), Err(UrlValidationError::Missing));
}

#[test]
fn given_plain_text_when_parsing_then_reports_invalid() {
    assert_eq!(WebUrl::parse("not a url"), Err(UrlValidationError::Invalid));
}

#[test]
fn given_missing_scheme_when_parsing_then_reports_invalid() {
    assert_eq!(
        WebUrl::parse("example.com/page"),
        Err(UrlValidationError::Invalid)
    );
}

#[test]
fn given_youtube_urls_when_parsing_then_reports_unsupported() {
    for raw in [
        "https://www.youtube.com/watch?v=abc",
        "https://YOUTUBE.COM/watch?v=abc",
        "https://youtu.be/abc",
    ] {
        assert_eq!(WebUrl::parse(raw), Err(UrlValidationError::Unsupported));
    }
}

#[test]
fn given_surrounding_whitespace_when_parsing_then_accepts_trimmed_url() {
    let url = WebUrl::parse("  http://example.org/docs  ").unwrap();

    assert_eq!(url.as_str(), "http://example.org/docs");
    assert_eq!(url.host(), "example.org");
}

#[test]
fn given_validation_errors_when_displayed_then_show_user_messages() {
    assert_eq!(
        UrlValidationError::Missing.to_string(),
        "Please provide the information to get started"
    );
    assert_eq!(
        UrlValidationError::Invalid.to_string(),
        "Please enter a valid website URL"
    );
}

#[test]
fn given_scheme_without_double_slash_when_parsing_then_reports_invalid() {
    for raw in ["http:example.com", "https:/example.com/x", "https:example.com/path"] {
        assert_eq!(WebUrl::parse(raw), Err(UrlValidationError::Invalid), "{raw}");
    }
}

#[test]
fn given_single_label_host_when_parsing_then_reports_invalid() {
    assert_eq!(
        WebUrl::parse("http://intranet"),
        Err(UrlValidationError::Invalid)
    );
    assert_eq!(
        WebUrl::parse("https://example./page"),
        Err(UrlValidationError::Invalid)
    );
}

#[test]
fn given_ip_address_or_upper_case_scheme_when_parsing_then_accepts() {
    assert!(WebUrl::parse("http://192.168.1.10:8080/status").is_ok());
    assert!(WebUrl::parse("HTTPS://Example.com/Docs").is_ok());
}
