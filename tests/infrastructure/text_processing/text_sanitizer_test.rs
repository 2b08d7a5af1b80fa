use sitechat::infrastructure::text_processing::sanitize_page_text;

#[test]
fn given_text_with_fi_ligature_when_sanitizing_then_decomposes_to_fi() {
    assert_eq!(sanitize_page_text("ﬁnding the ﬁle"), "finding the file");
}

#[test]
fn given_text_with_excessive_newlines_when_sanitizing_then_collapses_to_paragraph_breaks() {
    let input = "paragraph one\n\n\n\n\nparagraph two";
    assert_eq!(sanitize_page_text(input), "paragraph one\n\nparagraph two");
}

#[test]
fn given_text_with_redundant_spaces_when_sanitizing_then_collapses_to_single_space() {
    assert_eq!(sanitize_page_text("hello    world \t test"), "hello world test");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_page_text("   \n\n  "), "");
}

#[test]
fn given_text_with_hyphenated_line_break_when_sanitizing_then_merges_word() {
    assert_eq!(
        sanitize_page_text("This is a process-\ning step"),
        "This is a processing step"
    );
}

#[test]
fn given_zero_width_characters_when_sanitizing_then_removes_them() {
    assert_eq!(sanitize_page_text("zero\u{200B}width\u{FEFF}"), "zerowidth");
}

#[test]
fn given_whitespace_indented_lines_when_sanitizing_then_keeps_single_line_breaks() {
    let input = "   first line  \n\t second line\n\n\n  next paragraph ";
    assert_eq!(
        sanitize_page_text(input),
        "first line\nsecond line\n\nnext paragraph"
    );
}
