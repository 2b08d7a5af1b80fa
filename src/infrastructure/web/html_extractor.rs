use scraper::{ElementRef, Html, Node, Selector};

/// Containers tried in order when looking for the main content.
const CONTENT_SELECTORS: [&str; 5] = ["main", "article", "[role='main']", "#content", "body"];

/// Subtrees whose text never reaches the summary.
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "svg"];

/// Page chrome, dropped unless it belongs to an article or section.
const CHROME_ELEMENTS: [&str; 4] = ["nav", "header", "footer", "aside"];

const SECTIONING_ELEMENTS: [&str; 2] = ["article", "section"];

const PARAGRAPH_ELEMENTS: [&str; 14] = [
    "p", "div", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre",
    "table", "ul",
];

const LINE_ELEMENTS: [&str; 4] = ["br", "li", "tr", "dt"];

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedHtml {
    pub title: Option<String>,
    pub text: String,
}

pub fn extract_html_text(html: &str) -> ExtractedHtml {
    let document = Html::parse_document(html);

    let title = Selector::parse("title").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    });

    let root = CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    ExtractedHtml {
        title,
        text: collect_visible_text(root),
    }
}

fn collect_visible_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    let root_in_section = SECTIONING_ELEMENTS.contains(&root.value().name());

    for node in root.descendants() {
        // The node itself followed by its ancestors, stopping below `root`.
        let chain: Vec<&Node> = std::iter::once(node)
            .chain(node.ancestors())
            .take_while(|n| n.id() != root.id())
            .map(|n| n.value())
            .collect();
        if is_hidden(&chain, root_in_section) {
            continue;
        }

        if let Some(element) = node.value().as_element() {
            let name = element.name();
            if PARAGRAPH_ELEMENTS.contains(&name) {
                out.push_str("\n\n");
            } else if LINE_ELEMENTS.contains(&name) {
                out.push('\n');
            }
        } else if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }

    out
}

fn is_hidden(chain: &[&Node], root_in_section: bool) -> bool {
    chain.iter().enumerate().any(|(idx, node)| {
        let Some(name) = node.as_element().map(|e| e.name()) else {
            return false;
        };
        if SKIPPED_ELEMENTS.contains(&name) {
            return true;
        }
        CHROME_ELEMENTS.contains(&name)
            && !root_in_section
            && !chain[idx + 1..].iter().any(|above| {
                above
                    .as_element()
                    .is_some_and(|e| SECTIONING_ELEMENTS.contains(&e.name()))
            })
    })
}
