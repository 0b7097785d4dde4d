//! Server-rendered HTML for the recommendation page.

use bookrec_core::Recommendation;
use std::fmt::Write;

const STYLE: &str = r#"
body { background-color: #f7f7f7; font-family: 'Helvetica', sans-serif; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 24px; }
aside { position: fixed; left: 0; top: 0; width: 180px; padding: 16px; color: #555; font-size: 14px; }
.title { font-size: 36px; font-weight: bold; color: #2d2d2d; text-align: center; }
.subheader { font-size: 18px; color: #555; text-align: center; }
.cards { display: flex; gap: 12px; justify-content: center; }
.book-card { background-color: #fff; padding: 10px; border-radius: 8px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); text-align: center; transition: transform 0.3s; width: 160px; }
.book-card:hover { transform: translateY(-10px); }
.book-image { border-radius: 8px; width: 150px; height: 220px; object-fit: cover; }
.author { color: #777; font-size: 13px; }
.button { background-color: #FF6347; color: white; padding: 12px 30px; border-radius: 50px; font-size: 18px; font-weight: bold; border: none; cursor: pointer; }
.button:hover { background-color: #FF4500; }
.warning { background: #fff4e5; border-left: 4px solid #ff9800; padding: 8px 12px; }
.success { background: #edf7ed; border-left: 4px solid #4caf50; padding: 8px 12px; }
.footer { font-size: 14px; text-align: center; color: #777; }
"#;

/// A one-line status shown above or below the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Success(String),
}

/// Everything the page needs to render
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub titles: &'a [String],
    pub selected: Option<&'a str>,
    pub cards: Vec<Recommendation>,
    pub notice: Option<Notice>,
    pub feedback_notice: Option<Notice>,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_notice(out: &mut String, notice: &Notice) {
    let (class, text) = match notice {
        Notice::Warning(t) => ("warning", t),
        Notice::Success(t) => ("success", t),
    };
    let _ = write!(out, "<p class='{}'>{}</p>", class, escape_html(text));
}

/// Only absolute http(s) URLs may end up in `href`/`src`; anything else
/// (e.g. `javascript:` or `data:`) is dropped.
fn web_url(url: &str) -> &str {
    let url = url.trim();
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url
    } else {
        ""
    }
}

pub fn render_card(card: &Recommendation) -> String {
    let author = card
        .author
        .as_deref()
        .map(|a| format!("<div class='author'>{}</div>", escape_html(a)))
        .unwrap_or_default();
    format!(
        "<div class='book-card'><a href='{link}' target='_blank' rel='noopener'><img class='book-image' src='{poster}' alt='{title}' /></a><div>{title}</div>{author}<div>⭐ {rating}</div></div>",
        link = match web_url(&card.link) {
            "" => "#".to_string(),
            url => escape_html(url),
        },
        poster = escape_html(web_url(&card.poster_url)),
        title = escape_html(&card.title),
        author = author,
        rating = card.rating,
    )
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html><html lang='en'><head><meta charset='utf-8'>");
    out.push_str("<title>Book Recommender System</title>");
    let _ = write!(out, "<style>{}</style></head><body>", STYLE);
    let _ = write!(
        out,
        "<aside><h3>bookrec</h3><p>v{}</p><p>Item-based recommendations from reader ratings.</p></aside>",
        env!("CARGO_PKG_VERSION")
    );
    out.push_str("<main>");
    out.push_str("<div class='title'>📚 Book Recommender System 📚</div>");
    out.push_str("<div class='subheader'>Welcome to the Book Recommender System! 📖</div>");
    out.push_str("<p>Select a book from the dropdown menu and we'll recommend similar books for you. Happy reading! 📚</p>");

    out.push_str("<form method='get' action='/'>");
    out.push_str("<label for='title'>🔍 Type or select a book from the dropdown</label><br>");
    out.push_str("<select id='title' name='title'>");
    for title in view.titles {
        let selected = if view.selected == Some(title.as_str()) { " selected" } else { "" };
        let escaped = escape_html(title);
        let _ = write!(out, "<option value='{0}'{1}>{0}</option>", escaped, selected);
    }
    out.push_str("</select> ");
    out.push_str("<button class='button' type='submit' title='Get book recommendations based on your choice'>Show Recommendations 🚀</button>");
    out.push_str("</form>");

    if let Some(notice) = &view.notice {
        render_notice(&mut out, notice);
    }

    if !view.cards.is_empty() {
        out.push_str("<h3>Here are some book recommendations for you:</h3><div class='cards'>");
        for card in &view.cards {
            out.push_str(&render_card(card));
        }
        out.push_str("</div><hr>");
        out.push_str("<p>Enjoyed the recommendations? Let us know your thoughts! 💬 Or feel free to try another book! 📚</p>");
    }

    if !view.cards.is_empty() || view.feedback_notice.is_some() {
        out.push_str("<form method='post' action='/feedback'>");
        if let Some(selected) = view.selected {
            let _ = write!(out, "<input type='hidden' name='title' value='{}'>", escape_html(selected));
        }
        out.push_str("<label for='comment'>Your Comments:</label><br>");
        out.push_str("<textarea id='comment' name='comment' rows='4' cols='60' placeholder='Enter your thoughts about the recommendations...'></textarea><br>");
        out.push_str("<button type='submit'>Submit Feedback</button></form>");
        if let Some(notice) = &view.feedback_notice {
            render_notice(&mut out, notice);
        }
        out.push_str("<div class='footer'>Thanks for using the Book Recommender! 🙏</div>");
    }

    out.push_str("</main></body></html>");
    out
}
