use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::rating::word_to_rating;

static POD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article.product_pod").unwrap());
static STAR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.star-rating").unwrap());
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 a[title]").unwrap());
static PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.price_color").unwrap());

pub const NO_TITLE: &str = "(no title)";

/// One catalog item as found on the page, before price normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub title: String,
    pub raw_price: Option<String>,
    pub rating: Option<u8>,
}

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Walk every product pod in source order. Items missing a title, price or
/// rating still yield a record, with the placeholder title or `None`.
pub fn extract(doc: &Html) -> impl Iterator<Item = BookRecord> + '_ {
    doc.select(&POD_SEL).map(extract_pod)
}

fn extract_pod(pod: ElementRef<'_>) -> BookRecord {
    let rating = word_to_rating(pod.select(&STAR_SEL).next());

    let title = pod
        .select(&TITLE_SEL)
        .next()
        .and_then(|a| a.value().attr("title"))
        .map(str::to_string)
        .unwrap_or_else(|| NO_TITLE.to_string());

    let raw_price = pod
        .select(&PRICE_SEL)
        .next()
        .map(|p| p.text().map(str::trim).collect::<String>())
        .filter(|t| !t.is_empty());

    BookRecord { title, raw_price, rating }
}
