use scraper::ElementRef;

/// Star words in lookup order. The first word present in the class list wins.
const RATING_WORDS: [(&str, u8); 5] = [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)];

/// Read a star rating off an element's class list (`<p class="star-rating Three">`).
pub fn word_to_rating(tag: Option<ElementRef<'_>>) -> Option<u8> {
    rating_from_classes(tag?.value().classes())
}

pub fn rating_from_classes<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Option<u8> {
    let classes: Vec<String> = tokens.into_iter().map(capitalize).collect();
    RATING_WORDS
        .iter()
        .find(|(word, _)| classes.iter().any(|c| c == word))
        .map(|&(_, value)| value)
}

/// `tHREE` -> `Three`
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
