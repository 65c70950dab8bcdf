use crate::models::catalog::CatalogBook;

pub const MAX_TITLE_CHARS: usize = 42;
pub const DEFAULT_LANGUAGE: &str = "en";

const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Surname of the first author: the part of the name before the first comma.
pub fn author_surname(book: &CatalogBook) -> String {
    match book.authors.first() {
        Some(author) => author
            .name
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => "Unknown".to_string(),
    }
}

pub fn short_title(title: &str) -> String {
    let title = title.replace('\r', "").replace('\n', " ");

    if title.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", truncated)
    } else {
        title
    }
}

pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect()
}

/// `"<surname> - <title> [<lang>].<code>"` with path-illegal characters removed.
pub fn download_filename(book: &CatalogBook, format_code: &str) -> String {
    let language = book
        .languages
        .as_ref()
        .and_then(|languages| languages.first())
        .map(String::as_str)
        .unwrap_or(DEFAULT_LANGUAGE);

    sanitize(&format!(
        "{} - {} [{}].{}",
        author_surname(book),
        short_title(&book.title),
        language,
        format_code
    ))
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987
/// UTF-8 parameter for the full name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect();

    if ascii == filename {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            ascii,
            urlencoding::encode(filename)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Person;

    fn book(title: &str, authors: &[&str], languages: Option<Vec<&str>>) -> CatalogBook {
        CatalogBook {
            id: 5200,
            title: title.to_string(),
            authors: authors
                .iter()
                .map(|name| Person {
                    name: name.to_string(),
                })
                .collect(),
            languages: languages.map(|l| l.into_iter().map(String::from).collect()),
            formats: Default::default(),
        }
    }

    #[test]
    fn composes_surname_title_and_language() {
        let b = book("Metamorphosis", &["Kafka, Franz"], Some(vec!["en"]));
        assert_eq!(download_filename(&b, "epub"), "Kafka - Metamorphosis [en].epub");
    }

    #[test]
    fn defaults_for_missing_author_and_language() {
        let b = book("Beowulf", &[], None);
        assert_eq!(download_filename(&b, "mobi"), "Unknown - Beowulf [en].mobi");

        let b = book("Beowulf", &[], Some(vec![]));
        assert_eq!(download_filename(&b, "pdf"), "Unknown - Beowulf [en].pdf");
    }

    #[test]
    fn name_without_comma_is_used_whole() {
        let b = book("Poems", &["Homer"], Some(vec!["el"]));
        assert_eq!(download_filename(&b, "text"), "Homer - Poems [el].text");
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let title = "a".repeat(60);
        let short = short_title(&title);
        assert_eq!(short, format!("{}...", "a".repeat(42)));
        assert_eq!(short.len(), 45);

        let exact = "b".repeat(42);
        assert_eq!(short_title(&exact), exact);
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(
            short_title("Alice's Adventures\r\nin Wonderland"),
            "Alice's Adventures in Wonderland"
        );
    }

    #[test]
    fn removes_illegal_characters_only() {
        let b = book(
            "Why? <Here> | \"There\" / A\\B*:",
            &["Dostoyevsky, Fyodor"],
            Some(vec!["ru"]),
        );
        let name = download_filename(&b, "epub");
        for c in ILLEGAL_CHARS {
            assert!(!name.contains(*c), "{:?} still contains {:?}", name, c);
        }
        assert_eq!(name, "Dostoyevsky - Why Here  There  AB [ru].epub");
    }

    #[test]
    fn keeps_non_ascii_letters() {
        let b = book("Die Verwandlung: Erzählung", &["Kafka, Franz"], Some(vec!["de"]));
        assert_eq!(
            download_filename(&b, "epub"),
            "Kafka - Die Verwandlung Erzählung [de].epub"
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "é".repeat(50);
        assert_eq!(short_title(&title), format!("{}...", "é".repeat(42)));
    }

    #[test]
    fn ascii_disposition_is_plain() {
        assert_eq!(
            content_disposition("84.epub"),
            "attachment; filename=\"84.epub\""
        );
    }

    #[test]
    fn non_ascii_disposition_carries_utf8_name() {
        let header = content_disposition("Čapek - R.U.R. [cs].epub");
        assert_eq!(
            header,
            "attachment; filename=\"apek - R.U.R. [cs].epub\"; filename*=UTF-8''%C4%8Capek%20-%20R.U.R.%20%5Bcs%5D.epub"
        );
    }
}
