/// Derive the URL slug for a post title.
///
/// The title is lowercased, every character that is neither an ASCII letter,
/// digit nor whitespace is dropped, and each remaining run of whitespace
/// becomes a single `-`. Runs at either end are kept, so `" Hi "` gives
/// `"-hi-"`. Unlike a regex `\w` class, `_` is dropped as well, so a slug
/// only ever holds `[a-z0-9-]`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_gap = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_gap = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_gap {
                slug.push('-');
                pending_gap = false;
            }
            slug.push(ch);
        }
    }

    if pending_gap {
        slug.push('-');
    }

    slug
}
