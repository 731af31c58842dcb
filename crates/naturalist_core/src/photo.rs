//! Photo URL normalization.

const THUMBNAIL: &str = "square";
const ORIGINAL: &str = "original";

/// Rewrite a catalog thumbnail URL to point at the original-resolution file.
///
/// The catalog serves every size of a photo from the same directory and only
/// varies the file stem (`square.jpg`, `medium.jpg`, `original.jpg`), so the
/// upgrade is a substitution in the last path segment. Query strings and the
/// rest of the path are left untouched. URLs that do not name the thumbnail
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use naturalist_core::upgrade_photo_url;
///
/// assert_eq!(
///     upgrade_photo_url("https://static.example.org/photos/9/square.jpg?1612"),
///     "https://static.example.org/photos/9/original.jpg?1612",
/// );
/// ```
pub fn upgrade_photo_url(url: &str) -> String {
    let (head, file) = match url.rfind('/') {
        Some(slash) => url.split_at(slash + 1),
        None => ("", url),
    };
    match file.strip_prefix(THUMBNAIL) {
        Some(rest) => format!("{head}{ORIGINAL}{rest}"),
        None => url.to_string(),
    }
}
