/// Canonical string a client signs when posting without a tip on another
/// account's behalf: the title alone, or the title with the media entries
/// appended comma-joined.
pub fn post_without_tip_payload(title: &str, media: &[String]) -> String {
    if media.is_empty() {
        title.to_string()
    } else {
        format!("{}{}", title, media.join(","))
    }
}
