use crate::models::view_model::HOME_PATH;

/// Maps a request path to the key a view is counted under.
///
/// Only the leading slash is removed; `/` and the empty path count as
/// [`HOME_PATH`].
pub fn view_key(request_path: &str) -> String {
    let key = request_path.strip_prefix('/').unwrap_or(request_path);

    if key.is_empty() {
        HOME_PATH.to_string()
    } else {
        key.to_string()
    }
}
