/// Join album and artist for the list's description line.
///
/// Missing or blank parts are dropped; the separator only appears when both
/// parts are present.
pub fn describe(album: Option<&str>, artist: Option<&str>) -> String {
    let parts: Vec<&str> = [album, artist]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    parts.join("⋅")
}
