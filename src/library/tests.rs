use super::display::describe;
use super::{FormatTag, Track};
use lofty::file::FileType;
use std::path::PathBuf;

fn track(album: Option<&str>, artist: Option<&str>) -> Track {
    Track {
        path: PathBuf::from("/tmp/song.ogg"),
        title: "Song".into(),
        artist: artist.map(Into::into),
        album: album.map(Into::into),
        format: FormatTag::Ogg,
        duration: None,
    }
}

#[test]
fn describe_joins_album_and_artist() {
    assert_eq!(describe(Some("Album"), Some("Artist")), "Album⋅Artist");
    assert_eq!(describe(Some("  Album "), None), "Album");
    assert_eq!(describe(None, Some("Artist")), "Artist");
    assert_eq!(describe(Some(" "), Some("")), "");
}

#[test]
fn track_description_uses_album_then_artist() {
    assert_eq!(track(Some("Kid A"), Some("Radiohead")).description(), "Kid A⋅Radiohead");
    assert_eq!(track(None, None).description(), "");
}

#[test]
fn format_tag_maps_lofty_file_types() {
    assert_eq!(FormatTag::from_file_type(FileType::Mpeg), FormatTag::Mp3);
    assert_eq!(FormatTag::from_file_type(FileType::Vorbis), FormatTag::Ogg);
    assert_eq!(FormatTag::from_file_type(FileType::Opus), FormatTag::Ogg);
    assert_eq!(FormatTag::from_file_type(FileType::Speex), FormatTag::Ogg);
    assert_eq!(FormatTag::from_file_type(FileType::Flac), FormatTag::Flac);
    assert_eq!(FormatTag::from_file_type(FileType::Wav), FormatTag::Wav);
    assert_eq!(FormatTag::from_file_type(FileType::Aiff), FormatTag::Wav);
}
