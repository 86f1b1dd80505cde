//! Extension-based compression classification.

use bucketwise_core::{CompressionScheme, ObjectInfo};

/// Extensions of formats that are already compressed or lossy.
const ALREADY_COMPRESSED: &[&str] = &[
    "h264", "zstd", "zst", "7zip", "7z", "gz", "gzip", "zip", "tar", "rar", "bz2", "bzip2", "tgz",
    "xz", "lz4", "snappy", "jpeg", "jpg", "webp", "mp3",
];

/// Extensions that compress well, and the scheme to use for each.
const COMPRESSIBLE: &[(&[&str], CompressionScheme)] = &[
    (
        &[
            "txt", "log", "md", "yml", "yaml", "xml", "json", "csv", "conf", "py", "java", "go",
            "js", "rb", "pl", "php", "html", "css", "scss", "less", "svg", "pdf", "par",
        ],
        CompressionScheme::Gzip,
    ),
    (&["png", "gif", "bmp", "heif", "heic"], CompressionScheme::Jpeg),
    (&["wav", "aac", "ogg", "wma"], CompressionScheme::Mp3),
    (&["mp4", "mov", "avi", "mkv"], CompressionScheme::H264),
    (&["avro", "parquet", "orc"], CompressionScheme::Snappy),
];

/// How an object relates to compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionClass {
    /// Stored in a compressed format already.
    AlreadyCompressed,
    /// Could be compressed with the given scheme.
    Compressible(CompressionScheme),
    /// Unknown or incompressible format.
    Unsupported,
}

/// Classify a file extension (without the dot, any case).
///
/// The denylist is checked first so an extension is never both.
pub fn classify_extension(extension: &str) -> CompressionClass {
    let ext = extension.to_ascii_lowercase();
    if ALREADY_COMPRESSED.contains(&ext.as_str()) {
        return CompressionClass::AlreadyCompressed;
    }

    COMPRESSIBLE
        .iter()
        .find(|(extensions, _)| extensions.contains(&ext.as_str()))
        .map_or(CompressionClass::Unsupported, |(_, scheme)| {
            CompressionClass::Compressible(*scheme)
        })
}

/// Classify an object by its key's extension.
pub fn classify_object(object: &ObjectInfo) -> CompressionClass {
    object
        .extension()
        .map_or(CompressionClass::Unsupported, classify_extension)
}
