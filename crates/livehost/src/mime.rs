//! Extension to MIME type lookup.
//!
//! Files whose extension is not in the table are refused (403), so the table
//! doubles as the allow-list of servable content.

/// Resolves a lowercase file extension (without the dot) to a MIME type.
pub trait MimeLookup: Send + Sync {
    fn mime_type(&self, extension: &str) -> Option<&str>;
}

/// Built-in table of common web and document types.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeTable;

impl MimeLookup for MimeTable {
    fn mime_type(&self, extension: &str) -> Option<&str> {
        MIME_TYPES.get(extension).copied()
    }
}

static MIME_TYPES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "htm" => "text/html",
    "html" => "text/html",
    "js" => "text/javascript",
    "css" => "text/css",
    "ico" => "image/vnd.microsoft.icon",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "bmp" => "image/bmp",
    "json" => "application/json",
    "svg" => "image/svg+xml",
    "tif" => "image/tiff",
    "tiff" => "image/tiff",
    "swf" => "application/x-shockwave-flash",
    "map" => "text/javascript",
    "aac" => "audio/aac",
    "abw" => "application/x-abiword",
    "arc" => "application/x-freearc",
    "avi" => "video/x-msvideo",
    "azw" => "application/vnd.amazon.ebook",
    "bin" => "application/octet-stream",
    "bz" => "application/x-bzip",
    "bz2" => "application/x-bzip2",
    "csh" => "application/x-csh",
    "csv" => "text/csv",
    "doc" => "application/msword",
    "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "eot" => "application/vnd.ms-fontobject",
    "epub" => "application/epub+zip",
    "gz" => "application/gzip",
    "ics" => "text/calendar",
    "jar" => "application/java-archive",
    "jsonld" => "application/ld+json",
    "mid" => "audio/midi audio/x-midi",
    "midi" => "audio/midi audio/x-midi",
    "mjs" => "text/javascript",
    "mp3" => "audio/mpeg",
    "mpeg" => "video/mpeg",
    "mpkg" => "application/vnd.apple.installer+xml",
    "odp" => "application/vnd.oasis.opendocument.presentation",
    "ods" => "application/vnd.oasis.opendocument.spreadsheet",
    "odt" => "application/vnd.oasis.opendocument.text",
    "oga" => "audio/ogg",
    "ogv" => "video/ogg",
    "ogx" => "application/ogg",
    "opus" => "audio/opus",
    "otf" => "font/otf",
    "pdf" => "application/pdf",
    "ppt" => "application/vnd.ms-powerpoint",
    "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "rar" => "application/x-rar-compressed",
    "rtf" => "application/rtf",
    "sh" => "application/x-sh",
    "tar" => "application/x-tar",
    "ts" => "video/mp2t",
    "ttf" => "font/ttf",
    "txt" => "text/plain",
    "vsd" => "application/vnd.visio",
    "wav" => "audio/wav",
    "weba" => "audio/webm",
    "webm" => "video/webm",
    "webp" => "image/webp",
    "woff" => "font/woff",
    "woff2" => "font/woff2",
    "xhtml" => "application/xhtml+xml",
    "xls" => "application/vnd.ms-excel",
    "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "xml" => "application/xml",
    "xul" => "application/vnd.mozilla.xul+xml",
    "zip" => "application/zip",
    "3gp" => "video/3gpp",
    "3g2" => "video/3gpp2",
    "7z" => "application/x-7z-compressed",
    "wasm" => "application/wasm",
};
