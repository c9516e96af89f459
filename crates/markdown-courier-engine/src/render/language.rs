/// Languages the publishing surface highlights without rasterizing.
pub const NATIVE_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "bash",
    "python",
    "java",
    "c",
    "cpp",
    "csharp",
    "go",
    "ruby",
    "swift",
    "kotlin",
    "dart",
    "diff",
    "graphql",
    "ini",
    "json",
    "less",
    "lua",
    "makefile",
    "xml",
    "markdown",
    "objectivec",
    "perl",
    "php",
    "php-template",
    "plaintext",
    "python-repl",
    "r",
    "scss",
    "shell",
    "sql",
    "vbnet",
    "wasm",
    "yaml",
    "rust",
];

/// Lowercases a fence language and maps common aliases to their full name.
pub fn normalize_language(language: &str) -> String {
    let lower = language.to_lowercase();
    let full = match lower.as_str() {
        "js" => "javascript",
        "ts" => "typescript",
        "sh" | "shell" => "bash",
        "py" => "python",
        "c++" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "kt" => "kotlin",
        "toml" => "ini",
        "html" => "xml",
        "md" => "markdown",
        "objc" => "objectivec",
        "pl" => "perl",
        "txt" => "plaintext",
        "vb" => "vbnet",
        "yml" => "yaml",
        "rs" => "rust",
        _ => return lower,
    };
    full.to_string()
}

pub fn is_native(normalized: &str) -> bool {
    NATIVE_LANGUAGES.contains(&normalized)
}

/// Whether a code block goes through the rasterizer.
///
/// Blocks without a language never do. Otherwise unsupported languages
/// always do, and supported ones do when exactly one of the global code
/// setting and the block's `!` flag asks for it.
pub fn wants_png(normalized: &str, png_code: bool, block_flag: bool) -> bool {
    !normalized.is_empty() && (!is_native(normalized) || (png_code ^ block_flag))
}
