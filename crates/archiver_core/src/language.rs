use std::collections::BTreeMap;

const FALLBACK_EXTENSION: &str = "txt";

/// Built-in mapping from the site's `data-language` identifiers to file extensions.
const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("agda", "agda"),
    ("bf", "b"),
    ("c", "c"),
    ("cfml", "cfm"),
    ("clojure", "clj"),
    ("cobol", "cob"),
    ("coffeescript", "coffee"),
    ("commonlisp", "lisp"),
    ("coq", "v"),
    ("cpp", "cpp"),
    ("crystal", "cr"),
    ("csharp", "cs"),
    ("d", "d"),
    ("dart", "dart"),
    ("elixir", "ex"),
    ("elm", "elm"),
    ("erlang", "erl"),
    ("factor", "factor"),
    ("forth", "fs"),
    ("fortran", "f90"),
    ("fsharp", "fsx"),
    ("go", "go"),
    ("groovy", "groovy"),
    ("haskell", "hs"),
    ("haxe", "hx"),
    ("idris", "idr"),
    ("java", "java"),
    ("javascript", "js"),
    ("julia", "jl"),
    ("kotlin", "kt"),
    ("lambdacalc", "lc"),
    ("lean", "lean"),
    ("lua", "lua"),
    ("nasm", "asm"),
    ("nim", "nim"),
    ("objc", "m"),
    ("ocaml", "ml"),
    ("pascal", "pas"),
    ("perl", "pl"),
    ("php", "php"),
    ("powershell", "ps1"),
    ("prolog", "pro"),
    ("purescript", "purs"),
    ("python", "py"),
    ("r", "r"),
    ("racket", "rkt"),
    ("raku", "raku"),
    ("reason", "re"),
    ("riscv", "s"),
    ("ruby", "rb"),
    ("rust", "rs"),
    ("scala", "scala"),
    ("shell", "sh"),
    ("solidity", "sol"),
    ("sql", "sql"),
    ("swift", "swift"),
    ("typescript", "ts"),
    ("vb", "vb"),
    ("zig", "zig"),
];

/// Result of an extension lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// The language was found in the mapping.
    Mapped(String),
    /// The language was unknown; its identifier is used as the extension.
    Fallback(String),
}

impl Extension {
    pub fn as_str(&self) -> &str {
        match self {
            Extension::Mapped(ext) | Extension::Fallback(ext) => ext,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Extension::Fallback(_))
    }
}

/// Language table: built-in defaults with optional user overrides on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    overrides: BTreeMap<String, String>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn extension_for(&self, language: &str) -> Extension {
        match self.overrides.get(language) {
            Some(ext) => Extension::Mapped(ext.clone()),
            None => extension_for(language),
        }
    }
}

/// Looks up `language` in the built-in table, falling back to the identifier itself.
///
/// The fallback keeps only alphanumerics, `-` and `_` so it stays inside one
/// path segment; an identifier with none of those becomes `txt`.
pub fn extension_for(language: &str) -> Extension {
    DEFAULT_EXTENSIONS
        .iter()
        .find(|(id, _)| *id == language)
        .map(|(_, ext)| Extension::Mapped((*ext).to_string()))
        .unwrap_or_else(|| Extension::Fallback(fallback_extension(language)))
}

fn fallback_extension(language: &str) -> String {
    let cleaned: String = language
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        FALLBACK_EXTENSION.to_string()
    } else {
        cleaned
    }
}
