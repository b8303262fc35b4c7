//! Whisper model metadata catalog.

/// Metadata for a downloadable Whisper model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "tiny", "base", "large")
    pub name: &'static str,
    /// Approximate download size in megabytes
    pub size_mb: u32,
    /// SHA-1 checksum; empty means no verification
    pub sha1: &'static str,
    /// Download URL from HuggingFace
    pub url: &'static str,
    /// Rough speed/accuracy hint shown in the interactive menu
    pub hint: &'static str,
}

/// Catalog of ggml models, smallest to largest.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "tiny",
        size_mb: 75,
        sha1: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
        hint: "fastest, least accurate",
    },
    ModelInfo {
        name: "base",
        size_mb: 142,
        sha1: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
        hint: "balanced",
    },
    ModelInfo {
        name: "small",
        size_mb: 466,
        sha1: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
        hint: "balanced",
    },
    ModelInfo {
        name: "medium",
        size_mb: 1533,
        sha1: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin",
        hint: "balanced",
    },
    ModelInfo {
        name: "large",
        size_mb: 3094,
        sha1: "",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large-v3.bin",
        hint: "slowest, most accurate",
    },
];

/// Resolve a user-supplied model choice to a catalog name.
///
/// Single letters are shorthand (t/b/s/m/l); anything else passes through
/// unchanged so full catalog names keep working.
pub fn resolve_name(choice: &str) -> &str {
    match choice {
        "t" => "tiny",
        "b" => "base",
        "s" => "small",
        "m" => "medium",
        "l" => "large",
        other => other,
    }
}

/// Find a model by catalog name.
pub fn get_model(name: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.name == name)
}

/// All models in the catalog.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_model_exists() {
        let model = get_model("tiny").unwrap();
        assert_eq!(model.name, "tiny");
        assert_eq!(model.size_mb, 75);
    }

    #[test]
    fn test_get_model_not_found() {
        assert!(get_model("nonexistent").is_none());
    }

    #[test]
    fn test_list_models_ordered_by_size() {
        let models = list_models();
        assert_eq!(models.len(), 5);
        for pair in models.windows(2) {
            assert!(pair[0].size_mb < pair[1].size_mb);
        }
    }

    #[test]
    fn test_resolve_name_letters() {
        assert_eq!(resolve_name("t"), "tiny");
        assert_eq!(resolve_name("b"), "base");
        assert_eq!(resolve_name("s"), "small");
        assert_eq!(resolve_name("m"), "medium");
        assert_eq!(resolve_name("l"), "large");
    }

    #[test]
    fn test_resolve_name_passes_full_names_through() {
        assert_eq!(resolve_name("base"), "base");
        assert_eq!(resolve_name("large"), "large");
        assert_eq!(resolve_name("custom-model"), "custom-model");
    }

    #[test]
    fn test_every_letter_resolves_to_a_catalog_entry() {
        for letter in ["t", "b", "s", "m", "l"] {
            assert!(
                get_model(resolve_name(letter)).is_some(),
                "letter '{}' should map to a catalog model",
                letter
            );
        }
    }

    #[test]
    fn test_urls_point_at_ggml_binaries() {
        for model in list_models() {
            assert!(model.url.starts_with("https://"));
            assert!(model.url.contains("ggml-"));
            assert!(model.url.ends_with(".bin"));
        }
    }
}
