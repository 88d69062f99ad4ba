use super::*;

#[test]
fn test_text_translation_carries_languages_and_literal_text() {
    let prompt = text_translation("English", "Chinese", "Hello, world");

    assert!(prompt.starts_with("Translate the following text from English to Chinese."));
    assert!(prompt.contains("Only provide the translation, no explanations or additional text."));
    assert!(prompt.ends_with("Text to translate:\nHello, world"));
}

#[test]
fn test_text_translation_keeps_multiline_input_verbatim() {
    let text = "line one\nline two\n";
    let prompt = text_translation("German", "Italian", text);
    assert!(prompt.contains(text));
}

#[test]
fn test_image_extraction_two_section_format() {
    let prompt = image_extraction("Japanese", "English");

    assert!(prompt.contains("extract all visible text"));
    assert!(prompt.contains("from Japanese to English"));

    let original = prompt.find("ORIGINAL TEXT:").expect("original section");
    let translated = prompt.find("TRANSLATED TEXT:").expect("translated section");
    assert!(original < translated);
}

#[test]
fn test_document_translation_preservation_rules() {
    let content = "# Title\n\n```rust\nfn main() {}\n```\nSee https://example.com";
    let prompt = document_translation("English", "Spanish", content);

    assert!(prompt.contains("Translate the following English text to Spanish."));
    assert!(prompt.contains("Keep all code blocks unchanged (do not translate code)"));
    assert!(prompt.contains("Preserve all URLs and file paths"));
    assert!(prompt.contains(content));
    assert!(prompt.ends_with(
        "Provide only the translated text with preserved formatting, without any explanations or additional comments."
    ));
}

#[test]
fn test_unknown_language_names_pass_through_to_prompt() {
    // Callers resolve names through the catalog, which falls back to the raw
    // code; the prompt builder must not care.
    let prompt = text_translation("xx", "yy", "hola");
    assert!(prompt.contains("from xx to yy"));
}
