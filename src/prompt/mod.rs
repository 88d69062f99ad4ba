//! Prompt assembly for the three translation shapes. Language arguments are
//! display names, already resolved through the catalog.

/// Plain text translation; instructs the model to answer with the
/// translation alone.
pub fn text_translation(source_name: &str, target_name: &str, text: &str) -> String {
    format!(
        "Translate the following text from {source_name} to {target_name}. \
         Only provide the translation, no explanations or additional text.\n\n\
         Text to translate:\n{text}"
    )
}

/// Vision extraction plus translation. The two-section output format is
/// produced by the model and returned unparsed.
pub fn image_extraction(source_name: &str, target_name: &str) -> String {
    format!(
        "You are a professional translator. Analyze this image and extract all visible text. \
         Then translate the extracted text from {source_name} to {target_name}.\n\n\
         Format your response as:\n\
         ORIGINAL TEXT:\n\
         [extracted text here]\n\n\
         TRANSLATED TEXT:\n\
         [translated text here]\n\n\
         Preserve the structure and formatting of the text as much as possible."
    )
}

/// Document translation that keeps markdown structure, code blocks, and URLs
/// intact. Applied to every text-like upload, plain .txt included.
pub fn document_translation(source_name: &str, target_name: &str, content: &str) -> String {
    format!(
        "You are a professional translator. Translate the following {source_name} text to {target_name}.\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         - Preserve all markdown formatting, including headers, lists, links, code blocks, and emphasis\n\
         - Keep all code blocks unchanged (do not translate code)\n\
         - Preserve all URLs and file paths\n\
         - Maintain the document structure exactly as it is\n\
         - Only translate the actual text content, not the markdown syntax or code\n\n\
         Text to translate:\n\n\
         {content}\n\n\
         Provide only the translated text with preserved formatting, without any explanations or additional comments."
    )
}

#[cfg(test)]
mod tests;
