//! One-shot lookup: fetch a word's meanings and images and print them.

use std::fmt::Write as _;

use color_eyre::Result;

use crate::adapters::ReqwestHttpClient;
use crate::config::EnrichmentConfig;
use crate::enrichment::{ImageRef, Meaning, RemoteEnrichmentClient};
use crate::error::EnrichmentResult;
use crate::traits::EnrichmentService;

/// Run both enrichment calls for `word` and render the results as text.
///
/// A missing definition is an error; failed image search is reported inline
/// since the image provider needs an API key.
pub async fn lookup_word(service: &dyn EnrichmentService, word: &str) -> EnrichmentResult<String> {
    let (meanings, images) = tokio::join!(service.fetch_meanings(word), service.fetch_images(word));
    let meanings = meanings?;

    let mut out = String::new();
    let _ = writeln!(out, "{word}");
    format_meanings(&mut out, &meanings);
    match images {
        Ok(images) => format_images(&mut out, &images),
        Err(e) => {
            tracing::warn!("Image search for '{}' failed: {} [{}]", word, e, e.error_code());
            let _ = writeln!(out, "\nimages unavailable: {e}");
        }
    }
    Ok(out)
}

fn format_meanings(out: &mut String, meanings: &[Meaning]) {
    for meaning in meanings {
        let _ = writeln!(out, "\n  {}", meaning.part_of_speech);
        for (index, definition) in meaning.definitions.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}", index + 1, definition.text);
            if let Some(example) = &definition.example {
                let _ = writeln!(out, "       \"{example}\"");
            }
            if let Some(synonyms) = &definition.synonyms {
                let _ = writeln!(out, "       synonyms: {}", synonyms.join(", "));
            }
        }
    }
}

fn format_images(out: &mut String, images: &[ImageRef]) {
    if images.is_empty() {
        let _ = writeln!(out, "\nno images");
        return;
    }
    let _ = writeln!(out, "\nimages:");
    for image in images {
        let _ = writeln!(
            out,
            "  {} {}x{} {}",
            image.id,
            image.width,
            image.height,
            image.display_url().unwrap_or("-")
        );
    }
}

/// Handle `--lookup WORD` against the configured providers.
pub fn handle_lookup_command(word: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let client = RemoteEnrichmentClient::new(ReqwestHttpClient::new(), EnrichmentConfig::from_env());
    let output = runtime.block_on(lookup_word(&client, word))?;
    print!("{output}");
    Ok(())
}
