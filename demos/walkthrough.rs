//! Uploads a document, runs classification, language detection, OCR and an
//! extraction on it, and prints what comes back.
//!
//! ```text
//! DOCAI_URL=us.app.zuva.ai DOCAI_TOKEN=... cargo run --example walkthrough -- lease.pdf [field_id...]
//! ```

use anyhow::Context;
use docai_client::{
    ClassificationRequest, DocAiClient, ExtractionRequest, Files, LanguageRequest, OcrRequest,
    PollStatus, Status, WaitOptions, init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: walkthrough <file> [field_id...]")?;
    let field_ids: Vec<String> = args.collect();

    let client = DocAiClient::from_env()?;
    let files = Files::new(client.clone());
    let file = files.upload_path(&path).await?;
    println!("Uploaded {path} as {}", file.file_id);

    let wait = WaitOptions::from_secs(2.0, 300.0)?.show_progress(true);

    let classification = ClassificationRequest::submit_one(&client, file.file_id.clone()).await?;
    let language = LanguageRequest::submit_one(&client, file.file_id.clone()).await?;
    let ocr = OcrRequest::submit_one(&client, file.file_id.clone()).await?;

    let (classified, detected, ocr_status) = tokio::try_join!(
        classification.wait_until_finished(wait),
        language.wait_until_finished(wait),
        ocr.wait_until_finished(wait),
    )?;

    report("classification", &classified);
    if classified.is_complete() {
        println!(
            "  type: {}, contract: {}",
            classified.classification.as_deref().unwrap_or("-"),
            classified.is_contract
        );
    }

    report("language", &detected);
    if let Some(language) = &detected.language {
        println!("  language: {language}");
    }

    report("ocr", &ocr_status);
    if ocr_status.is_complete() {
        let text = ocr.text().await?;
        println!("  {} characters of text", text.chars().count());
    }

    if !field_ids.is_empty() {
        let extraction =
            ExtractionRequest::submit_one(&client, file.file_id.clone(), field_ids).await?;
        let status = extraction.wait_until_finished(wait).await?;
        report("extraction", &status);
        if status.is_complete() {
            for field in extraction.results().await? {
                for found in &field.extractions {
                    println!("  {}: {}", field.field_id, found.text.as_deref().unwrap_or(""));
                }
            }
        }
    }

    files.delete(&file.file_id).await?;
    println!("Deleted {}", file.file_id);
    Ok(())
}

fn report(kind: &str, status: &impl Status) {
    match status.error() {
        Some(error) if status.is_failed() => {
            println!("{kind} {} failed: {error}", status.request_id())
        }
        _ => println!("{kind} {}: {}", status.request_id(), status.state()),
    }
}
