//! Subcommand Implementations

use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use feature_engine::{
    generate_random_text, xor_with_constant, CorpusConfig, FeatureExtractor, FeatureVector,
    FEATURE_NAMES, SCHEMA_VERSION,
};
use inference_engine::{BatchRequest, InferenceBatcher, InferenceEngine, InferenceError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::config::{InferenceConfig, OutputFormat};

/// Resolve a text argument; `-` reads all of stdin
pub fn read_input(arg: &str) -> Result<String> {
    read_input_from(arg, std::io::stdin().lock())
}

/// Like [`read_input`] with an explicit reader standing in for stdin.
///
/// Only piped input loses its trailing line ending; argument text is kept verbatim.
pub fn read_input_from<R: Read>(arg: &str, mut reader: R) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .context("reading ciphertext from stdin")?;
    let trimmed = buffer.trim_end_matches(['\r', '\n']).len();
    buffer.truncate(trimmed);
    Ok(buffer)
}

/// Print the feature vector of one ciphertext
pub fn extract<W: Write>(
    out: &mut W,
    text: &str,
    extended: bool,
    format: OutputFormat,
    corpus: &CorpusConfig,
) -> Result<()> {
    let mut extractor = FeatureExtractor::new();

    match format {
        OutputFormat::Json => {
            let value = if extended {
                let (features, extended) = extractor.extract_all(text, corpus)?;
                json!({
                    "schema_version": SCHEMA_VERSION,
                    "features": features,
                    "extended": extended,
                })
            } else {
                json!({
                    "schema_version": SCHEMA_VERSION,
                    "features": extractor.extract(text)?,
                })
            };
            writeln!(out, "{value}")?;
        }
        OutputFormat::Csv => {
            if extended {
                bail!("--extended is only available with JSON output");
            }
            let features = extractor.extract(text)?;
            writeln!(out, "{}", FeatureVector::csv_header(None))?;
            writeln!(out, "{}", features.csv_row(None))?;
        }
    }

    Ok(())
}

/// Print the canonical feature order
pub fn schema<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "schema_version {SCHEMA_VERSION}")?;
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        writeln!(out, "{i:>2} {name}")?;
    }
    Ok(())
}

/// Generate random plaintexts and print their features with a label column
pub fn sample<W: Write>(
    out: &mut W,
    count: usize,
    xor: bool,
    seed: Option<u64>,
    format: OutputFormat,
    corpus: &CorpusConfig,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let label = if xor { "xor" } else { "plaintext" };
    let mut extractor = FeatureExtractor::new();

    info!("Sampling {} texts of {} characters ({})", count, corpus.text_length, label);

    if format == OutputFormat::Csv {
        writeln!(out, "{}", FeatureVector::csv_header(Some("label")))?;
    }

    for i in 0..count {
        let mut text = generate_random_text(&mut rng, corpus.text_length);
        if xor {
            text = xor_with_constant(&text, corpus.xor_constant);
        }

        let features = extractor
            .extract(&text)
            .with_context(|| format!("sample {i}"))?;

        match format {
            OutputFormat::Json => {
                writeln!(out, "{}", json!({ "label": label, "features": features }))?
            }
            OutputFormat::Csv => writeln!(out, "{}", features.csv_row(Some(label)))?,
        }
    }

    Ok(())
}

/// Classify every ciphertext through a batcher, one JSON line per input.
///
/// Per-input failures are reported inline; the command fails afterwards if
/// any input could not be classified.
pub async fn classify<W: Write>(
    out: &mut W,
    texts: Vec<String>,
    config: &InferenceConfig,
) -> Result<()> {
    warn!("No trained model is bundled; probabilities are a fixed placeholder distribution");
    let engine = InferenceEngine::mock();
    let (tx, mut batcher) = InferenceBatcher::channel(config.batch_size, config.batch_timeout_ms);

    let worker = async move { batcher.run(&engine).await };
    let client = async move {
        let mut pending = Vec::with_capacity(texts.len());
        for text in texts {
            let (request, rx) = BatchRequest::new(text.clone());
            if tx.send(request).await.is_err() {
                break;
            }
            pending.push((text, rx));
        }
        drop(tx);

        let mut results = Vec::with_capacity(pending.len());
        for (text, rx) in pending {
            let result = rx.await.unwrap_or(Err(InferenceError::ChannelClosed));
            results.push((text, result));
        }
        results
    };

    let (run, results) = tokio::join!(worker, client);
    run?;

    let total = results.len();
    let mut failed = 0;
    for (text, result) in results {
        let line = match result {
            Ok(result) => {
                let probabilities: Map<String, Value> = result
                    .prediction
                    .distribution()
                    .map(|(algorithm, p)| (algorithm.as_str().to_string(), json!(p)))
                    .collect();
                json!({
                    "cipher_text": text,
                    "prediction": result.prediction.algorithm,
                    "confidence": result.prediction.confidence,
                    "probabilities": probabilities,
                    "latency_ms": result.latency_ms,
                })
            }
            Err(e) => {
                failed += 1;
                debug!("Classification failed: {}", e);
                json!({ "cipher_text": text, "error": e.to_string() })
            }
        };
        writeln!(out, "{line}")?;
    }

    if failed > 0 {
        bail!("{failed} of {total} ciphertexts could not be classified");
    }
    Ok(())
}

/// Split stdin-style input into one ciphertext per non-empty line
pub fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
