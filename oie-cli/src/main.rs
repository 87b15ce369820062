//! Driver de lote: lê um arquivo CoNLL-U, extrai triplas sentença a sentença
//! (em paralelo — o núcleo é puro por sentença) e escreve o resultado em
//! JSON, CSV ou texto plano. Sentenças malformadas são registradas no log e
//! puladas; as demais seguem.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{info, warn};

use oie_core::output::{self, DocumentOutput, SentenceOutput};
use oie_core::{conllu, Extractor, ExtractorConfig};

#[derive(Parser)]
#[command(name = "oie")]
#[command(about = "Extração de Informação Aberta para Português (entrada CoNLL-U)")]
#[command(version)]
struct Cli {
    /// Arquivo CoNLL-U de entrada
    input: PathBuf,

    /// Arquivo de saída (stdout se omitido)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Formato de saída
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Divide predicados coordenados e decompõe complementos múltiplos
    #[arg(long = "coordinating-conjunctions", short = 'c')]
    coordinating_conjunctions: bool,

    /// Emite sub-extrações para subordinadas com sujeito explícito
    #[arg(long = "subordinating-conjunctions", short = 's')]
    subordinating_conjunctions: bool,

    /// Admite extrações de sujeito vazio (chave reservada)
    #[arg(long = "hidden-subjects")]
    hidden_subjects: bool,

    /// Sintetiza triplas "é-um" a partir de apostos
    #[arg(long, short = 'a')]
    appositive: bool,

    /// Inferência transitiva sobre apostos (requer --appositive)
    #[arg(long, short = 't', requires = "appositive")]
    transitivity: bool,

    /// Rastreamento verboso; não altera a saída
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
    Txt,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cli.debug {
                    tracing_subscriber::EnvFilter::new("debug")
                } else {
                    tracing_subscriber::EnvFilter::new("info")
                }
            }),
        )
        .init();

    let config = ExtractorConfig {
        coordinating_conjunctions: cli.coordinating_conjunctions,
        subordinating_conjunctions: cli.subordinating_conjunctions,
        hidden_subjects: cli.hidden_subjects,
        appositive: cli.appositive,
        appositive_transitivity: cli.transitivity,
        debug: cli.debug,
    };

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("lendo {}", cli.input.display()))?;
    let parsed = conllu::parse(&text);
    let total = parsed.len();

    let extractor = Extractor::new(config);
    let sentences: Vec<SentenceOutput> = parsed
        .par_iter()
        .filter_map(|result| match result {
            Ok(sentence) => match extractor.extract(sentence) {
                Ok(set) => Some(output::sentence_output(sentence, &set)),
                Err(err) => {
                    warn!(sent = sentence.id(), %err, "extração falhou, sentença pulada");
                    None
                }
            },
            Err(err) => {
                warn!(%err, "sentença malformada, pulada");
                None
            }
        })
        .collect();

    let extracted: usize = sentences.iter().map(|s| s.extractions.len()).sum();
    info!(
        sentencas = sentences.len(),
        blocos = total,
        triplas = extracted,
        "extração concluída"
    );

    let rendered = match cli.format {
        Format::Json => output::to_json(&DocumentOutput { config, sentences })?,
        Format::Csv => output::to_csv(&sentences),
        Format::Txt => output::to_text(&sentences),
    };

    match &cli.out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("escrevendo {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
