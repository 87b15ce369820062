//! # Formatos de saída
//!
//! Três renderizações do mesmo conjunto de extrações:
//!
//! | Formato | Forma |
//! |---|---|
//! | Estruturado | JSON: `{id, sentence, extractions: [{arg1, rel, arg2, sub_extractions}]}` |
//! | Tabular | CSV: `id, sentence, arg1, rel, arg2`, ids hierárquicos `1.1` para subs |
//! | Texto | a sentença e uma linha `(arg1; rel; arg2)` por extração, subs indentadas |

use serde::Serialize;

use crate::element::{Extraction, ExtractionSet};
use crate::extractor::ExtractorConfig;
use crate::sanitizer;
use crate::sentence::Sentence;

/// Uma extração já renderizada em texto.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    pub arg1: String,
    pub rel: String,
    pub arg2: String,
    pub sub_extractions: Vec<ExtractionOutput>,
}

/// As extrações de uma sentença.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceOutput {
    pub id: String,
    pub sentence: String,
    pub extractions: Vec<ExtractionOutput>,
}

/// O documento completo: configuração usada mais as sentenças.
#[derive(Debug, Serialize)]
pub struct DocumentOutput {
    pub config: ExtractorConfig,
    pub sentences: Vec<SentenceOutput>,
}

fn extraction_output(sentence: &Sentence, extraction: &Extraction) -> ExtractionOutput {
    ExtractionOutput {
        arg1: sanitizer::render(sentence, &extraction.subject),
        rel: sanitizer::render(sentence, &extraction.relation),
        arg2: sanitizer::render(sentence, &extraction.complement),
        sub_extractions: extraction
            .sub_extractions
            .iter()
            .map(|sub| extraction_output(sentence, sub))
            .collect(),
    }
}

/// Renderiza o conjunto de extrações de uma sentença.
pub fn sentence_output(sentence: &Sentence, set: &ExtractionSet) -> SentenceOutput {
    SentenceOutput {
        id: sentence.id().to_string(),
        sentence: sentence.text().to_string(),
        extractions: set.iter().map(|e| extraction_output(sentence, e)).collect(),
    }
}

/// Formato estruturado (JSON identado).
pub fn to_json(document: &DocumentOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(document)
}

/// Formato tabular (CSV). Sub-extrações ganham ids hierárquicos: `2.1` é a
/// primeira sub da segunda extração.
pub fn to_csv(sentences: &[SentenceOutput]) -> String {
    let mut out = String::from("id,sentence,arg1,rel,arg2\n");
    for sentence in sentences {
        for (i, extraction) in sentence.extractions.iter().enumerate() {
            csv_rows(&mut out, &sentence.sentence, &(i + 1).to_string(), extraction);
        }
    }
    out
}

fn csv_rows(out: &mut String, sentence: &str, id: &str, extraction: &ExtractionOutput) {
    out.push_str(&format!(
        "{},{},{},{},{}\n",
        csv_field(id),
        csv_field(sentence),
        csv_field(&extraction.arg1),
        csv_field(&extraction.rel),
        csv_field(&extraction.arg2),
    ));
    for (i, sub) in extraction.sub_extractions.iter().enumerate() {
        csv_rows(out, sentence, &format!("{}.{}", id, i + 1), sub);
    }
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Formato texto plano.
pub fn to_text(sentences: &[SentenceOutput]) -> String {
    let mut out = String::new();
    for sentence in sentences {
        out.push_str(&sentence.sentence);
        out.push('\n');
        for extraction in &sentence.extractions {
            text_lines(&mut out, 1, extraction);
        }
        out.push('\n');
    }
    out
}

fn text_lines(out: &mut String, depth: usize, extraction: &ExtractionOutput) {
    out.push_str(&"\t".repeat(depth - 1));
    out.push_str(&format!(
        "({}; {}; {})\n",
        extraction.arg1, extraction.rel, extraction.arg2
    ));
    for sub in &extraction.sub_extractions {
        text_lines(out, depth + 1, sub);
    }
}
