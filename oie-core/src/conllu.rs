//! # Leitor CoNLL-U v2
//!
//! Blocos de linhas separadas por tabulação, uma sentença por bloco, linha em
//! branco como separador. Colunas: `ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL
//! DEPS MISC`. Comentários `#` podem carregar `sent_id` e `text`.
//!
//! O leitor é a fronteira de validação: blocos malformados (colunas faltando,
//! HEAD não-inteiro, ciclo) são rejeitados aqui com
//! [`MalformedSentence`](crate::OieError::MalformedSentence) e o núcleo nunca
//! os recebe. Tokens multi-palavra (`4-5`) e nós vazios (`5.1`) são pulados,
//! como de costume nos consumidores de CoNLL-U.

use std::collections::HashMap;

use crate::error::{OieError, Result};
use crate::sanitizer;
use crate::sentence::Sentence;
use crate::token::{DepRel, Token, UPos};

/// Quebra um arquivo CoNLL-U em blocos e analisa cada um.
///
/// O resultado é um vetor de `Result` por sentença: o driver de lote registra
/// as malformadas e segue com as demais (§ política de erros).
pub fn parse(input: &str) -> Vec<Result<Sentence>> {
    split_blocks(input)
        .into_iter()
        .enumerate()
        .map(|(i, block)| parse_sentence(&block, &(i + 1).to_string()))
        .collect()
}

/// Separa o texto em blocos de sentença (linhas em branco como divisor).
pub fn split_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Analisa um único bloco CoNLL-U.
///
/// `fallback_id` é usado quando o bloco não traz `# sent_id`.
pub fn parse_sentence(block: &str, fallback_id: &str) -> Result<Sentence> {
    let mut sent_id: Option<String> = None;
    let mut text: Option<String> = None;
    let mut tokens: Vec<Token> = Vec::new();

    for line in block.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some((key, value)) = comment.split_once('=') {
                match key.trim() {
                    "sent_id" => sent_id = Some(value.trim().to_string()),
                    "text" => text = Some(value.trim().to_string()),
                    _ => {}
                }
            }
            continue;
        }

        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 10 {
            return Err(OieError::MalformedSentence(format!(
                "esperadas 10 colunas, vieram {}: {:?}",
                cols.len(),
                line
            )));
        }

        // Intervalos multi-palavra (4-5) e nós vazios (5.1) não entram na árvore
        if cols[0].contains('-') || cols[0].contains('.') {
            continue;
        }

        let index: usize = cols[0].parse().map_err(|_| {
            OieError::MalformedSentence(format!("ID não-inteiro: {:?}", cols[0]))
        })?;
        let head: usize = cols[6].parse().map_err(|_| {
            OieError::MalformedSentence(format!("HEAD não-inteiro: {:?}", cols[6]))
        })?;

        tokens.push(Token {
            index,
            text: unescape(cols[1]),
            lemma: unescape(cols[2]),
            upos: UPos::from_tag(cols[3]),
            dep: DepRel::from_label(cols[7]),
            head,
            feats: parse_feats(cols[5]),
        });
    }

    let id = sent_id.unwrap_or_else(|| fallback_id.to_string());
    let text = text.unwrap_or_else(|| {
        let forms: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        sanitizer::detokenize(&forms)
    });

    Sentence::new(id, text, tokens)
}

/// FEATS: `Chave=Valor|Chave=Valor`; `_` significa ausente.
fn parse_feats(field: &str) -> HashMap<String, String> {
    let mut feats = HashMap::new();
    if field == "_" {
        return feats;
    }
    for pair in field.split('|') {
        if let Some((key, value)) = pair.split_once('=') {
            feats.insert(key.to_string(), value.to_string());
        }
    }
    feats
}

/// `_` em FORM/LEMMA significa campo vazio.
fn unescape(field: &str) -> String {
    if field == "_" {
        String::new()
    } else {
        field.to_string()
    }
}
