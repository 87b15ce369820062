//! # Sanitização, renderização e validação
//!
//! A sanitização apara as bordas de um span antes de renderizar: par de
//! colchetes externo, pontuação e conectores soltos na frente, pontuação
//! pendurada atrás. A renderização junta os tokens sobreviventes com
//! destokenização leve (vírgula gruda no anterior, hífen de clítico gruda
//! dos dois lados — "Vende-se").
//!
//! A validação decide o que entra no conjunto final; a forma de tupla
//! sanitizada é a chave canônica de deduplicação.

use crate::element::{Extraction, TripleElement, SYNTHETIC_COPULA};
use crate::extractor::ExtractorConfig;
use crate::relation;
use crate::sentence::Sentence;
use crate::token::UPos;

const BRACKET_PAIRS: &[(&str, &str)] = &[("(", ")"), ("[", "]"), ("{", "}")];

fn is_bracket(text: &str) -> bool {
    BRACKET_PAIRS
        .iter()
        .any(|(open, close)| text == *open || text == *close)
}

fn opening_of(close: &str) -> Option<&'static str> {
    BRACKET_PAIRS
        .iter()
        .find(|(_, c)| *c == close)
        .map(|(o, _)| *o)
}

/// Índices do span depois da sanitização de bordas, em ordem de sentença.
pub fn sanitized_ids(sentence: &Sentence, element: &TripleElement) -> Vec<usize> {
    let mut ids = element.token_ids();

    // 1. Par de colchetes casado nas duas pontas cai junto
    if ids.len() >= 2 {
        let first = &sentence.token(ids[0]).text;
        let last = &sentence.token(*ids.last().unwrap()).text;
        if BRACKET_PAIRS
            .iter()
            .any(|(open, close)| first == open && last == close)
        {
            ids.remove(0);
            ids.pop();
        }
    }

    // 2. Frente: pontuação não-colchete e conectores soltos
    while let Some(&first) = ids.first() {
        let token = sentence.token(first);
        let loose_punct = token.upos == UPos::Punct && !is_bracket(&token.text);
        let loose_cc = token.dep == crate::token::DepRel::Cc;
        if loose_punct || loose_cc {
            ids.remove(0);
        } else {
            break;
        }
    }

    // 3. Trás: pontuação pendurada, exceto colchete fechando um par interno
    while let Some(&last) = ids.last() {
        let token = sentence.token(last);
        if token.upos != UPos::Punct {
            break;
        }
        if let Some(open) = opening_of(&token.text) {
            let has_mate = ids[..ids.len() - 1]
                .iter()
                .any(|&i| sentence.token(i).text == open);
            if has_mate {
                break;
            }
        }
        ids.pop();
    }

    ids
}

/// Junta formas de superfície com destokenização leve.
///
/// Sem espaço antes de pontuação de fechamento, sem espaço depois de
/// colchete de abertura; o hífen de clítico cola dos dois lados.
pub fn detokenize(words: &[&str]) -> String {
    const NO_SPACE_BEFORE: &[&str] = &[",", ".", ";", ":", "!", "?", ")", "]", "}"];
    const NO_SPACE_AFTER: &[&str] = &["(", "[", "{"];

    let mut out = String::new();
    let mut glue_next = false;
    for &word in words {
        if out.is_empty() {
            out.push_str(word);
        } else if word == "-" {
            out.push_str(word);
            glue_next = true;
            continue;
        } else if glue_next || NO_SPACE_BEFORE.contains(&word) {
            out.push_str(word);
        } else {
            out.push(' ');
            out.push_str(word);
        }
        glue_next = NO_SPACE_AFTER.contains(&word);
    }
    out
}

/// Texto canônico de um elemento (sanitizado e destokenizado).
pub fn render(sentence: &Sentence, element: &TripleElement) -> String {
    if element.is_synthetic() {
        return SYNTHETIC_COPULA.to_string();
    }
    let ids = sanitized_ids(sentence, element);
    let words: Vec<&str> = ids.iter().map(|&i| sentence.token(i).text.as_str()).collect();
    detokenize(&words)
}

/// Forma de tupla: chave de igualdade e deduplicação de uma extração.
pub fn tuple_form(sentence: &Sentence, extraction: &Extraction) -> String {
    let mut form = format!(
        "({}; {}; {})",
        render(sentence, &extraction.subject),
        render(sentence, &extraction.relation),
        render(sentence, &extraction.complement),
    );
    if !extraction.sub_extractions.is_empty() {
        let subs: Vec<String> = extraction
            .sub_extractions
            .iter()
            .map(|sub| tuple_form(sentence, sub))
            .collect();
        form.push_str(" [");
        form.push_str(&subs.join(", "));
        form.push(']');
    }
    form
}

/// Valida uma extração, filtrando recursivamente as sub-extrações.
///
/// Com ao menos uma sub-extração válida ela se sustenta como contêiner,
/// mesmo de sujeito/relação vazios. Sem subs valem as regras plenas:
/// sujeito presente (salvo `hidden_subjects`), relação com verbo da sentença
/// (ou sintética) e sujeito que não seja um pronome relativo solto.
pub fn validate(
    sentence: &Sentence,
    config: &ExtractorConfig,
    mut extraction: Extraction,
) -> Option<Extraction> {
    let subs = std::mem::take(&mut extraction.sub_extractions);
    extraction.sub_extractions = subs
        .into_iter()
        .filter_map(|sub| validate(sentence, config, sub))
        .collect();
    if !extraction.sub_extractions.is_empty() {
        return Some(extraction);
    }

    if render(sentence, &extraction.subject).is_empty() && !config.hidden_subjects {
        return None;
    }
    if render(sentence, &extraction.relation).is_empty() {
        return None;
    }
    if !extraction.relation.is_synthetic() && !relation::has_verbal(sentence, &extraction.relation)
    {
        return None;
    }
    let subject_ids = extraction.subject.token_ids();
    if subject_ids.len() == 1 && sentence.token(subject_ids[0]).is_relative_pronoun() {
        return None;
    }
    Some(extraction)
}
