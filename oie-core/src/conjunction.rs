//! # Coordenação de predicados
//!
//! "Ele leu e escreveu um livro" são duas proposições com o mesmo sujeito.
//! Este módulo identifica os verbos coordenados que não abrem proposição
//! própria (sem sujeito explícito) e, depois que cada um produziu suas
//! extrações, redistribui o complemento compartilhado para os verbos que
//! ficaram sem ("leu" herda "um livro" de "escreveu").

use crate::element::Extraction;
use crate::sentence::Sentence;
use crate::token::{DepRel, UPos};

/// Verbos coordenados a `verb` por cadeias de `conj` que dividem o sujeito
/// com ele, em ordem de sentença.
///
/// Um par só é válido se for VERB/AUX e não tiver filho de sujeito próprio —
/// nesse caso ele abre proposição independente e o laço principal o cobre.
/// O conector preferido é `cc` "e"/"ou"; coordenação assindética (vírgula)
/// também é aceita.
pub fn verbal_peers(sentence: &Sentence, verb: usize) -> Vec<usize> {
    let mut peers = Vec::new();
    let mut frontier = vec![verb];

    while let Some(current) = frontier.pop() {
        for &child in sentence.children(current) {
            let token = sentence.token(child);
            if token.dep != DepRel::Conj || !token.upos.is_verbal() {
                continue;
            }
            let has_own_subject = sentence
                .children(child)
                .iter()
                .any(|&c| sentence.token(c).dep.is_subject());
            if has_own_subject {
                continue;
            }
            if !peers.contains(&child) {
                peers.push(child);
                frontier.push(child);
            }
        }
    }

    peers.sort_unstable();
    peers
}

/// Redistribuição de complemento compartilhado.
///
/// No grupo coordenado E₁…Eₙ (em ordem de sentença), se Eₙ tem complemento e
/// algum Eᵢ anterior ficou vazio, Eᵢ recebe uma cópia do complemento de Eₙ.
/// Só vale entre relações cujo núcleo é VERB pleno (auxiliares não herdam).
pub fn redistribute(sentence: &Sentence, group: &mut [Extraction]) {
    let Some(donor) = group.last() else {
        return;
    };
    if donor.complement.is_empty() {
        return;
    }
    let donor_core_is_verb = donor
        .relation
        .core()
        .map(|c| sentence.token(c).upos == UPos::Verb)
        .unwrap_or(false);
    if !donor_core_is_verb {
        return;
    }
    let complement = donor.complement.clone();

    let last = group.len() - 1;
    for extraction in &mut group[..last] {
        if !extraction.complement.is_empty() {
            continue;
        }
        let core_is_verb = extraction
            .relation
            .core()
            .map(|c| sentence.token(c).upos == UPos::Verb)
            .unwrap_or(false);
        if core_is_verb {
            extraction.complement = complement.clone();
        }
    }
}
