//! # Travessias de coleta de spans
//!
//! Dois construtores de [`TripleElement`] por busca em profundidade, ambos
//! com pilha explícita e conjunto de visitados (termina mesmo em entrada
//! patológica; revisita é ciclo e vira [`OieError::InternalInvariant`]).
//!
//! - **DFS nominal**: span de feição nominal — só desce por rótulos da lista
//!   fechada de modificadores nominais. Usado para sujeitos, complementos
//!   nominais e os dois lados de uma tripla de aposto.
//! - **DFS de complemento**: span largo — desce por tudo, exceto sujeitos
//!   (ignorados com a subárvore inteira) e `mark` (fronteira que encerra o
//!   ramo sem ser incluída). O `mark` do próprio token inicial é a exceção:
//!   é a conjunção subordinativa do span ("que iria viajar") e entra.

use std::collections::HashSet;

use crate::element::TripleElement;
use crate::error::{OieError, Result};
use crate::sentence::Sentence;
use crate::token::{DepRel, UPos};

/// Chaves de configuração da DFS nominal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanOptions {
    /// Descarta filhos `conj` e `cc` (cada coordenado vira span próprio).
    pub ignore_conjunctions: bool,
    /// Descarta filhos `appos` (o aposto vira tripla própria).
    pub ignore_appos: bool,
    /// O span serve de sujeito: a preposição `case` mais à esquerda é ruído
    /// estrutural e sai do span.
    pub as_subject: bool,
}

/// Rótulos que compõem um span nominal.
fn in_nominal_span(dep: &DepRel) -> bool {
    matches!(
        dep,
        DepRel::Nummod
            | DepRel::Advmod
            | DepRel::Nmod
            | DepRel::Amod
            | DepRel::Dep
            | DepRel::Det
            | DepRel::Case
            | DepRel::Flat
            | DepRel::FlatName
            | DepRel::Punct
            | DepRel::Conj
            | DepRel::Cc
            | DepRel::Appos
    )
}

/// Coleta um span nominal a partir de `start`.
pub fn nominal_span(
    sentence: &Sentence,
    start: usize,
    opts: SpanOptions,
    excluded: &HashSet<usize>,
) -> Result<TripleElement> {
    let mut element = TripleElement::new(start);
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);

    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        for &child in sentence.children(current) {
            let token = sentence.token(child);
            if excluded.contains(&child) {
                continue;
            }
            if !in_nominal_span(&token.dep) {
                continue;
            }
            if opts.ignore_conjunctions && matches!(token.dep, DepRel::Conj | DepRel::Cc) {
                continue;
            }
            if opts.ignore_appos && token.dep == DepRel::Appos {
                continue;
            }
            // Um conj verbal é um predicado coordenado, nunca parte do nominal
            if token.dep == DepRel::Conj && token.upos.is_verbal() {
                continue;
            }
            if !visited.insert(child) {
                return Err(OieError::InternalInvariant(format!(
                    "token {} revisitado na DFS nominal",
                    child
                )));
            }
            element.add_piece(child);
            stack.push(child);
        }
    }

    if opts.as_subject {
        strip_leading_case(sentence, &mut element);
    }
    Ok(element)
}

/// Na posição de sujeito, uma preposição `case` na borda esquerda do span é
/// ruído da fronteira e não entra.
fn strip_leading_case(sentence: &Sentence, element: &mut TripleElement) {
    if let Some(&first) = element.token_ids().first() {
        let token = sentence.token(first);
        if token.upos == UPos::Adp && token.dep == DepRel::Case && element.core() != Some(first) {
            element.remove_piece(first);
        }
    }
}

/// Coleta um span largo de complemento a partir de `start`.
///
/// Subárvores de sujeito não são sequer visitadas; `mark` encerra o ramo sem
/// entrar — exceto o `mark` do token inicial, que é incluído sem descida.
pub fn complement_span(
    sentence: &Sentence,
    start: usize,
    excluded: &HashSet<usize>,
) -> Result<TripleElement> {
    let mut element = TripleElement::new(start);
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);

    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        for &child in sentence.children(current) {
            let token = sentence.token(child);
            if excluded.contains(&child) {
                continue;
            }
            if token.dep.is_subject() {
                continue;
            }
            if token.dep == DepRel::Mark {
                if current == start {
                    element.add_piece(child);
                }
                continue;
            }
            if !visited.insert(child) {
                return Err(OieError::InternalInvariant(format!(
                    "token {} revisitado na DFS de complemento",
                    child
                )));
            }
            element.add_piece(child);
            stack.push(child);
        }
    }
    Ok(element)
}
