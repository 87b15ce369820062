//! # Montador de relação
//!
//! Reúne o núcleo verbal de um predicado: o verbo de partida, a cadeia de
//! auxiliares (`aux`, `aux:pass`, `xcomp` verbais), o clítico pronominal
//! (`expl:pv`, com o hífen que o acompanha) e um punhado fechado de advérbios
//! que mudam o sentido da relação ("não comeu" ≠ "comeu").
//!
//! Para cópulas, os modificadores prendem no nominal predicativo em UD
//! ("não [é] rico" tem `não` como filho de `rico`), então a varredura cobre
//! também os filhos do verbo efetivo.

use std::collections::HashSet;

use crate::element::TripleElement;
use crate::error::Result;
use crate::sentence::Sentence;
use crate::token::DepRel;

/// Advérbios que entram na relação quando `advmod` do verbo.
const RELATION_ADVERB_LEMMAS: &[&str] = &["não", "já", "ainda", "também", "nunca"];

/// O verbo efetivo de uma relação: para cópula, o head (nominal predicativo);
/// caso contrário, o próprio núcleo.
pub fn effective_verb(sentence: &Sentence, relation_core: usize) -> usize {
    let token = sentence.token(relation_core);
    if token.dep == DepRel::Cop && token.head != 0 {
        token.head
    } else {
        relation_core
    }
}

/// Um filho entra na relação?
fn admits(sentence: &Sentence, child: usize) -> bool {
    let token = sentence.token(child);
    match &token.dep {
        DepRel::Aux | DepRel::AuxPass | DepRel::Xcomp => token.upos.is_verbal(),
        DepRel::ExplPv => true,
        DepRel::Advmod => RELATION_ADVERB_LEMMAS.contains(&token.lemma.as_str()),
        // Hífen de clítico ("vende-se") acompanha a relação
        DepRel::Punct => token.text == "-",
        _ => false,
    }
}

/// Monta o elemento de relação com raiz em `start`.
///
/// Tokens já usados pelo sujeito ficam de fora via `excluded`.
pub fn build_relation(
    sentence: &Sentence,
    start: usize,
    excluded: &HashSet<usize>,
) -> Result<TripleElement> {
    let mut element = TripleElement::new(start);
    let mut visited: HashSet<usize> = HashSet::new();
    visited.insert(start);

    let mut stack = vec![start];
    // A negação e os auxiliares da cópula moram nos filhos do verbo efetivo
    let effective = effective_verb(sentence, start);
    if effective != start {
        stack.push(effective);
        visited.insert(effective);
    }

    while let Some(current) = stack.pop() {
        for &child in sentence.children(current) {
            if excluded.contains(&child) || visited.contains(&child) {
                continue;
            }
            if admits(sentence, child) {
                visited.insert(child);
                element.add_piece(child);
                stack.push(child);
            }
        }
    }
    Ok(element)
}

/// A relação contém ao menos um token VERB/AUX da sentença?
pub fn has_verbal(sentence: &Sentence, element: &TripleElement) -> bool {
    element
        .token_ids()
        .into_iter()
        .any(|i| sentence.token(i).is_verbal())
}
