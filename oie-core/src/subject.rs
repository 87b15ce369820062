//! # Localizador de sujeito
//!
//! Dado um token candidato a núcleo de predicado, encontra o sujeito lógico:
//! o filho `nsubj`/`nsubj:pass`/`csubj`/`csubj:pass` mais à esquerda, com os
//! desvios da gramática — pronome relativo remete ao antecedente, passiva e
//! existencial promovem o objeto, oração relativa herda o head nominal.
//!
//! Sujeitos são sempre montados com `ignore_appos`: o aposto é uma tripla
//! própria do módulo de apostos e não pertence ao span do sujeito.

use std::collections::HashSet;

use crate::dfs::{self, SpanOptions};
use crate::element::TripleElement;
use crate::error::Result;
use crate::extractor::ExtractorConfig;
use crate::sentence::Sentence;
use crate::token::DepRel;

/// Lemas de verbos existenciais cujo objeto é o sujeito lógico.
const EXISTENTIAL_VERB_LEMMAS: &[&str] = &["haver", "ocorrer", "existir"];

/// Resultado da busca de sujeito.
#[derive(Debug)]
pub enum SubjectOutcome {
    /// Sujeito encontrado e montado.
    Found(TripleElement),
    /// Sujeito oculto: elemento vazio admitido só sob `hidden_subjects`.
    Hidden,
    /// Nenhum sujeito — a extração é descartada rio acima.
    Missing,
}

/// Procura o sujeito lógico do predicado `verb`.
///
/// `allow_hidden` desliga a injeção de sujeito oculto (passo usado na
/// recursão das subordinadas, que exige sujeito explícito).
pub fn find_subject(
    sentence: &Sentence,
    verb: usize,
    config: &ExtractorConfig,
    allow_hidden: bool,
) -> Result<SubjectOutcome> {
    // Auxiliares e cópulas não carregam sujeito: o predicado é o head
    let mut verb = verb;
    if matches!(
        sentence.token(verb).dep,
        DepRel::Aux | DepRel::AuxPass | DepRel::Cop
    ) {
        match sentence.head_of(verb) {
            Some(head) => verb = head.index,
            None => return Ok(SubjectOutcome::Missing),
        }
    }

    let subject_opts = SpanOptions {
        ignore_appos: true,
        as_subject: true,
        ..Default::default()
    };
    let no_exclusions = HashSet::new();

    // Filho de sujeito mais à esquerda
    let selected = sentence
        .children(verb)
        .iter()
        .copied()
        .find(|&c| sentence.token(c).dep.is_subject());

    if let Some(selected) = selected {
        let token = sentence.token(selected);

        // Pronome relativo: o sujeito real é o antecedente (head do verbo)
        if token.is_relative_pronoun() {
            return match sentence.head_of(verb) {
                Some(antecedent) => Ok(SubjectOutcome::Found(dfs::nominal_span(
                    sentence,
                    antecedent.index,
                    subject_opts,
                    &no_exclusions,
                )?)),
                None => Ok(SubjectOutcome::Missing),
            };
        }

        // Sujeito oracional: span largo da oração inteira
        if matches!(token.dep, DepRel::Csubj | DepRel::CsubjPass) {
            return Ok(SubjectOutcome::Found(dfs::complement_span(
                sentence,
                selected,
                &no_exclusions,
            )?));
        }

        return Ok(SubjectOutcome::Found(dfs::nominal_span(
            sentence,
            selected,
            subject_opts,
            &no_exclusions,
        )?));
    }

    // Sem filho de sujeito: passiva e existencial promovem o objeto
    let is_passive = sentence.child_with_dep(verb, &DepRel::AuxPass).is_some();
    let is_existential =
        EXISTENTIAL_VERB_LEMMAS.contains(&sentence.token(verb).lemma.as_str());
    if is_passive || is_existential {
        if let Some(object) = sentence.child_with_dep(verb, &DepRel::Obj) {
            return Ok(SubjectOutcome::Found(dfs::nominal_span(
                sentence,
                object,
                subject_opts,
                &no_exclusions,
            )?));
        }
    }

    // Oração adjetiva: o sujeito é o nominal modificado
    if matches!(sentence.token(verb).dep, DepRel::Acl | DepRel::AclRelcl) {
        if let Some(head) = sentence.head_of(verb) {
            return Ok(SubjectOutcome::Found(dfs::nominal_span(
                sentence,
                head.index,
                subject_opts,
                &no_exclusions,
            )?));
        }
    }

    // Sujeito oculto: chave reservada — permite o vazio, não sintetiza nada
    let impersonal = sentence.token(verb).feat("Person") == Some("3");
    if allow_hidden && (config.hidden_subjects || impersonal) {
        return Ok(SubjectOutcome::Hidden);
    }

    Ok(SubjectOutcome::Missing)
}
