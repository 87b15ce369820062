//! # Módulo de apostos
//!
//! Um aposto renomeia o nominal que acompanha: "Júlio, o diretor do
//! hospital," afirma que Júlio *é* o diretor do hospital. A síntese varre a
//! sentença atrás de `appos` e emite triplas "é-um" com uma cópula injetada
//! (o elemento sintético — não há token "é" na sentença).
//!
//! A transitividade aplica a inferência óbvia por cima das extrações já
//! coletadas: de (A; é; B) e (A; R; C) sai (B; R; C). Passada única — as
//! inferidas não geram novas inferências.

use std::collections::HashSet;

use crate::dfs::{self, SpanOptions};
use crate::element::{Extraction, TripleElement};
use crate::error::Result;
use crate::sanitizer;
use crate::sentence::Sentence;
use crate::token::DepRel;

/// Sintetiza uma tripla (head; é; aposto) para cada `appos` da sentença.
///
/// Apostos cujo head está sob `ccomp`/`xcomp` são pulados: a subordinada já
/// produz a mesma informação e a tripla sairia redundante.
pub fn synthesize(sentence: &Sentence) -> Result<Vec<Extraction>> {
    let no_exclusions = HashSet::new();
    let mut extractions = Vec::new();

    for token in sentence.tokens() {
        if token.dep != DepRel::Appos || token.head == 0 {
            continue;
        }
        let head = sentence.token(token.head);
        if matches!(head.dep, DepRel::Ccomp | DepRel::Xcomp) {
            continue;
        }

        let subject = dfs::nominal_span(
            sentence,
            head.index,
            SpanOptions {
                ignore_appos: true,
                ..Default::default()
            },
            &no_exclusions,
        )?;
        let complement =
            dfs::nominal_span(sentence, token.index, SpanOptions::default(), &no_exclusions)?;

        extractions.push(Extraction::new(
            subject,
            TripleElement::synthetic_copula(),
            complement,
        ));
    }
    Ok(extractions)
}

/// Inferência transitiva de uma tripla de aposto sobre as extrações
/// oracionais já coletadas.
///
/// O casamento é por igualdade do texto sanitizado do sujeito. As inferidas
/// herdam relação, complemento e sub-extrações da oracional de origem.
pub fn infer_transitive(
    sentence: &Sentence,
    appositive: &Extraction,
    clausal: &[Extraction],
) -> Vec<Extraction> {
    let renamed = sanitizer::render(sentence, &appositive.subject);
    if renamed.is_empty() {
        return Vec::new();
    }

    clausal
        .iter()
        .filter(|e| sanitizer::render(sentence, &e.subject) == renamed)
        .map(|e| {
            let mut inferred = e.clone();
            inferred.subject = appositive.complement.clone();
            inferred
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu;
    use crate::sanitizer::render;

    const JULIO: &str = "\
1\tJúlio\tJúlio\tPROPN\t_\t_\t8\tnsubj\t_\t_
2\t,\t,\tPUNCT\t_\t_\t4\tpunct\t_\t_
3\to\to\tDET\t_\t_\t4\tdet\t_\t_
4\tdiretor\tdiretor\tNOUN\t_\t_\t1\tappos\t_\t_
5\tdo\tde\tADP\t_\t_\t6\tcase\t_\t_
6\thospital\thospital\tNOUN\t_\t_\t4\tnmod\t_\t_
7\t,\t,\tPUNCT\t_\t_\t4\tpunct\t_\t_
8\tanunciou\tanunciar\tVERB\t_\t_\t0\troot\t_\t_
9\ta\to\tDET\t_\t_\t10\tdet\t_\t_
10\tdecisão\tdecisão\tNOUN\t_\t_\t8\tobj\t_\t_
11\t.\t.\tPUNCT\t_\t_\t8\tpunct\t_\t_
";

    #[test]
    fn test_sintese_basica() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let triplas = synthesize(&sent).unwrap();
        assert_eq!(triplas.len(), 1);
        assert_eq!(render(&sent, &triplas[0].subject), "Júlio");
        assert_eq!(render(&sent, &triplas[0].relation), "é");
        assert_eq!(render(&sent, &triplas[0].complement), "o diretor do hospital");
        assert!(triplas[0].relation.is_synthetic());
    }

    #[test]
    fn test_aposto_sob_ccomp_e_pulado() {
        // "disse que Júlio, o diretor, saiu" — head do appos está sob ccomp?
        // Aqui o head do aposto ("Júlio") tem dep nsubj; o caso pulado é o
        // head com dep ccomp/xcomp diretamente.
        let bloco = "\
1\tdisse\tdizer\tVERB\t_\t_\t0\troot\t_\t_
2\tser\tser\tVERB\t_\t_\t1\tccomp\t_\t_
3\tdiretor\tdiretor\tNOUN\t_\t_\t2\tappos\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert!(synthesize(&sent).unwrap().is_empty());
    }

    #[test]
    fn test_transitividade() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let appos = &synthesize(&sent).unwrap()[0];

        let mut subject = TripleElement::new(1);
        subject.add_piece(2); // vírgula some na sanitização
        let relation = TripleElement::new(8);
        let mut complement = TripleElement::new(10);
        complement.add_piece(9);
        let clausal = vec![Extraction::new(subject, relation, complement)];

        let inferidas = infer_transitive(&sent, appos, &clausal);
        assert_eq!(inferidas.len(), 1);
        assert_eq!(render(&sent, &inferidas[0].subject), "o diretor do hospital");
        assert_eq!(render(&sent, &inferidas[0].relation), "anunciou");
        assert_eq!(render(&sent, &inferidas[0].complement), "a decisão");
    }

    #[test]
    fn test_sem_casamento_sem_inferencia() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let appos = &synthesize(&sent).unwrap()[0];
        // Sujeito diferente ("a decisão") não casa com "Júlio"
        let clausal = vec![Extraction::new(
            TripleElement::new(10),
            TripleElement::new(8),
            TripleElement::empty(),
        )];
        assert!(infer_transitive(&sent, appos, &clausal).is_empty());
    }
}
