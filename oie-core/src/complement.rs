//! # Extrator de complementos
//!
//! A partir do sujeito e da relação prontos, identifica os núcleos de
//! complemento do predicado e monta um ou mais spans:
//!
//! - núcleos nominais coordenados viram um span combinado ("de banana, pera
//!   e maçã") e, sob `coordinating_conjunctions`, também um span por
//!   coordenado, com empréstimo da preposição do primeiro;
//! - orações subordinadas (`ccomp`/`advcl`) com sujeito explícito viram
//!   sub-extrações sob `subordinating_conjunctions` — o complemento do pai
//!   guarda só a conjunção ("que") e a proposição interna desce recursiva;
//! - subordinadas sem sujeito são complemento comum, conjunção incluída
//!   ("que iria viajar").

use std::collections::{BTreeSet, HashSet};

use crate::dfs::{self, SpanOptions};
use crate::element::{Extraction, TripleElement};
use crate::error::Result;
use crate::extractor::{self, ExtractorConfig};
use crate::relation;
use crate::sanitizer;
use crate::sentence::Sentence;
use crate::subject::{self, SubjectOutcome};
use crate::token::{DepRel, UPos};

/// Rótulos de filho que abrem núcleo de complemento.
fn is_head_dep(dep: &DepRel) -> bool {
    matches!(
        dep,
        DepRel::Obj | DepRel::Iobj | DepRel::Xcomp | DepRel::Obl | DepRel::Advmod | DepRel::Nmod
    )
}

/// Produz as extrações de um predicado com sujeito e relação já montados.
///
/// Sempre retorna ao menos uma extração (com complemento vazio quando nenhum
/// núcleo sobrevive); as demais compartilham sujeito e relação.
pub fn extract_complements(
    sentence: &Sentence,
    config: &ExtractorConfig,
    subject: &TripleElement,
    relation: &TripleElement,
    depth: usize,
) -> Result<Vec<Extraction>> {
    let Some(rel_core) = relation.core() else {
        return Ok(vec![Extraction::new(
            subject.clone(),
            relation.clone(),
            TripleElement::empty(),
        )]);
    };

    let core_token = sentence.token(rel_core);
    let is_cop = core_token.dep == DepRel::Cop && core_token.head != 0;
    let root = if is_cop {
        core_token.head
    } else {
        relation::effective_verb(sentence, rel_core)
    };

    let mut used: HashSet<usize> = HashSet::new();
    used.extend(subject.token_ids());
    used.extend(relation.token_ids());

    // Núcleos de complemento: filhos do root e dos verbos encadeados na
    // relação ("quer comer a maçã" acha o objeto embaixo de "comer")
    let mut parents: BTreeSet<usize> = BTreeSet::new();
    parents.insert(root);
    for id in relation.token_ids() {
        if sentence.token(id).is_verbal() {
            parents.insert(id);
        }
    }

    let mut heads: BTreeSet<usize> = BTreeSet::new();
    for &parent in &parents {
        for &child in sentence.children(parent) {
            let dep = &sentence.token(child).dep;
            if used.contains(&child) {
                continue;
            }
            if is_head_dep(dep) || dep.is_subordinate_clause() {
                heads.insert(child);
            }
        }
    }
    // Para cópula, o próprio nominal predicativo é núcleo ("é [rico]")
    let self_head = if is_cop && !used.contains(&root) {
        heads.insert(root);
        Some(root)
    } else {
        None
    };

    let mut out: Vec<Extraction> = Vec::new();
    for &head in &heads {
        let is_self = self_head == Some(head);
        if !is_self && sentence.token(head).dep.is_subordinate_clause() {
            extract_subordinate(sentence, config, subject, relation, head, depth, &used, &mut out)?;
        } else {
            extract_coordinated(sentence, config, subject, relation, head, is_self, &used, &mut out)?;
        }
    }

    if out.is_empty() {
        out.push(Extraction::new(
            subject.clone(),
            relation.clone(),
            TripleElement::empty(),
        ));
    }
    Ok(out)
}

/// Núcleo `ccomp`/`advcl`: sub-extração quando há sujeito explícito e a
/// chave está ligada; complemento comum quando não há sujeito; nada quando
/// há sujeito e a chave está desligada.
#[allow(clippy::too_many_arguments)]
fn extract_subordinate(
    sentence: &Sentence,
    config: &ExtractorConfig,
    subject: &TripleElement,
    relation: &TripleElement,
    head: usize,
    depth: usize,
    used: &HashSet<usize>,
    out: &mut Vec<Extraction>,
) -> Result<()> {
    let has_subject_child = sentence
        .children(head)
        .iter()
        .any(|&c| sentence.token(c).dep.is_subject());

    if config.subordinating_conjunctions && has_subject_child {
        if let SubjectOutcome::Found(sub_subject) =
            subject::find_subject(sentence, head, config, false)?
        {
            if !sub_subject.is_empty() {
                let subs = extractor::extract_at(sentence, config, head, Some(sub_subject), depth + 1)?;
                if !subs.is_empty() {
                    // O pai fica só com a conjunção; a proposição desce aninhada
                    let marks = sentence.children_with_dep(head, &DepRel::Mark);
                    let mut complement = TripleElement::empty();
                    if let Some((&first, rest)) = marks.split_first() {
                        complement = TripleElement::new(first);
                        for &mark in rest {
                            complement.add_piece(mark);
                        }
                    }
                    let mut extraction =
                        Extraction::new(subject.clone(), relation.clone(), complement);
                    extraction.sub_extractions = subs;
                    out.push(extraction);
                    return Ok(());
                }
            }
        }
    }

    if has_subject_child {
        // Subordinada com sujeito próprio não é material de complemento
        return Ok(());
    }

    let complement = dfs::complement_span(sentence, head, used)?;
    out.push(Extraction::new(subject.clone(), relation.clone(), complement));
    Ok(())
}

/// Núcleo não-subordinado: span nominal com coordenação, ou span largo para
/// `xcomp`/`advmod`.
#[allow(clippy::too_many_arguments)]
fn extract_coordinated(
    sentence: &Sentence,
    config: &ExtractorConfig,
    subject: &TripleElement,
    relation: &TripleElement,
    head: usize,
    is_self: bool,
    used: &HashSet<usize>,
    out: &mut Vec<Extraction>,
) -> Result<()> {
    let token = sentence.token(head);
    if !is_self && matches!(token.dep, DepRel::Xcomp | DepRel::Advmod) {
        let complement = dfs::complement_span(sentence, head, used)?;
        out.push(Extraction::new(subject.clone(), relation.clone(), complement));
        return Ok(());
    }

    let opts = SpanOptions {
        ignore_conjunctions: true,
        ..Default::default()
    };
    let base = dfs::nominal_span(sentence, head, opts, used)?;
    let peers = nominal_conj_chain(sentence, head);

    if peers.is_empty() {
        out.push(Extraction::new(subject.clone(), relation.clone(), base));
        return Ok(());
    }

    let head_case = leading_case_adp(sentence, head);
    let mut combined = base.clone();
    for &cc in &sentence.children_with_dep(head, &DepRel::Cc) {
        combined.add_piece(cc);
    }

    let mut peer_spans: Vec<TripleElement> = Vec::new();
    for &peer in &peers {
        let raw = dfs::nominal_span(sentence, peer, opts, used)?;
        for &cc in &sentence.children_with_dep(peer, &DepRel::Cc) {
            combined.add_piece(cc);
        }
        combined.absorb(&raw);

        // O span individual nasce já limpo: a vírgula separadora pendurada
        // no coordenado ficaria no meio depois do empréstimo da preposição
        let mut span = TripleElement::new(peer);
        for id in sanitizer::sanitized_ids(sentence, &raw) {
            span.add_piece(id);
        }
        let peer_has_case = sentence.child_with_dep(peer, &DepRel::Case).is_some();
        if !peer_has_case {
            if let Some(case) = head_case {
                span.add_piece(case);
            }
        }
        peer_spans.push(span);
    }

    out.push(Extraction::new(subject.clone(), relation.clone(), combined));

    if config.coordinating_conjunctions {
        out.push(Extraction::new(subject.clone(), relation.clone(), base));
        for span in peer_spans {
            out.push(Extraction::new(subject.clone(), relation.clone(), span));
        }
    }
    Ok(())
}

/// Cadeia transitiva de `conj` nominais a partir do núcleo.
fn nominal_conj_chain(sentence: &Sentence, head: usize) -> Vec<usize> {
    let mut chain: Vec<usize> = Vec::new();
    let mut frontier = vec![head];
    while let Some(current) = frontier.pop() {
        for &child in sentence.children(current) {
            let token = sentence.token(child);
            if token.dep == DepRel::Conj && !token.upos.is_verbal() && !chain.contains(&child) {
                chain.push(child);
                frontier.push(child);
            }
        }
    }
    chain.sort_unstable();
    chain
}

/// A preposição de abertura do núcleo: primeiro filho `case` com POS ADP.
fn leading_case_adp(sentence: &Sentence, head: usize) -> Option<usize> {
    sentence
        .children_with_dep(head, &DepRel::Case)
        .into_iter()
        .find(|&c| sentence.token(c).upos == UPos::Adp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu;
    use crate::sanitizer::render;

    fn parts(
        sentence: &Sentence,
        config: &ExtractorConfig,
        subject: usize,
        relation: usize,
    ) -> Vec<String> {
        let subject = TripleElement::new(subject);
        let relation = TripleElement::new(relation);
        extract_complements(sentence, config, &subject, &relation, 0)
            .unwrap()
            .iter()
            .map(|e| render(sentence, &e.complement))
            .collect()
    }

    const GOSTA: &str = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tgosta\tgostar\tVERB\t_\t_\t0\troot\t_\t_
3\tde\tde\tADP\t_\t_\t4\tcase\t_\t_
4\tbanana\tbanana\tNOUN\t_\t_\t2\tobl\t_\t_
5\t,\t,\tPUNCT\t_\t_\t6\tpunct\t_\t_
6\tpera\tpera\tNOUN\t_\t_\t4\tconj\t_\t_
7\te\te\tCCONJ\t_\t_\t8\tcc\t_\t_
8\tmaçã\tmaçã\tNOUN\t_\t_\t4\tconj\t_\t_
9\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_
";

    #[test]
    fn test_coordenacao_combinada_sem_chave() {
        let sent = conllu::parse_sentence(GOSTA, "1").unwrap();
        let config = ExtractorConfig::default();
        assert_eq!(parts(&sent, &config, 1, 2), vec!["de banana, pera e maçã"]);
    }

    #[test]
    fn test_coordenacao_decomposta_com_emprestimo_de_preposicao() {
        let sent = conllu::parse_sentence(GOSTA, "1").unwrap();
        let config = ExtractorConfig {
            coordinating_conjunctions: true,
            ..Default::default()
        };
        assert_eq!(
            parts(&sent, &config, 1, 2),
            vec!["de banana, pera e maçã", "de banana", "de pera", "de maçã"]
        );
    }

    #[test]
    fn test_subordinada_sem_sujeito_vira_complemento_com_mark() {
        // "disse que iria viajar"
        let bloco = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tdisse\tdizer\tVERB\t_\t_\t0\troot\t_\t_
3\tque\tque\tSCONJ\t_\t_\t5\tmark\t_\t_
4\tiria\tir\tAUX\t_\t_\t5\taux\t_\t_
5\tviajar\tviajar\tVERB\t_\t_\t2\tccomp\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        let config = ExtractorConfig {
            subordinating_conjunctions: true,
            ..Default::default()
        };
        assert_eq!(parts(&sent, &config, 1, 2), vec!["que iria viajar"]);
    }

    const DISSE_QUE_CHEGOU: &str = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tdisse\tdizer\tVERB\t_\t_\t0\troot\t_\t_
3\tque\tque\tSCONJ\t_\t_\t6\tmark\t_\t_
4\to\to\tDET\t_\t_\t5\tdet\t_\t_
5\tmenino\tmenino\tNOUN\t_\t_\t6\tnsubj\t_\t_
6\tchegou\tchegar\tVERB\t_\t_\t2\tccomp\t_\t_
";

    #[test]
    fn test_subordinada_com_sujeito_vira_sub_extracao() {
        let sent = conllu::parse_sentence(DISSE_QUE_CHEGOU, "1").unwrap();
        let config = ExtractorConfig {
            subordinating_conjunctions: true,
            ..Default::default()
        };
        let subject = TripleElement::new(1);
        let relation = TripleElement::new(2);
        let extractions =
            extract_complements(&sent, &config, &subject, &relation, 0).unwrap();
        assert_eq!(extractions.len(), 1);
        assert_eq!(render(&sent, &extractions[0].complement), "que");
        assert_eq!(extractions[0].sub_extractions.len(), 1);
        let sub = &extractions[0].sub_extractions[0];
        assert_eq!(render(&sent, &sub.subject), "o menino");
        assert_eq!(render(&sent, &sub.relation), "chegou");
        assert!(sub.complement.is_empty());
    }

    #[test]
    fn test_subordinada_com_sujeito_e_chave_desligada_some() {
        let sent = conllu::parse_sentence(DISSE_QUE_CHEGOU, "1").unwrap();
        let config = ExtractorConfig::default();
        // Sem núcleo aproveitável, sobra a extração de complemento vazio
        assert_eq!(parts(&sent, &config, 1, 2), vec![""]);
    }

    #[test]
    fn test_cupula_usa_o_nominal_predicativo() {
        // "o homem é rico"
        let bloco = "\
1\to\to\tDET\t_\t_\t2\tdet\t_\t_
2\thomem\thomem\tNOUN\t_\t_\t4\tnsubj\t_\t_
3\té\tser\tAUX\t_\t_\t4\tcop\t_\t_
4\trico\trico\tADJ\t_\t_\t0\troot\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        let config = ExtractorConfig::default();
        assert_eq!(parts(&sent, &config, 2, 3), vec!["rico"]);
    }

    #[test]
    fn test_objeto_embaixo_do_xcomp_encadeado() {
        // "quer comer a maçã" com relação "quer comer"
        let bloco = "\
1\tela\tela\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tquer\tquerer\tVERB\t_\t_\t0\troot\t_\t_
3\tcomer\tcomer\tVERB\t_\t_\t2\txcomp\t_\t_
4\ta\to\tDET\t_\t_\t5\tdet\t_\t_
5\tmaçã\tmaçã\tNOUN\t_\t_\t3\tobj\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        let config = ExtractorConfig::default();
        let subject = TripleElement::new(1);
        let mut relation = TripleElement::new(2);
        relation.add_piece(3);
        let extractions =
            extract_complements(&sent, &config, &subject, &relation, 0).unwrap();
        let spans: Vec<String> = extractions
            .iter()
            .map(|e| render(&sent, &e.complement))
            .collect();
        assert_eq!(spans, vec!["a maçã"]);
    }
}
