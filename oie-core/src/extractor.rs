//! # Orquestrador de extração
//!
//! O laço principal percorre os núcleos de predicado da sentença em ordem e,
//! para cada um: acha o sujeito, monta a relação, extrai os complementos
//! (com as sub-extrações das subordinadas) e replica pelas coordenações
//! verbais. O módulo de apostos varre a árvore por conta própria; no final
//! tudo passa por sanitização, validação e deduplicação.
//!
//! `extract` é uma função pura por sentença: sem estado compartilhado, sem
//! I/O — o chamador paraleliza por sentença como quiser.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::appositive;
use crate::complement;
use crate::conjunction;
use crate::element::{Extraction, ExtractionSet, TripleElement};
use crate::error::{OieError, Result};
use crate::relation;
use crate::sanitizer;
use crate::sentence::Sentence;
use crate::subject::{self, SubjectOutcome};
use crate::token::{DepRel, Token};

/// Limite de recursão das subordinadas aninhadas. A profundidade real é
/// limitada pela altura da árvore; estourar isso é entrada patológica.
const MAX_DEPTH: usize = 64;

/// Chaves de configuração dos módulos de extração.
///
/// Todas desligadas por padrão: a linha de base emite só a tripla básica de
/// cada predicado não-subordinado. `debug` aumenta o rastreamento via
/// `tracing` e nunca muda a saída.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Divide predicados coordenados e decompõe complementos múltiplos.
    pub coordinating_conjunctions: bool,
    /// Emite sub-extrações para `ccomp`/`advcl` com sujeito explícito.
    pub subordinating_conjunctions: bool,
    /// Chave reservada: admite extrações de sujeito vazio, sem sintetizar
    /// antecedentes.
    pub hidden_subjects: bool,
    /// Sintetiza triplas "é-um" a partir de apostos.
    pub appositive: bool,
    /// Inferência transitiva sobre as triplas de aposto (requer `appositive`).
    pub appositive_transitivity: bool,
    /// Rastreamento verboso; sem efeito na saída.
    pub debug: bool,
}

/// O extrator de triplas: configuração mais o ponto de entrada por sentença.
pub struct Extractor {
    pub config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Extractor { config }
    }

    /// Extrai o conjunto de triplas de uma sentença analisada.
    pub fn extract(&self, sentence: &Sentence) -> Result<ExtractionSet> {
        let config = &self.config;
        let mut collected: Vec<Extraction> = Vec::new();

        for token in sentence.tokens() {
            if !is_predicate_head(sentence, token) {
                continue;
            }
            if config.debug {
                debug!(sent = sentence.id(), verbo = %token.text, "núcleo de predicado");
            }
            collected.extend(extract_at(sentence, config, token.index, None, 0)?);
        }

        if config.appositive {
            let pre_transitivity = collected.clone();
            for appos in appositive::synthesize(sentence)? {
                let inferred = if config.appositive_transitivity {
                    appositive::infer_transitive(sentence, &appos, &pre_transitivity)
                } else {
                    Vec::new()
                };
                collected.push(appos);
                collected.extend(inferred);
            }
        }

        let mut set = ExtractionSet::new();
        for extraction in collected {
            if let Some(valid) = sanitizer::validate(sentence, config, extraction) {
                if config.debug {
                    debug!(
                        sent = sentence.id(),
                        tripla = %sanitizer::tuple_form(sentence, &valid),
                        "extração válida"
                    );
                }
                set.insert(sentence, valid);
            }
        }
        Ok(set)
    }
}

/// Um token abre proposição própria?
///
/// Auxiliares, `xcomp` e subordinadas são absorvidos por outro predicado;
/// um `conj` verbal só abre proposição se trouxer sujeito próprio (sem ele,
/// é o módulo de coordenação que o replica).
fn is_predicate_head(sentence: &Sentence, token: &Token) -> bool {
    if !token.upos.is_verbal() {
        return false;
    }
    match &token.dep {
        DepRel::Aux
        | DepRel::AuxPass
        | DepRel::Xcomp
        | DepRel::Ccomp
        | DepRel::Advcl
        | DepRel::Csubj
        | DepRel::CsubjPass => false,
        DepRel::Conj => sentence
            .children(token.index)
            .iter()
            .any(|&c| sentence.token(c).dep.is_subject()),
        _ => true,
    }
}

/// Pipeline completo de um predicado: sujeito, relação, complementos e
/// réplica pelas coordenações. Usado no laço principal e na recursão das
/// subordinadas (com o sujeito já resolvido).
pub(crate) fn extract_at(
    sentence: &Sentence,
    config: &ExtractorConfig,
    verb: usize,
    subject_override: Option<TripleElement>,
    depth: usize,
) -> Result<Vec<Extraction>> {
    if depth > MAX_DEPTH {
        return Err(OieError::InternalInvariant(format!(
            "recursão além do limite seguro ({MAX_DEPTH}) no token {verb}"
        )));
    }

    let subject = match subject_override {
        Some(subject) => subject,
        None => match subject::find_subject(sentence, verb, config, true)? {
            SubjectOutcome::Found(subject) => subject,
            SubjectOutcome::Hidden => TripleElement::empty(),
            // Sem sujeito e sem subordinadas para segurar um contêiner,
            // o predicado é pulado em silêncio
            SubjectOutcome::Missing if config.subordinating_conjunctions => {
                TripleElement::empty()
            }
            SubjectOutcome::Missing => return Ok(Vec::new()),
        },
    };

    let excluded: HashSet<usize> = subject.token_ids().into_iter().collect();
    let rel = relation::build_relation(sentence, verb, &excluded)?;
    if !relation::has_verbal(sentence, &rel) {
        return Ok(Vec::new());
    }

    let mut group = complement::extract_complements(sentence, config, &subject, &rel, depth)?;

    if config.coordinating_conjunctions {
        // Para cópula, os conj verbais penduram no nominal predicativo
        let coordination_root = relation::effective_verb(sentence, verb);
        for peer in conjunction::verbal_peers(sentence, coordination_root) {
            let peer_relation = relation::build_relation(sentence, peer, &excluded)?;
            if !relation::has_verbal(sentence, &peer_relation) {
                continue;
            }
            group.extend(complement::extract_complements(
                sentence,
                config,
                &subject,
                &peer_relation,
                depth,
            )?);
        }
        conjunction::redistribute(sentence, &mut group);
    }

    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu;

    fn all_on() -> ExtractorConfig {
        ExtractorConfig {
            coordinating_conjunctions: true,
            subordinating_conjunctions: true,
            hidden_subjects: false,
            appositive: true,
            appositive_transitivity: true,
            debug: false,
        }
    }

    fn triples(sentence: &Sentence, config: ExtractorConfig) -> Vec<String> {
        Extractor::new(config)
            .extract(sentence)
            .unwrap()
            .iter()
            .map(|e| sanitizer::tuple_form(sentence, e))
            .collect()
    }

    #[test]
    fn test_tripla_basica() {
        let bloco = "\
1\to\to\tDET\t_\t_\t2\tdet\t_\t_
2\tmenino\tmenino\tNOUN\t_\t_\t3\tnsubj\t_\t_
3\tcomeu\tcomer\tVERB\t_\t_\t0\troot\t_\t_
4\ta\to\tDET\t_\t_\t5\tdet\t_\t_
5\tmaçã\tmaçã\tNOUN\t_\t_\t3\tobj\t_\t_
6\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(triples(&sent, all_on()), vec!["(o menino; comeu; a maçã)"]);
    }

    #[test]
    fn test_verbos_coordenados_compartilham_complemento() {
        let bloco = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tleu\tler\tVERB\t_\t_\t0\troot\t_\t_
3\te\te\tCCONJ\t_\t_\t4\tcc\t_\t_
4\tescreveu\tescrever\tVERB\t_\t_\t2\tconj\t_\t_
5\tum\tum\tDET\t_\t_\t6\tdet\t_\t_
6\tlivro\tlivro\tNOUN\t_\t_\t4\tobj\t_\t_
7\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec!["(ele; leu; um livro)", "(ele; escreveu; um livro)"]
        );
    }

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
    fn test_aposto_com_transitividade() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec![
                "(Júlio; anunciou; a decisão)",
                "(Júlio; é; o diretor do hospital)",
                "(o diretor do hospital; anunciou; a decisão)",
            ]
        );
    }

    #[test]
    fn test_aposto_sem_transitividade() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let config = ExtractorConfig {
            appositive: true,
            ..Default::default()
        };
        assert_eq!(
            triples(&sent, config),
            vec![
                "(Júlio; anunciou; a decisão)",
                "(Júlio; é; o diretor do hospital)",
            ]
        );
    }

    #[test]
    fn test_subordinada_com_sujeito_vira_sub_extracao() {
        let bloco = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tdisse\tdizer\tVERB\t_\t_\t0\troot\t_\t_
3\tque\tque\tSCONJ\t_\t_\t6\tmark\t_\t_
4\to\to\tDET\t_\t_\t5\tdet\t_\t_
5\tmenino\tmenino\tNOUN\t_\t_\t6\tnsubj\t_\t_
6\tchegou\tchegar\tVERB\t_\t_\t2\tccomp\t_\t_
7\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec!["(ele; disse; que) [(o menino; chegou; )]"]
        );
    }

    #[test]
    fn test_subordinada_sem_sujeito_vira_complemento() {
        let bloco = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tdisse\tdizer\tVERB\t_\t_\t0\troot\t_\t_
3\tque\tque\tSCONJ\t_\t_\t5\tmark\t_\t_
4\tiria\tir\tAUX\t_\t_\t5\taux\t_\t_
5\tviajar\tviajar\tVERB\t_\t_\t2\tccomp\t_\t_
6\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec!["(ele; disse; que iria viajar)"]
        );
    }

    #[test]
    fn test_oracao_relativa() {
        let bloco = "\
1\to\to\tDET\t_\t_\t2\tdet\t_\t_
2\thomem\thomem\tNOUN\t_\t_\t8\tnsubj\t_\t_
3\tque\tque\tPRON\t_\tPronType=Rel\t4\tnsubj\t_\t_
4\tcomprou\tcomprar\tVERB\t_\t_\t2\tacl:relcl\t_\t_
5\to\to\tDET\t_\t_\t6\tdet\t_\t_
6\tcarro\tcarro\tNOUN\t_\t_\t4\tobj\t_\t_
7\té\tser\tAUX\t_\t_\t8\tcop\t_\t_
8\trico\trico\tADJ\t_\t_\t0\troot\t_\t_
9\t.\t.\tPUNCT\t_\t_\t8\tpunct\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec!["(o homem; comprou; o carro)", "(o homem; é; rico)"]
        );
    }

    #[test]
    fn test_complementos_coordenados_decompostos() {
        let bloco = "\
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
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, all_on()),
            vec![
                "(ele; gosta; de banana, pera e maçã)",
                "(ele; gosta; de banana)",
                "(ele; gosta; de pera)",
                "(ele; gosta; de maçã)",
            ]
        );
    }

    #[test]
    fn test_linha_de_base_sem_modulos() {
        // Sem chaves, a coordenação não divide nem redistribui
        let bloco = "\
1\tele\tele\tPRON\t_\t_\t2\tnsubj\t_\t_
2\tleu\tler\tVERB\t_\t_\t0\troot\t_\t_
3\te\te\tCCONJ\t_\t_\t4\tcc\t_\t_
4\tescreveu\tescrever\tVERB\t_\t_\t2\tconj\t_\t_
5\tum\tum\tDET\t_\t_\t6\tdet\t_\t_
6\tlivro\tlivro\tNOUN\t_\t_\t4\tobj\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert_eq!(
            triples(&sent, ExtractorConfig::default()),
            vec!["(ele; leu; )"]
        );
    }

    #[test]
    fn test_determinismo() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let primeira = triples(&sent, all_on());
        let segunda = triples(&sent, all_on());
        assert_eq!(primeira, segunda);
    }

    #[test]
    fn test_unicidade_das_triplas() {
        let sent = conllu::parse_sentence(JULIO, "1").unwrap();
        let formas = triples(&sent, all_on());
        let mut unicas = formas.clone();
        unicas.sort();
        unicas.dedup();
        assert_eq!(formas.len(), unicas.len());
    }

    #[test]
    fn test_sentenca_sem_predicado() {
        let bloco = "1\tcasa\tcasa\tNOUN\t_\t_\t0\troot\t_\t_\n";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        assert!(Extractor::new(all_on()).extract(&sent).unwrap().is_empty());
    }

    #[test]
    fn test_sujeito_oculto_so_com_a_chave() {
        let bloco = "\
1\tchove\tchover\tVERB\t_\tPerson=3\t0\troot\t_\t_
2\tmuito\tmuito\tADV\t_\t_\t1\tadvmod\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        // Sem a chave o impessoal é descartado na validação
        assert!(Extractor::new(ExtractorConfig::default())
            .extract(&sent)
            .unwrap()
            .is_empty());

        let config = ExtractorConfig {
            hidden_subjects: true,
            ..Default::default()
        };
        assert_eq!(triples(&sent, config), vec!["(; chove; muito)"]);
    }

    #[test]
    fn test_clitico_renderiza_grudado() {
        let bloco = "\
1\tVende\tvender\tVERB\t_\t_\t0\troot\t_\t_
2\t-\t-\tPUNCT\t_\t_\t1\tpunct\t_\t_
3\tse\tse\tPRON\t_\t_\t1\texpl:pv\t_\t_
4\tcasas\tcasa\tNOUN\t_\t_\t1\tobj\t_\t_
";
        let sent = conllu::parse_sentence(bloco, "1").unwrap();
        let config = ExtractorConfig {
            hidden_subjects: true,
            ..Default::default()
        };
        assert_eq!(triples(&sent, config), vec!["(; Vende-se; casas)"]);
    }
}
