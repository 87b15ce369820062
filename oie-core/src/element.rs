//! # Elementos de tripla e extrações
//!
//! Um [`TripleElement`] é um conjunto ordenável de tokens de uma mesma
//! sentença, ancorado em um token núcleo (`core`). Os três elementos de uma
//! [`Extraction`] — sujeito, relação e complemento — são construídos pelas
//! travessias e só depois congelados pela validação.
//!
//! A cópula sintética "é" das triplas de aposto não existe na sentença; o
//! elemento carrega a flag `synthetic` e é renderizado diretamente.

use std::collections::BTreeSet;

use crate::sentence::Sentence;
use crate::token::Token;

/// Texto da cópula injetada nas triplas de aposto.
pub const SYNTHETIC_COPULA: &str = "é";

/// Um span de tokens de uma sentença, núcleo incluído.
#[derive(Debug, Clone, Default)]
pub struct TripleElement {
    core: Option<usize>,
    pieces: BTreeSet<usize>,
    synthetic: bool,
}

impl TripleElement {
    /// Elemento ancorado no token dado.
    pub fn new(core: usize) -> Self {
        TripleElement {
            core: Some(core),
            pieces: BTreeSet::new(),
            synthetic: false,
        }
    }

    /// Elemento vazio (sujeito oculto, contêiner).
    pub fn empty() -> Self {
        TripleElement::default()
    }

    /// A cópula "é" injetada pelo módulo de apostos.
    pub fn synthetic_copula() -> Self {
        TripleElement {
            core: None,
            pieces: BTreeSet::new(),
            synthetic: true,
        }
    }

    pub fn core(&self) -> Option<usize> {
        self.core
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Adiciona um token ao span. O núcleo nunca é duplicado.
    pub fn add_piece(&mut self, index: usize) {
        if self.core != Some(index) {
            self.pieces.insert(index);
        }
    }

    /// Absorve todos os tokens de outro elemento como peças deste.
    pub fn absorb(&mut self, other: &TripleElement) {
        for index in other.token_ids() {
            self.add_piece(index);
        }
    }

    /// Remove uma peça (nunca o núcleo).
    pub fn remove_piece(&mut self, index: usize) {
        self.pieces.remove(&index);
    }

    /// Todos os índices do span, ordenados pela posição na sentença.
    pub fn token_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.pieces.iter().copied().collect();
        if let Some(core) = self.core {
            ids.push(core);
            ids.sort_unstable();
        }
        ids
    }

    pub fn contains(&self, index: usize) -> bool {
        self.core == Some(index) || self.pieces.contains(&index)
    }

    /// Vazio de verdade: sem núcleo, sem peças, não-sintético.
    pub fn is_empty(&self) -> bool {
        !self.synthetic && self.core.is_none() && self.pieces.is_empty()
    }

    /// Tokens do span, em ordem de sentença.
    pub fn tokens<'a>(&self, sentence: &'a Sentence) -> Vec<&'a Token> {
        self.token_ids()
            .into_iter()
            .map(|i| sentence.token(i))
            .collect()
    }
}

/// Uma proposição extraída: (sujeito; relação; complemento) mais as
/// sub-extrações de orações subordinadas.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub subject: TripleElement,
    pub relation: TripleElement,
    pub complement: TripleElement,
    pub sub_extractions: Vec<Extraction>,
}

impl Extraction {
    pub fn new(
        subject: TripleElement,
        relation: TripleElement,
        complement: TripleElement,
    ) -> Self {
        Extraction {
            subject,
            relation,
            complement,
            sub_extractions: Vec::new(),
        }
    }

    pub fn attach_sub(&mut self, sub: Extraction) {
        self.sub_extractions.push(sub);
    }
}

/// Conjunto de extrações com deduplicação pela forma de tupla sanitizada.
///
/// A primeira ocorrência vence; a ordem de inserção é a ordem determinística
/// de renderização.
#[derive(Debug, Default)]
pub struct ExtractionSet {
    items: Vec<Extraction>,
    seen: std::collections::HashSet<String>,
}

impl ExtractionSet {
    pub fn new() -> Self {
        ExtractionSet::default()
    }

    /// Insere se a forma de tupla ainda não foi vista. Retorna `true` quando
    /// a extração entrou no conjunto.
    pub fn insert(&mut self, sentence: &Sentence, extraction: Extraction) -> bool {
        let key = crate::sanitizer::tuple_form(sentence, &extraction);
        if self.seen.insert(key) {
            self.items.push(extraction);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extraction> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
