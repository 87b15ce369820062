//! # oie-core — Extração de Informação Aberta para Português
//!
//! Motor de extração de triplas proposicionais (sujeito; relação;
//! complemento) sobre sentenças já anotadas em Universal Dependencies v2,
//! com sub-triplas aninhadas para orações subordinadas.
//!
//! ## Fluxo por sentença
//!
//! ```text
//! CoNLL-U → Sentence → [sujeito → relação → complementos] por predicado
//!                    → coordenação de verbos → apostos → sanitiza/valida/dedup
//! ```
//!
//! O núcleo é uma função pura por sentença ([`Extractor::extract`]): sem
//! estado compartilhado, sem I/O, determinística. Os módulos de extração são
//! ligados um a um pela [`ExtractorConfig`]; todos desligados, sai só a
//! tripla básica de cada predicado.

pub mod appositive;
pub mod complement;
pub mod conjunction;
pub mod conllu;
pub mod dfs;
pub mod element;
pub mod error;
pub mod extractor;
pub mod output;
pub mod relation;
pub mod sanitizer;
pub mod sentence;
pub mod subject;
pub mod token;

pub use element::{Extraction, ExtractionSet, TripleElement};
pub use error::OieError;
pub use extractor::{Extractor, ExtractorConfig};
pub use output::{DocumentOutput, SentenceOutput};
pub use sentence::Sentence;
pub use token::{DepRel, Token, UPos};
