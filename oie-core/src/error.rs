//! # Erros do núcleo de extração
//!
//! A taxonomia é curta de propósito: ou a entrada está malformada (e é
//! rejeitada na fronteira do leitor CoNLL-U), ou uma invariante interna foi
//! violada durante a travessia da árvore. Sujeito ausente, relação sem verbo
//! e sentenças sem predicado são condições normais do fluxo — não erros.

use thiserror::Error;

/// Erros que o núcleo reporta ao chamador, sempre por sentença.
///
/// O driver de lote registra o erro e segue para a próxima sentença; a
/// extração é determinística, então não há retry.
#[derive(Error, Debug)]
pub enum OieError {
    /// Bloco CoNLL-U rejeitado: colunas faltando, HEAD não-inteiro,
    /// HEAD fora do intervalo ou ciclo na cadeia de heads.
    #[error("sentença malformada: {0}")]
    MalformedSentence(String),

    /// Invariante interna violada durante a extração (ciclo detectado pelo
    /// conjunto de visitados, recursão além do limite seguro). Fatal para a
    /// sentença corrente; as demais continuam.
    #[error("invariante interna violada: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, OieError>;
