//! # Token anotado em Universal Dependencies
//!
//! O `Token` é a unidade atômica de uma sentença analisada: forma, lema,
//! classe gramatical (UPOS), relação de dependência com o head e o mapa de
//! traços morfológicos. Os rótulos fechados do esquema UD v2 viram enums —
//! o casamento de padrões sobre eles substitui comparações de strings
//! espalhadas pelas regras de extração.
//!
//! ## Convenções de índice
//!
//! - Índices de token são 1-based, como no CoNLL-U.
//! - `head == 0` significa raiz da sentença (`dep == Root`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Classe gramatical grossa do conjunto universal (UPOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UPos {
    Verb,
    Aux,
    Noun,
    Propn,
    Pron,
    Det,
    Adp,
    Adj,
    Adv,
    Cconj,
    Sconj,
    Punct,
    Num,
    Intj,
    Part,
    Sym,
    X,
}

impl UPos {
    /// Converte o rótulo UPOS do CoNLL-U. Rótulos desconhecidos caem em `X`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "VERB" => UPos::Verb,
            "AUX" => UPos::Aux,
            "NOUN" => UPos::Noun,
            "PROPN" => UPos::Propn,
            "PRON" => UPos::Pron,
            "DET" => UPos::Det,
            "ADP" => UPos::Adp,
            "ADJ" => UPos::Adj,
            "ADV" => UPos::Adv,
            "CCONJ" => UPos::Cconj,
            "SCONJ" => UPos::Sconj,
            "PUNCT" => UPos::Punct,
            "NUM" => UPos::Num,
            "INTJ" => UPos::Intj,
            "PART" => UPos::Part,
            "SYM" => UPos::Sym,
            _ => UPos::X,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            UPos::Verb => "VERB",
            UPos::Aux => "AUX",
            UPos::Noun => "NOUN",
            UPos::Propn => "PROPN",
            UPos::Pron => "PRON",
            UPos::Det => "DET",
            UPos::Adp => "ADP",
            UPos::Adj => "ADJ",
            UPos::Adv => "ADV",
            UPos::Cconj => "CCONJ",
            UPos::Sconj => "SCONJ",
            UPos::Punct => "PUNCT",
            UPos::Num => "NUM",
            UPos::Intj => "INTJ",
            UPos::Part => "PART",
            UPos::Sym => "SYM",
            UPos::X => "X",
        }
    }

    /// VERB ou AUX — o que pode ancorar uma relação.
    pub fn is_verbal(&self) -> bool {
        matches!(self, UPos::Verb | UPos::Aux)
    }
}

/// Relação de dependência UD do token para o seu head.
///
/// O conjunto cobre os rótulos que as regras de extração consultam; qualquer
/// outro rótulo é preservado em `Other` para não perder informação do parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepRel {
    Nsubj,
    NsubjPass,
    Csubj,
    CsubjPass,
    Obj,
    Iobj,
    Obl,
    Xcomp,
    Ccomp,
    Advcl,
    Advmod,
    Nmod,
    Amod,
    Det,
    Case,
    Cc,
    Conj,
    Cop,
    Aux,
    AuxPass,
    Mark,
    Appos,
    Acl,
    AclRelcl,
    Flat,
    FlatName,
    Nummod,
    Punct,
    ExplPv,
    Dep,
    Root,
    Other(String),
}

impl DepRel {
    /// Converte o rótulo DEPREL do CoNLL-U (subtipos com `:` incluídos).
    pub fn from_label(label: &str) -> Self {
        match label {
            "nsubj" => DepRel::Nsubj,
            "nsubj:pass" => DepRel::NsubjPass,
            "csubj" => DepRel::Csubj,
            "csubj:pass" => DepRel::CsubjPass,
            "obj" => DepRel::Obj,
            "iobj" => DepRel::Iobj,
            "obl" => DepRel::Obl,
            "xcomp" => DepRel::Xcomp,
            "ccomp" => DepRel::Ccomp,
            "advcl" => DepRel::Advcl,
            "advmod" => DepRel::Advmod,
            "nmod" => DepRel::Nmod,
            "amod" => DepRel::Amod,
            "det" => DepRel::Det,
            "case" => DepRel::Case,
            "cc" => DepRel::Cc,
            "conj" => DepRel::Conj,
            "cop" => DepRel::Cop,
            "aux" => DepRel::Aux,
            "aux:pass" => DepRel::AuxPass,
            "mark" => DepRel::Mark,
            "appos" => DepRel::Appos,
            "acl" => DepRel::Acl,
            "acl:relcl" => DepRel::AclRelcl,
            "flat" => DepRel::Flat,
            "flat:name" => DepRel::FlatName,
            "nummod" => DepRel::Nummod,
            "punct" => DepRel::Punct,
            "expl:pv" => DepRel::ExplPv,
            "dep" => DepRel::Dep,
            "root" => DepRel::Root,
            other => DepRel::Other(other.to_string()),
        }
    }

    pub fn as_label(&self) -> &str {
        match self {
            DepRel::Nsubj => "nsubj",
            DepRel::NsubjPass => "nsubj:pass",
            DepRel::Csubj => "csubj",
            DepRel::CsubjPass => "csubj:pass",
            DepRel::Obj => "obj",
            DepRel::Iobj => "iobj",
            DepRel::Obl => "obl",
            DepRel::Xcomp => "xcomp",
            DepRel::Ccomp => "ccomp",
            DepRel::Advcl => "advcl",
            DepRel::Advmod => "advmod",
            DepRel::Nmod => "nmod",
            DepRel::Amod => "amod",
            DepRel::Det => "det",
            DepRel::Case => "case",
            DepRel::Cc => "cc",
            DepRel::Conj => "conj",
            DepRel::Cop => "cop",
            DepRel::Aux => "aux",
            DepRel::AuxPass => "aux:pass",
            DepRel::Mark => "mark",
            DepRel::Appos => "appos",
            DepRel::Acl => "acl",
            DepRel::AclRelcl => "acl:relcl",
            DepRel::Flat => "flat",
            DepRel::FlatName => "flat:name",
            DepRel::Nummod => "nummod",
            DepRel::Punct => "punct",
            DepRel::ExplPv => "expl:pv",
            DepRel::Dep => "dep",
            DepRel::Root => "root",
            DepRel::Other(s) => s,
        }
    }

    /// Rótulos que marcam o sujeito sintático de um predicado.
    pub fn is_subject(&self) -> bool {
        matches!(
            self,
            DepRel::Nsubj | DepRel::NsubjPass | DepRel::Csubj | DepRel::CsubjPass
        )
    }

    /// Rótulos de oração subordinada que podem virar sub-extrações.
    pub fn is_subordinate_clause(&self) -> bool {
        matches!(self, DepRel::Ccomp | DepRel::Advcl)
    }
}

/// Um token da sentença com todas as anotações UD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Índice 1-based dentro da sentença.
    pub index: usize,
    /// Forma de superfície.
    pub text: String,
    /// Lema.
    pub lemma: String,
    /// Classe gramatical grossa.
    pub upos: UPos,
    /// Relação de dependência com o head.
    pub dep: DepRel,
    /// Índice do head (0 = raiz).
    pub head: usize,
    /// Traços morfológicos (`PronType=Rel`, `Person=3`, ...).
    pub feats: HashMap<String, String>,
}

impl Token {
    /// Consulta um traço morfológico pelo nome.
    pub fn feat(&self, name: &str) -> Option<&str> {
        self.feats.get(name).map(String::as_str)
    }

    /// Pronome relativo: PRON ou SCONJ com `PronType=Rel` ("que", "qual").
    pub fn is_relative_pronoun(&self) -> bool {
        matches!(self.upos, UPos::Pron | UPos::Sconj) && self.feat("PronType") == Some("Rel")
    }

    pub fn is_verbal(&self) -> bool {
        self.upos.is_verbal()
    }
}
