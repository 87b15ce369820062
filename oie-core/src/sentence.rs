//! # Sentença e árvore de dependências
//!
//! A `Sentence` é imutável depois de construída: uma arena de tokens mais a
//! tabela de filhos pré-computada. Todas as referências entre tokens são
//! índices na arena — nada de ponteiros cíclicos. Pai, filhos e busca de
//! filho por rótulo são O(1)/O(filhos); a ordem dos filhos segue a posição
//! na sentença.

use crate::error::{OieError, Result};
use crate::token::{DepRel, Token};

/// Uma sentença analisada: tokens em ordem mais a árvore induzida.
#[derive(Debug, Clone)]
pub struct Sentence {
    id: String,
    text: String,
    tokens: Vec<Token>,
    /// `children[i]` lista os filhos do token `i` (1-based); `children[0]`
    /// lista as raízes. Sempre em ordem de sentença.
    children: Vec<Vec<usize>>,
}

impl Sentence {
    /// Constrói a sentença validando a consistência dos heads.
    ///
    /// Os tokens devem vir em ordem, com `index` 1-based contíguo. Heads fora
    /// do intervalo ou uma cadeia de heads cíclica rejeitam a sentença com
    /// [`OieError::MalformedSentence`].
    pub fn new(id: impl Into<String>, text: impl Into<String>, tokens: Vec<Token>) -> Result<Self> {
        let n = tokens.len();
        for (i, token) in tokens.iter().enumerate() {
            if token.index != i + 1 {
                return Err(OieError::MalformedSentence(format!(
                    "índice de token fora de ordem: esperado {}, veio {}",
                    i + 1,
                    token.index
                )));
            }
            if token.head > n {
                return Err(OieError::MalformedSentence(format!(
                    "head {} do token {} fora do intervalo (sentença tem {} tokens)",
                    token.head, token.index, n
                )));
            }
            if token.head == token.index {
                return Err(OieError::MalformedSentence(format!(
                    "token {} aponta para si mesmo",
                    token.index
                )));
            }
        }

        // Ciclo na cadeia de heads: subir mais de n passos sem chegar à raiz
        for token in &tokens {
            let mut current = token.head;
            let mut steps = 0usize;
            while current != 0 {
                current = tokens[current - 1].head;
                steps += 1;
                if steps > n {
                    return Err(OieError::MalformedSentence(format!(
                        "ciclo na cadeia de heads a partir do token {}",
                        token.index
                    )));
                }
            }
        }

        let mut children = vec![Vec::new(); n + 1];
        for token in &tokens {
            children[token.head].push(token.index);
        }

        Ok(Sentence {
            id: id.into(),
            text: text.into(),
            tokens,
            children,
        })
    }

    /// Identificador da sentença (sent_id do CoNLL-U ou ordinal).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Texto de superfície da sentença.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Acessa um token pelo índice 1-based.
    ///
    /// # Panics
    /// Índice 0 ou além do tamanho é erro de programação do chamador.
    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index - 1]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Filhos diretos de um token, em ordem de sentença. `index == 0` lista
    /// as raízes.
    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Head de um token, ou `None` se for raiz.
    pub fn head_of(&self, index: usize) -> Option<&Token> {
        let head = self.token(index).head;
        if head == 0 {
            None
        } else {
            Some(self.token(head))
        }
    }

    /// Primeiro filho (em ordem de sentença) com a relação dada.
    pub fn child_with_dep(&self, index: usize, dep: &DepRel) -> Option<usize> {
        self.children(index)
            .iter()
            .copied()
            .find(|&c| self.token(c).dep == *dep)
    }

    /// Todos os filhos com a relação dada, em ordem de sentença.
    pub fn children_with_dep(&self, index: usize, dep: &DepRel) -> Vec<usize> {
        self.children(index)
            .iter()
            .copied()
            .filter(|&c| self.token(c).dep == *dep)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu;

    const EXEMPLO: &str = "\
1\to\to\tDET\t_\t_\t2\tdet\t_\t_
2\tmenino\tmenino\tNOUN\t_\t_\t3\tnsubj\t_\t_
3\tcomeu\tcomer\tVERB\t_\t_\t0\troot\t_\t_
4\ta\to\tDET\t_\t_\t5\tdet\t_\t_
5\tmaçã\tmaçã\tNOUN\t_\t_\t3\tobj\t_\t_
6\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_
";

    #[test]
    fn test_children_em_ordem() {
        let sent = conllu::parse_sentence(EXEMPLO, "1").unwrap();
        // Filhos de "comeu": menino (2), maçã (5), ponto (6)
        assert_eq!(sent.children(3), &[2, 5, 6]);
        // Raiz
        assert_eq!(sent.children(0), &[3]);
    }

    #[test]
    fn test_head_of() {
        let sent = conllu::parse_sentence(EXEMPLO, "1").unwrap();
        assert_eq!(sent.head_of(1).unwrap().text, "menino");
        assert!(sent.head_of(3).is_none());
    }

    #[test]
    fn test_child_with_dep() {
        let sent = conllu::parse_sentence(EXEMPLO, "1").unwrap();
        assert_eq!(sent.child_with_dep(3, &DepRel::Obj), Some(5));
        assert_eq!(sent.child_with_dep(3, &DepRel::Iobj), None);
    }

    #[test]
    fn test_head_fora_do_intervalo() {
        let bloco = "1\tx\tx\tNOUN\t_\t_\t9\tnsubj\t_\t_\n";
        let err = conllu::parse_sentence(bloco, "1").unwrap_err();
        assert!(matches!(err, OieError::MalformedSentence(_)));
    }
}
