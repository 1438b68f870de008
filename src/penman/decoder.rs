use std::fmt;

use log::warn;

use crate::penman::tokenizer::{tokenize_penman, PenmanToken, PositionedToken};

/// Role of the triple that gives a node its concept.
pub const INSTANCE_ROLE: &str = ":instance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub source: String,
    pub role: String,
    /// `None` when the graph leaves a concept or an edge target out.
    pub target: Option<String>,
}

impl Triple {
    pub fn new(source: &str, role: &str, target: Option<&str>) -> Self {
        Triple {
            source: source.to_owned(),
            role: role.to_owned(),
            target: target.map(|t| t.to_owned()),
        }
    }

    pub fn is_instance(&self) -> bool {
        self.role == INSTANCE_ROLE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub top: Option<String>,
    pub triples: Vec<Triple>,
}

impl Graph {
    /// Node typing triples (`:instance`).
    pub fn instances(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter().filter(|t| t.is_instance())
    }

    /// Everything else: edges between nodes and attributes.
    pub fn edges(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter().filter(|t| !t.is_instance())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub message: String,
    /// Char offset of the offending token, `None` at the end of input.
    pub position: Option<usize>,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at position {}", self.message, position),
            None => write!(f, "{} at end of input", self.message),
        }
    }
}

impl std::error::Error for DecodeError {}

struct TokenStream<'a> {
    tokens: &'a [PositionedToken],
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> Option<&'a PositionedToken> {
        self.tokens.first()
    }

    fn next(&mut self) -> Option<&'a PositionedToken> {
        let (first, rest) = self.tokens.split_first()?;
        self.tokens = rest;
        Some(first)
    }

    fn error(&self, expected: &str) -> DecodeError {
        match self.peek() {
            Some(t) => DecodeError {
                message: format!("Expected {}, found {:?}", expected, t.token),
                position: Some(t.position),
            },
            None => DecodeError {
                message: format!("Expected {}", expected),
                position: None,
            },
        }
    }

    fn skip_alignment(&mut self) {
        if let Some(PositionedToken {
            token: PenmanToken::Alignment(_),
            ..
        }) = self.peek()
        {
            self.next();
        }
    }
}

/// Decodes the first graph in `txt`. Anything after it is ignored.
pub fn decode(txt: &str) -> Result<Graph, DecodeError> {
    let tokens = tokenize_penman(txt);
    let mut stream = TokenStream { tokens: &tokens };

    let mut triples = Vec::new();
    let top = parse_node(&mut stream, &mut triples)?;

    Ok(Graph { top, triples })
}

// node := "(" [ SYMBOL [ "/" [ SYMBOL | STRING ] [ ALIGNMENT ] ] ] edge* ")"
fn parse_node(
    stream: &mut TokenStream<'_>,
    triples: &mut Vec<Triple>,
) -> Result<Option<String>, DecodeError> {
    match stream.peek().map(|t| &t.token) {
        Some(PenmanToken::LeftParen) => stream.next(),
        _ => return Err(stream.error("'('")),
    };

    let var = match stream.peek().map(|t| &t.token) {
        Some(PenmanToken::RightParen) => {
            stream.next();
            return Ok(None);
        }
        Some(PenmanToken::Symbol(var)) => {
            stream.next();
            var.clone()
        }
        _ => return Err(stream.error("a variable")),
    };

    if let Some(PenmanToken::Slash) = stream.peek().map(|t| &t.token) {
        let slash = stream.next().map(|t| t.position);

        let concept = match stream.peek().map(|t| &t.token) {
            Some(PenmanToken::Symbol(concept)) | Some(PenmanToken::String(concept)) => {
                stream.next();
                stream.skip_alignment();
                Some(concept.as_str())
            }
            _ => {
                warn!("Missing concept for {} after '/' at {:?}", var, slash);
                None
            }
        };

        triples.push(Triple::new(&var, INSTANCE_ROLE, concept));
    } else {
        triples.push(Triple::new(&var, INSTANCE_ROLE, None));
    }

    loop {
        match stream.peek().map(|t| &t.token) {
            Some(PenmanToken::RightParen) => {
                stream.next();
                break;
            }
            Some(PenmanToken::Role(_)) => parse_edge(stream, &var, triples)?,
            _ => return Err(stream.error("a role or ')'")),
        }
    }

    Ok(Some(var))
}

// edge := ROLE [ ALIGNMENT ] [ node | ( SYMBOL | STRING ) [ ALIGNMENT ] ]
fn parse_edge(
    stream: &mut TokenStream<'_>,
    source: &str,
    triples: &mut Vec<Triple>,
) -> Result<(), DecodeError> {
    let role = match stream.next() {
        Some(PositionedToken {
            token: PenmanToken::Role(role),
            ..
        }) => role.as_str(),
        _ => return Err(stream.error("a role")),
    };
    stream.skip_alignment();

    let mut child_triples = Vec::new();
    let (target, is_string) = match stream.peek().map(|t| &t.token) {
        Some(PenmanToken::Symbol(target)) => {
            stream.next();
            stream.skip_alignment();
            (Some(target.clone()), false)
        }
        Some(PenmanToken::String(target)) => {
            stream.next();
            stream.skip_alignment();
            (Some(target.clone()), true)
        }
        Some(PenmanToken::LeftParen) => (parse_node(stream, &mut child_triples)?, false),
        Some(PenmanToken::Role(_)) | Some(PenmanToken::RightParen) => {
            warn!("Missing target for {} {}", source, role);
            (None, false)
        }
        _ => return Err(stream.error("a node, a symbol or a string")),
    };

    let triple = match (&target, inverted_role(role)) {
        (Some(target), Some(role)) if !is_string => Triple::new(target, &role, Some(source)),
        _ => Triple::new(source, role, target.as_deref()),
    };

    triples.push(triple);
    triples.extend(child_triples);

    Ok(())
}

/// `:ARG0-of` points the other way round as `:ARG0`.
fn inverted_role(role: &str) -> Option<String> {
    role.strip_suffix("-of")
        .filter(|role| role.len() > 1)
        .map(|role| role.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(source: &str, role: &str, target: &str) -> Triple {
        Triple::new(source, role, Some(target))
    }

    #[test]
    fn test_decode_graph() {
        let graph = decode(
            r#"(s1s / sit-01
                  :ARG0 (s1c / cat
                      :mod (s1b / big))
                  :aspect state
                  :name (s1n / name :op1 "Tom"))"#,
        )
        .unwrap();

        assert_eq!(graph.top.as_deref(), Some("s1s"));
        assert_eq!(
            graph.triples,
            vec![
                triple("s1s", ":instance", "sit-01"),
                triple("s1s", ":ARG0", "s1c"),
                triple("s1c", ":instance", "cat"),
                triple("s1c", ":mod", "s1b"),
                triple("s1b", ":instance", "big"),
                triple("s1s", ":aspect", "state"),
                triple("s1s", ":name", "s1n"),
                triple("s1n", ":instance", "name"),
                triple("s1n", ":op1", "\"Tom\""),
            ]
        );
        assert_eq!(graph.instances().count(), 4);
        assert_eq!(graph.edges().count(), 5);
    }

    #[test]
    fn test_decode_reentrancy_and_inversion() {
        let graph = decode("(s1w / want-01 :ARG0 (s1b / boy :ARG0-of (s1g / go-02)) :ARG1 s1b)")
            .unwrap();

        assert_eq!(
            graph.triples,
            vec![
                triple("s1w", ":instance", "want-01"),
                triple("s1w", ":ARG0", "s1b"),
                triple("s1b", ":instance", "boy"),
                triple("s1g", ":ARG0", "s1b"),
                triple("s1g", ":instance", "go-02"),
                triple("s1w", ":ARG1", "s1b"),
            ]
        );
    }

    #[test]
    fn test_decode_ignores_alignments() {
        let graph = decode("(s1c~e.2 / cat~e.2 :quant~e.1 2~e.1)");

        // the variable itself cannot carry an alignment
        assert!(graph.is_err());

        let graph = decode("(s1c / cat~e.2 :quant~e.1 2~e.1)").unwrap();
        assert_eq!(
            graph.triples,
            vec![triple("s1c", ":instance", "cat"), triple("s1c", ":quant", "2")]
        );
    }

    #[test]
    fn test_decode_tolerates_missing_parts() {
        let graph = decode("(s1x / :ARG0 :ARG1 (s1y))").unwrap();

        assert_eq!(
            graph.triples,
            vec![
                Triple::new("s1x", ":instance", None),
                Triple::new("s1x", ":ARG0", None),
                triple("s1x", ":ARG1", "s1y"),
                Triple::new("s1y", ":instance", None),
            ]
        );
    }

    #[test]
    fn test_node_without_concept_is_an_instance() {
        let graph = decode("(s1x / want-01 :ARG1 (s1y))").unwrap();

        assert_eq!(
            graph.triples,
            vec![
                triple("s1x", ":instance", "want-01"),
                triple("s1x", ":ARG1", "s1y"),
                Triple::new("s1y", ":instance", None),
            ]
        );
        assert_eq!(graph.instances().count(), 2);
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn test_every_of_role_is_inverted() {
        let graph = decode("(s1p / person :consist-of (s1g / group))").unwrap();

        assert_eq!(graph.triples[1], triple("s1g", ":consist", "s1p"));
    }

    #[test]
    fn test_decode_ignores_trailing_graphs() {
        let graph = decode("(a / x) (b / y)").unwrap();
        assert_eq!(graph.triples.len(), 1);
    }

    #[test]
    fn test_decode_errors() {
        let error = decode("").unwrap_err();
        assert_eq!(error.position, None);

        let error = decode("(s1x / person :ARG0 (s1y / thing)").unwrap_err();
        assert_eq!(error.position, None);
        assert!(error.to_string().ends_with("at end of input"));

        // empty node of some languages: (s1x / /)
        let error = decode("(s1a / and :op1 (s1x / /))").unwrap_err();
        assert_eq!(error.position, Some(23));

        assert!(decode("s1x / person").is_err());
        assert!(decode("(s1x / person ~)").is_err());
    }
}
