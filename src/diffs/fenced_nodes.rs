use std::hash::{DefaultHasher, Hash, Hasher};

use log::trace;

use crate::tokenizer::Token;

/// A complete fenced node within a token list, `to` being the index of its
/// closing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FencedNode {
    from: usize,
    to: usize,
    hash: u64,
}

fn find_fenced_nodes(tokens: &[Token], fenced: &[String]) -> Vec<FencedNode> {
    let mut open: Vec<Option<usize>> = Vec::new();
    let mut nodes = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Open { kind, .. } => open.push(fenced.contains(kind).then_some(i)),
            Token::Close(_) => {
                if let Some(Some(from)) = open.pop() {
                    let mut hasher = DefaultHasher::new();
                    tokens[from..=i].hash(&mut hasher);
                    nodes.push(FencedNode {
                        from,
                        to: i,
                        hash: hasher.finish(),
                    });
                }
            }
            Token::Character { .. } | Token::Leaf { .. } | Token::ForcedMatch => {}
        }
    }
    nodes
}

/// Pairs up fenced nodes with identical content on both sides and replaces
/// their tokens with [`Token::ForcedMatch`], so the diff treats each pair as
/// one unchanged block instead of matching their characters against
/// similar-looking neighbours.
///
/// Nodes are paired in order: once a node of `tok_b` is matched, it and
/// every node before it are no longer candidates. Returns `None` when
/// nothing was paired.
pub fn match_fenced_nodes(
    tok_a: &[Token],
    tok_b: &[Token],
    fenced: &[String],
) -> Option<(Vec<Token>, Vec<Token>)> {
    if fenced.is_empty() {
        return None;
    }

    let nodes_a = find_fenced_nodes(tok_a, fenced);
    if nodes_a.is_empty() {
        return None;
    }
    let nodes_b = find_fenced_nodes(tok_b, fenced);

    let mut matched = Vec::new();
    let mut candidates = nodes_b.as_slice();
    for node_a in nodes_a {
        let content = &tok_a[node_a.from..=node_a.to];
        let found = candidates
            .iter()
            .position(|node_b| node_b.hash == node_a.hash && tok_b[node_b.from..=node_b.to] == *content);
        if let Some(index) = found {
            matched.push((node_a, candidates[index]));
            candidates = &candidates[index + 1..];
        }
    }

    if matched.is_empty() {
        return None;
    }
    trace!("Matched {} fenced nodes before diffing", matched.len());

    let mut tok_a = tok_a.to_vec();
    let mut tok_b = tok_b.to_vec();
    for (node_a, node_b) in matched {
        tok_a[node_a.from..=node_a.to].fill(Token::ForcedMatch);
        tok_b[node_b.from..=node_b.to].fill(Token::ForcedMatch);
    }
    Some((tok_a, tok_b))
}
